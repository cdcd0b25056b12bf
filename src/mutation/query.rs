//! Parameters for a mutation count query.

use nonempty::NonEmpty;
use omics::coordinate::position::Number;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to a [`Query`] or a [`PositionRange`].
#[derive(Debug)]
pub enum Error {
    /// The gene was empty.
    EmptyGene,

    /// The start of a position range came after its end.
    InvertedRange(Number, Number),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::EmptyGene => write!(f, "the gene must not be empty"),
            Error::InvertedRange(start, end) => write!(
                f,
                "the start position ({start}) comes after the end position ({end})"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Position ranges
////////////////////////////////////////////////////////////////////////////////////////

/// An inclusive range of positions.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PositionRange {
    /// The first position within the range.
    start: Number,

    /// The last position within the range.
    end: Number,
}

impl PositionRange {
    /// Attempts to create a new [`PositionRange`].
    ///
    /// # Examples
    ///
    /// ```
    /// use profiledata::mutation::query::PositionRange;
    ///
    /// let range = PositionRange::try_new(10, 20)?;
    /// assert!(range.contains(10));
    /// assert!(range.contains(20));
    /// assert!(!range.contains(21));
    ///
    /// assert!(PositionRange::try_new(20, 10).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(start: Number, end: Number) -> Result<Self> {
        if start > end {
            return Err(Error::InvertedRange(start, end));
        }

        Ok(Self { start, end })
    }

    /// Gets the first position within the range.
    pub fn start(&self) -> Number {
        self.start
    }

    /// Gets the last position within the range.
    pub fn end(&self) -> Number {
        self.end
    }

    /// Whether a single position falls within the range.
    pub fn contains(&self, position: Number) -> bool {
        self.start <= position && position <= self.end
    }

    /// Whether the inclusive span `[start, end]` lies wholly within the range.
    pub fn encloses(&self, start: Number, end: Number) -> bool {
        self.start <= start && end <= self.end
    }
}

impl std::fmt::Display for PositionRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Queries
////////////////////////////////////////////////////////////////////////////////////////

/// A mutation count query.
///
/// An absent range means no position filter is applied, and an absent study
/// filter means every study is considered.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Query {
    /// The gene symbol.
    gene: String,

    /// The position bounds.
    range: Option<PositionRange>,

    /// The studies to restrict the query to.
    studies: Option<NonEmpty<String>>,
}

impl Query {
    /// Attempts to create a query over every position and every study.
    ///
    /// # Examples
    ///
    /// ```
    /// use nonempty::NonEmpty;
    /// use profiledata::mutation::query::PositionRange;
    /// use profiledata::mutation::query::Query;
    ///
    /// let query = Query::try_new("KRAS")?
    ///     .range(PositionRange::try_new(12, 13)?)
    ///     .studies(NonEmpty::new(String::from("paad_tcga")));
    ///
    /// assert_eq!(query.gene(), "KRAS");
    /// assert!(query.position_range().is_some());
    /// assert!(query.includes_study("paad_tcga"));
    /// assert!(!query.includes_study("luad_tcga"));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(gene: impl Into<String>) -> Result<Self> {
        let gene = gene.into();

        if gene.trim().is_empty() {
            return Err(Error::EmptyGene);
        }

        Ok(Self {
            gene,
            range: None,
            studies: None,
        })
    }

    /// Consumes self and returns the query bounded to `range`.
    pub fn range(mut self, range: PositionRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Consumes self and returns the query restricted to `studies`.
    pub fn studies(mut self, studies: NonEmpty<String>) -> Self {
        self.studies = Some(studies);
        self
    }

    /// Gets the gene symbol.
    pub fn gene(&self) -> &str {
        &self.gene
    }

    /// Gets the position bounds (if any).
    pub fn position_range(&self) -> Option<&PositionRange> {
        self.range.as_ref()
    }

    /// Gets the study filter (if any).
    pub fn study_filter(&self) -> Option<&NonEmpty<String>> {
        self.studies.as_ref()
    }

    /// Whether mutations from `study` are considered by this query.
    pub fn includes_study(&self, study: &str) -> bool {
        match &self.studies {
            Some(studies) => studies.iter().any(|s| s == study),
            None => true,
        }
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.gene)?;

        if let Some(range) = &self.range {
            write!(f, ":{range}")?;
        }

        if let Some(studies) = &self.studies {
            let studies = studies.iter().map(String::as_str).collect::<Vec<_>>();
            write!(f, " [{}]", studies.join(","))?;
        }

        Ok(())
    }
}
