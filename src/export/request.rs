//! A request for a profile data export.

use std::sync::LazyLock;

use nonempty::NonEmpty;
use regex::Regex;

use crate::profile::GeneticProfile;

/// The characters that would break a field or a line in the exported text.
const BREAKING_CHARACTERS: [char; 3] = ['\t', '\n', '\r'];

/// Splits whitespace-delimited sample ids.
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error that occurs when a required field was never provided to the
/// [`Builder`].
#[derive(Debug)]
pub enum MissingError {
    /// No profile ids were provided to the [`Builder`].
    ProfileIds,
}

impl std::fmt::Display for MissingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingError::ProfileIds => write!(f, "profile ids"),
        }
    }
}

impl std::error::Error for MissingError {}

/// An error related to a [`Builder`].
#[derive(Debug)]
pub enum Error {
    /// An error where a required field was never provided to the [`Builder`].
    Missing(MissingError),

    /// A value that contains a tab or a line break.
    ///
    /// The first element is the kind of value and the second is the value.
    BreakingCharacter(&'static str, String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Missing(err) => write!(f, "missing required field: {err}"),
            Error::BreakingCharacter(kind, value) => {
                write!(f, "{kind} {value:?} contains a tab or a line break")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Request
////////////////////////////////////////////////////////////////////////////////////////

/// A request for a profile data export.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Request {
    /// The stable ids of the requested profiles.
    profile_ids: NonEmpty<String>,

    /// The requested gene identifiers.
    genes: Vec<String>,

    /// The requested sample ids.
    samples: Vec<String>,

    /// Whether to leave out the `# DATA_TYPE` and `# COLOR_GRADIENT_SETTINGS`
    /// lines.
    suppress_header: bool,
}

impl Request {
    /// Creates a request against a single, already-loaded profile.
    ///
    /// The sample ids are provided as a single whitespace-delimited string,
    /// and the leading comment lines are always suppressed.
    ///
    /// # Examples
    ///
    /// ```
    /// use profiledata::export::Request;
    /// use profiledata::profile::AlterationType;
    /// use profiledata::profile::GeneticProfile;
    ///
    /// let profile = GeneticProfile::new("gbm_mrna", "mRNA", AlterationType::MrnaExpression);
    /// let request = Request::for_profile(&profile, vec![String::from("EGFR")], " S1 S2\tS3\n");
    ///
    /// assert_eq!(request.profile_ids().first(), "gbm_mrna");
    /// assert_eq!(request.samples(), ["S1", "S2", "S3"]);
    /// assert!(request.suppress_header());
    /// ```
    pub fn for_profile(profile: &GeneticProfile, genes: Vec<String>, samples: &str) -> Self {
        Self {
            profile_ids: NonEmpty::new(profile.stable_id().to_string()),
            genes,
            samples: split_samples(samples),
            suppress_header: true,
        }
    }

    /// Gets the stable ids of the requested profiles.
    pub fn profile_ids(&self) -> &NonEmpty<String> {
        &self.profile_ids
    }

    /// Gets the requested gene identifiers.
    pub fn genes(&self) -> &[String] {
        &self.genes
    }

    /// Gets the requested sample ids.
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// Whether the leading comment lines are suppressed.
    pub fn suppress_header(&self) -> bool {
        self.suppress_header
    }
}

/// Splits a whitespace-delimited list of sample ids.
fn split_samples(samples: &str) -> Vec<String> {
    WHITESPACE
        .split(samples.trim())
        .filter(|sample| !sample.is_empty())
        .map(String::from)
        .collect()
}

////////////////////////////////////////////////////////////////////////////////////////
// Builder
////////////////////////////////////////////////////////////////////////////////////////

/// A builder for a [`Request`].
#[derive(Debug, Default)]
pub struct Builder {
    /// The stable ids of the requested profiles.
    profile_ids: Option<NonEmpty<String>>,

    /// The requested gene identifiers.
    genes: Vec<String>,

    /// The requested sample ids.
    samples: Vec<String>,

    /// Whether to leave out the leading comment lines.
    suppress_header: bool,
}

impl Builder {
    /// Pushes a profile stable id into the [`Builder`].
    ///
    /// # Examples
    ///
    /// ```
    /// use profiledata::export::request::Builder;
    ///
    /// let request = Builder::default()
    ///     .push_profile_id("brca_mrna")
    ///     .push_profile_id("brca_rppa")
    ///     .push_gene("ERBB2")
    ///     .samples(["S1", "S2"])
    ///     .try_build()?;
    ///
    /// assert_eq!(request.profile_ids().len(), 2);
    /// assert!(!request.suppress_header());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn push_profile_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();

        match self.profile_ids.as_mut() {
            Some(ids) => ids.push(id),
            None => self.profile_ids = Some(NonEmpty::new(id)),
        }

        self
    }

    /// Pushes each of the profile stable ids into the [`Builder`].
    pub fn profile_ids<I, S>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ids.into_iter()
            .fold(self, |builder, id| builder.push_profile_id(id))
    }

    /// Pushes a gene identifier into the [`Builder`].
    pub fn push_gene(mut self, gene: impl Into<String>) -> Self {
        self.genes.push(gene.into());
        self
    }

    /// Pushes each of the gene identifiers into the [`Builder`].
    pub fn genes<I, S>(mut self, genes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genes.extend(genes.into_iter().map(Into::into));
        self
    }

    /// Pushes a sample id into the [`Builder`].
    pub fn push_sample(mut self, sample: impl Into<String>) -> Self {
        self.samples.push(sample.into());
        self
    }

    /// Pushes each of the sample ids into the [`Builder`].
    pub fn samples<I, S>(mut self, samples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.samples.extend(samples.into_iter().map(Into::into));
        self
    }

    /// Pushes each sample id within a whitespace-delimited list into the
    /// [`Builder`].
    pub fn whitespace_delimited_samples(mut self, samples: &str) -> Self {
        self.samples.extend(split_samples(samples));
        self
    }

    /// Sets whether the leading comment lines are suppressed.
    pub fn suppress_header(mut self, suppress: bool) -> Self {
        self.suppress_header = suppress;
        self
    }

    /// Consumes `self` and attempts to build a [`Request`].
    pub fn try_build(self) -> Result<Request> {
        let profile_ids = self
            .profile_ids
            .ok_or(Error::Missing(MissingError::ProfileIds))?;

        reject_breaking_characters("profile id", profile_ids.iter())?;
        reject_breaking_characters("gene", self.genes.iter())?;
        reject_breaking_characters("sample id", self.samples.iter())?;

        Ok(Request {
            profile_ids,
            genes: self.genes,
            samples: self.samples,
            suppress_header: self.suppress_header,
        })
    }
}

/// Ensures none of `values` would break a field or a line once exported.
fn reject_breaking_characters<'a>(
    kind: &'static str,
    mut values: impl Iterator<Item = &'a String>,
) -> Result<()> {
    match values.find(|value| value.contains(BREAKING_CHARACTERS)) {
        Some(value) => Err(Error::BreakingCharacter(kind, value.clone())),
        None => Ok(()),
    }
}
