//! Genes and the identifier columns they emit.

/// The identifier emitted in place of an Entrez id for microRNAs.
pub const MICRO_RNA_SENTINEL_ID: i64 = -999999;

/// A gene referenced by a stable numeric identifier and a symbol.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CanonicalGene {
    /// The Entrez gene id.
    entrez_id: i64,

    /// The HUGO gene symbol.
    symbol: String,
}

impl CanonicalGene {
    /// Creates a new [`CanonicalGene`].
    pub fn new(entrez_id: i64, symbol: impl Into<String>) -> Self {
        Self {
            entrez_id,
            symbol: symbol.into(),
        }
    }

    /// Gets the Entrez gene id.
    pub fn entrez_id(&self) -> i64 {
        self.entrez_id
    }

    /// Gets the HUGO gene symbol as it was provided.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Gets the HUGO gene symbol in all capitals.
    ///
    /// # Examples
    ///
    /// ```
    /// use profiledata::gene::CanonicalGene;
    ///
    /// let gene = CanonicalGene::new(7157, "Tp53");
    /// assert_eq!(gene.symbol_all_caps(), "TP53");
    /// ```
    pub fn symbol_all_caps(&self) -> String {
        self.symbol.to_uppercase()
    }
}

/// A microRNA, referenced only by its string identifier.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct MicroRna {
    /// The microRNA id (e.g., `hsa-miR-21`).
    id: String,
}

impl MicroRna {
    /// Creates a new [`MicroRna`].
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Gets the microRNA id.
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// A gene that may appear in an exported row.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Gene {
    /// A canonical gene.
    Canonical(CanonicalGene),

    /// A microRNA.
    MicroRna(MicroRna),
}

impl Gene {
    /// Gets the two leading identifier columns for a row about this gene.
    ///
    /// Canonical genes emit their Entrez id and upper-cased symbol. MicroRNAs
    /// emit [`MICRO_RNA_SENTINEL_ID`] and their microRNA id.
    ///
    /// # Examples
    ///
    /// ```
    /// use profiledata::gene::CanonicalGene;
    /// use profiledata::gene::Gene;
    /// use profiledata::gene::MicroRna;
    ///
    /// let gene = Gene::Canonical(CanonicalGene::new(672, "brca1"));
    /// assert_eq!(gene.identifier_columns(), [String::from("672"), String::from("BRCA1")]);
    ///
    /// let gene = Gene::MicroRna(MicroRna::new("hsa-miR-21"));
    /// assert_eq!(
    ///     gene.identifier_columns(),
    ///     [String::from("-999999"), String::from("hsa-miR-21")]
    /// );
    /// ```
    pub fn identifier_columns(&self) -> [String; 2] {
        match self {
            Gene::Canonical(gene) => [gene.entrez_id().to_string(), gene.symbol_all_caps()],
            Gene::MicroRna(mirna) => [MICRO_RNA_SENTINEL_ID.to_string(), mirna.id().to_string()],
        }
    }

    /// Gets the canonical gene (if this is one).
    pub fn as_canonical(&self) -> Option<&CanonicalGene> {
        match self {
            Gene::Canonical(gene) => Some(gene),
            Gene::MicroRna(_) => None,
        }
    }
}

impl std::fmt::Display for Gene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gene::Canonical(gene) => write!(f, "{} ({})", gene.symbol(), gene.entrez_id()),
            Gene::MicroRna(mirna) => write!(f, "{}", mirna.id()),
        }
    }
}

impl From<CanonicalGene> for Gene {
    fn from(gene: CanonicalGene) -> Self {
        Gene::Canonical(gene)
    }
}

impl From<MicroRna> for Gene {
    fn from(mirna: MicroRna) -> Self {
        Gene::MicroRna(mirna)
    }
}
