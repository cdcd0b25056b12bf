//! Genetic profiles and their alteration types.

use std::str::FromStr;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to the parsing of an [`AlterationType`].
#[derive(Debug)]
pub enum ParseError {
    /// An alteration type tag that is not recognized.
    UnknownAlterationType(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnknownAlterationType(tag) => {
                write!(f, "unknown alteration type: {tag}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

////////////////////////////////////////////////////////////////////////////////////////
// Alteration types
////////////////////////////////////////////////////////////////////////////////////////

/// The classification of the alterations measured by a genetic profile.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AlterationType {
    /// Extended mutation calls (`MUTATION_EXTENDED`).
    MutationExtended,
    /// Gene fusions (`FUSION`).
    Fusion,
    /// Structural variants (`STRUCTURAL_VARIANT`).
    StructuralVariant,
    /// Copy-number alterations (`COPY_NUMBER_ALTERATION`).
    CopyNumberAlteration,
    /// MicroRNA expression (`MICRO_RNA_EXPRESSION`).
    MicroRnaExpression,
    /// mRNA expression (`MRNA_EXPRESSION`).
    MrnaExpression,
    /// mRNA expression in normal samples (`MRNA_EXPRESSION_NORMALS`).
    MrnaExpressionNormals,
    /// RNA expression (`RNA_EXPRESSION`).
    RnaExpression,
    /// Methylation (`METHYLATION`).
    Methylation,
    /// Binary methylation calls (`METHYLATION_BINARY`).
    MethylationBinary,
    /// Phosphorylation (`PHOSPHORYLATION`).
    Phosphorylation,
    /// Protein level (`PROTEIN_LEVEL`).
    ProteinLevel,
    /// Protein-array protein level (`PROTEIN_ARRAY_PROTEIN_LEVEL`).
    ProteinArrayProteinLevel,
    /// Protein-array phosphorylation (`PROTEIN_ARRAY_PHOSPHORYLATION`).
    ProteinArrayPhosphorylation,
    /// Gene set scores (`GENESET_SCORE`).
    GenesetScore,
}

impl AlterationType {
    /// Every alteration type, in declaration order.
    pub const ALL: [AlterationType; 15] = [
        AlterationType::MutationExtended,
        AlterationType::Fusion,
        AlterationType::StructuralVariant,
        AlterationType::CopyNumberAlteration,
        AlterationType::MicroRnaExpression,
        AlterationType::MrnaExpression,
        AlterationType::MrnaExpressionNormals,
        AlterationType::RnaExpression,
        AlterationType::Methylation,
        AlterationType::MethylationBinary,
        AlterationType::Phosphorylation,
        AlterationType::ProteinLevel,
        AlterationType::ProteinArrayProteinLevel,
        AlterationType::ProteinArrayPhosphorylation,
        AlterationType::GenesetScore,
    ];

    /// Gets the textual tag for the alteration type.
    ///
    /// # Examples
    ///
    /// ```
    /// use profiledata::profile::AlterationType;
    ///
    /// assert_eq!(
    ///     AlterationType::ProteinArrayProteinLevel.as_str(),
    ///     "PROTEIN_ARRAY_PROTEIN_LEVEL"
    /// );
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            AlterationType::MutationExtended => "MUTATION_EXTENDED",
            AlterationType::Fusion => "FUSION",
            AlterationType::StructuralVariant => "STRUCTURAL_VARIANT",
            AlterationType::CopyNumberAlteration => "COPY_NUMBER_ALTERATION",
            AlterationType::MicroRnaExpression => "MICRO_RNA_EXPRESSION",
            AlterationType::MrnaExpression => "MRNA_EXPRESSION",
            AlterationType::MrnaExpressionNormals => "MRNA_EXPRESSION_NORMALS",
            AlterationType::RnaExpression => "RNA_EXPRESSION",
            AlterationType::Methylation => "METHYLATION",
            AlterationType::MethylationBinary => "METHYLATION_BINARY",
            AlterationType::Phosphorylation => "PHOSPHORYLATION",
            AlterationType::ProteinLevel => "PROTEIN_LEVEL",
            AlterationType::ProteinArrayProteinLevel => "PROTEIN_ARRAY_PROTEIN_LEVEL",
            AlterationType::ProteinArrayPhosphorylation => "PROTEIN_ARRAY_PHOSPHORYLATION",
            AlterationType::GenesetScore => "GENESET_SCORE",
        }
    }
}

impl std::fmt::Display for AlterationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AlterationType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AlterationType::ALL
            .iter()
            .find(|kind| kind.as_str() == s)
            .copied()
            .ok_or_else(|| ParseError::UnknownAlterationType(s.to_string()))
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Genetic profiles
////////////////////////////////////////////////////////////////////////////////////////

/// A genetic profile: a named set of per-sample measurements of a single
/// [`AlterationType`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneticProfile {
    /// The stable identifier.
    stable_id: String,

    /// The display name.
    name: String,

    /// The alteration type.
    alteration_type: AlterationType,

    /// An optional free-text description.
    description: Option<String>,
}

impl GeneticProfile {
    /// Creates a new [`GeneticProfile`].
    ///
    /// # Examples
    ///
    /// ```
    /// use profiledata::profile::AlterationType;
    /// use profiledata::profile::GeneticProfile;
    ///
    /// let profile = GeneticProfile::new(
    ///     "brca_tcga_gistic",
    ///     "Putative copy-number alterations from GISTIC",
    ///     AlterationType::CopyNumberAlteration,
    /// );
    ///
    /// assert_eq!(profile.stable_id(), "brca_tcga_gistic");
    /// assert_eq!(profile.description(), None);
    /// ```
    pub fn new(
        stable_id: impl Into<String>,
        name: impl Into<String>,
        alteration_type: AlterationType,
    ) -> Self {
        Self {
            stable_id: stable_id.into(),
            name: name.into(),
            alteration_type,
            description: None,
        }
    }

    /// Consumes self and returns the profile with the provided description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Gets the stable identifier.
    pub fn stable_id(&self) -> &str {
        &self.stable_id
    }

    /// Gets the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the alteration type.
    pub fn alteration_type(&self) -> AlterationType {
        self.alteration_type
    }

    /// Gets the description (if one exists).
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether or not the profile holds protein-array protein levels.
    pub fn is_protein_array_protein_level(&self) -> bool {
        self.alteration_type == AlterationType::ProteinArrayProteinLevel
    }
}
