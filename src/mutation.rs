//! Mutation counts per gene, optionally bounded by position and scoped to a
//! set of studies.
//!
//! Every variant of the count lookup (with or without position bounds, with
//! or without a study filter) is expressed through a single [`Query`].

pub mod query;

pub use query::PositionRange;
pub use query::Query;

use crate::store;

/// A count of the samples observed to carry an alteration in a gene.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AlterationCount {
    /// The study the count was taken from, or [`None`] when the count is
    /// aggregated over every matching study.
    study_id: Option<String>,

    /// The number of distinct altered samples.
    count: usize,
}

impl AlterationCount {
    /// Creates a count scoped to a single study.
    pub fn for_study(study_id: impl Into<String>, count: usize) -> Self {
        Self {
            study_id: Some(study_id.into()),
            count,
        }
    }

    /// Creates a count aggregated over every matching study.
    pub fn aggregate(count: usize) -> Self {
        Self {
            study_id: None,
            count,
        }
    }

    /// Gets the study id (if the count is scoped to a study).
    pub fn study_id(&self) -> Option<&str> {
        self.study_id.as_deref()
    }

    /// Gets the number of distinct altered samples.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl std::fmt::Display for AlterationCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.study_id {
            Some(study) => write!(f, "{study}: {}", self.count),
            None => write!(f, "all studies: {}", self.count),
        }
    }
}

/// A source of mutation counts.
///
/// Implementations are read-only. An empty result is not an error.
pub trait MutationCountAccessor {
    /// Gets one count per study with at least one mutation matching `query`,
    /// ordered by study id.
    fn counts_per_study(&self, query: &Query) -> Result<Vec<AlterationCount>, store::Error>;

    /// Gets a single count aggregated over every study matching `query`.
    fn counts(&self, query: &Query) -> Result<AlterationCount, store::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(AlterationCount::for_study("brca_tcga", 3).to_string(), "brca_tcga: 3");
        assert_eq!(AlterationCount::aggregate(0).to_string(), "all studies: 0");
    }
}
