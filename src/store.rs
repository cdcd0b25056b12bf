//! Contracts for the data-access collaborators behind an export, along with
//! an in-memory implementation of each of them.
//!
//! The assembler in [`crate::export`] only ever talks to the traits defined
//! here:
//!
//! - [`ProfileLookup`] resolves genetic profiles by stable id,
//! - [`GeneResolver`] resolves gene identifiers for an alteration type, and
//! - [`AlterationValues`] fetches per-sample values for a gene.
//!
//! [`memory::Store`] implements all three (and
//! [`MutationCountAccessor`](crate::mutation::MutationCountAccessor)) on top
//! of a dump file read through a [`line::Line`] parser.

use std::io;

use crate::gene::CanonicalGene;
use crate::gene::Gene;
use crate::profile::AlterationType;
use crate::profile::GeneticProfile;

pub mod line;
pub mod memory;

/// The value reported for a sample with no recorded measurement.
pub const MISSING_VALUE: &str = "NaN";

/// A data-access error.
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// An invalid line within a dump (with its line number).
    Line(line::ParseError, usize),

    /// A failure reported by the backing store itself.
    Backend(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Line(err, line_no) => write!(f, "invalid line {line_no}: {err}"),
            Error::Backend(reason) => write!(f, "backend error: {reason}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Looks up genetic profiles.
pub trait ProfileLookup {
    /// Gets the profile with the given stable id, or [`None`] if no such
    /// profile exists.
    fn profile_by_stable_id(&self, stable_id: &str) -> Result<Option<GeneticProfile>>;
}

/// Resolves client-provided gene identifiers.
pub trait GeneResolver {
    /// Resolves `identifier` in the context of a profile measuring
    /// `alteration_type`, or returns [`None`] if it does not name a gene.
    fn resolve_gene(
        &self,
        identifier: &str,
        alteration_type: AlterationType,
    ) -> Result<Option<Gene>>;
}

/// Fetches per-sample alteration values.
pub trait AlterationValues {
    /// Gets one value per sample (in the order of `samples`) for `gene`
    /// within `profile`. Samples without a measurement get
    /// [`MISSING_VALUE`].
    fn data_row(
        &self,
        gene: &Gene,
        samples: &[String],
        profile: &GeneticProfile,
    ) -> Result<Vec<String>>;

    /// Gets one protein-array protein-level value per sample for `gene`,
    /// taken from whichever protein-array feature best correlates with
    /// `target` (the row fetched from the paired profile).
    ///
    /// How "best" is measured is up to the implementation.
    fn best_correlated_protein_array_row(
        &self,
        gene: &CanonicalGene,
        samples: &[String],
        target: Option<&[String]>,
    ) -> Result<Vec<String>>;
}

impl<T> ProfileLookup for &T
where
    T: ProfileLookup + ?Sized,
{
    fn profile_by_stable_id(&self, stable_id: &str) -> Result<Option<GeneticProfile>> {
        (**self).profile_by_stable_id(stable_id)
    }
}

impl<T> GeneResolver for &T
where
    T: GeneResolver + ?Sized,
{
    fn resolve_gene(
        &self,
        identifier: &str,
        alteration_type: AlterationType,
    ) -> Result<Option<Gene>> {
        (**self).resolve_gene(identifier, alteration_type)
    }
}

impl<T> AlterationValues for &T
where
    T: AlterationValues + ?Sized,
{
    fn data_row(
        &self,
        gene: &Gene,
        samples: &[String],
        profile: &GeneticProfile,
    ) -> Result<Vec<String>> {
        (**self).data_row(gene, samples, profile)
    }

    fn best_correlated_protein_array_row(
        &self,
        gene: &CanonicalGene,
        samples: &[String],
        target: Option<&[String]>,
    ) -> Result<Vec<String>> {
        (**self).best_correlated_protein_array_row(gene, samples, target)
    }
}
