//! Assembling multi-gene, multi-profile alteration matrices as
//! tab-delimited text.
//!
//! An [`Assembler`] answers a [`Request`] in one of three ways:
//!
//! - If any requested profile cannot be found, the output is a single line
//!   naming the first missing profile id.
//! - If a single profile is requested, the output holds one row per resolved
//!   gene.
//! - If several profiles are requested, the output holds one row per
//!   profile for the first gene that resolves against it. When exactly two
//!   profiles are requested and exactly one of them holds protein-array
//!   protein levels, the protein-array row is chosen to best correlate with
//!   the other profile's row.
//!
//! ```
//! use profiledata::export::Assembler;
//! use profiledata::export::request::Builder;
//! use profiledata::store::memory;
//!
//! let data = b"profile\tgbm_cna\tCOPY_NUMBER_ALTERATION\tCNA
//! gene\t1956\tEGFR
//! value\tgbm_cna\t1956\tS1\t2
//! value\tgbm_cna\t1956\tS2\t0
//! ";
//! let store = memory::Builder.try_build_from(&data[..])?;
//! let assembler = Assembler::new(&store, &store, &store);
//!
//! let request = Builder::default()
//!     .push_profile_id("gbm_cna")
//!     .push_gene("EGFR")
//!     .samples(["S1", "S2"])
//!     .suppress_header(true)
//!     .try_build()?;
//!
//! let export = assembler.assemble(&request)?;
//! assert_eq!(export.raw(), "GENE_ID\tCOMMON\tS1\tS2\n1956\tEGFR\t2\t0\n");
//! assert_eq!(export.profile_data().unwrap().value("EGFR", "S1"), Some("2"));
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use tracing::debug;
use tracing::warn;

use crate::gene::Gene;
use crate::matrix;
use crate::matrix::reader::COMMENT_PREFIX;
use crate::matrix::Matrix;
use crate::profile::AlterationType;
use crate::profile::GeneticProfile;
use crate::profile_data::ProfileData;
use crate::store;
use crate::store::AlterationValues;
use crate::store::GeneResolver;
use crate::store::ProfileLookup;

pub mod request;
pub mod warnings;

pub use request::Request;
pub use warnings::Warnings;

/// The delimiter between fields.
pub const TAB: &str = "\t";

/// The terminator for every line.
pub const NEW_LINE: &str = "\n";

/// The label used for a profile id in the missing-profile line.
pub const GENETIC_PROFILE_ID: &str = "genetic_profile_id";

/// The leading column headings of a single-profile export.
const SINGLE_PROFILE_COLUMNS: [&str; 2] = ["GENE_ID", "COMMON"];

/// The leading column headings of a multi-profile export.
const MULTIPLE_PROFILE_COLUMNS: [&str; 4] =
    ["GENETIC_PROFILE_ID", "ALTERATION_TYPE", "GENE_ID", "COMMON"];

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to assembling an [`Export`].
#[derive(Debug)]
pub enum Error {
    /// A data-access error.
    Store(store::Error),

    /// An error parsing the assembled text back into a matrix.
    Matrix(matrix::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Store(err) => write!(f, "store error: {err}"),
            Error::Matrix(err) => write!(f, "matrix error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<store::Error> for Error {
    fn from(err: store::Error) -> Self {
        Error::Store(err)
    }
}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Export
////////////////////////////////////////////////////////////////////////////////////////

/// The result of an export.
#[derive(Clone, Debug)]
pub struct Export {
    /// The tab-delimited text.
    raw: String,

    /// The text parsed back into a matrix.
    matrix: Matrix,

    /// The structured profile data (single-profile requests only).
    profile_data: Option<ProfileData>,

    /// The warnings raised while resolving genes.
    warnings: Warnings,
}

impl Export {
    /// Gets the tab-delimited text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Gets the parsed matrix.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Gets the structured profile data.
    ///
    /// This is only present when exactly one profile was requested and that
    /// profile exists.
    pub fn profile_data(&self) -> Option<&ProfileData> {
        self.profile_data.as_ref()
    }

    /// Gets the warnings raised while resolving genes.
    pub fn warnings(&self) -> &Warnings {
        &self.warnings
    }

    /// Consumes self and returns the tab-delimited text.
    pub fn into_raw(self) -> String {
        self.raw
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Assembler
////////////////////////////////////////////////////////////////////////////////////////

/// Assembles exports from its data-access collaborators.
#[derive(Debug)]
pub struct Assembler<P, G, V> {
    /// The profile lookup.
    profiles: P,

    /// The gene resolver.
    genes: G,

    /// The alteration value source.
    values: V,
}

/// The outcome of validating the requested profile ids.
enum Profiles {
    /// Every requested profile was found, in request order.
    Found(Vec<GeneticProfile>),

    /// The first requested profile id that could not be found.
    Missing(String),
}

impl<P, G, V> Assembler<P, G, V>
where
    P: ProfileLookup,
    G: GeneResolver,
    V: AlterationValues,
{
    /// Creates a new [`Assembler`].
    pub fn new(profiles: P, genes: G, values: V) -> Self {
        Self {
            profiles,
            genes,
            values,
        }
    }

    /// Assembles the export for `request`.
    ///
    /// Unknown genes are reported as warnings (both within the text as
    /// `# Warning:` lines and within [`Export::warnings()`]), while a
    /// data-access failure aborts the export entirely.
    pub fn assemble(&self, request: &Request) -> Result<Export> {
        let mut buffer = String::new();
        let mut warnings = Warnings::default();

        let profiles = match self.validate_profiles(request)? {
            Profiles::Found(profiles) => profiles,
            Profiles::Missing(id) => {
                warn!("no genetic profile available for {GENETIC_PROFILE_ID} `{id}`");
                buffer.push_str(&format!(
                    "No genetic profile available for {GENETIC_PROFILE_ID}:  {id}.{NEW_LINE}"
                ));
                Vec::new()
            }
        };

        match profiles.as_slice() {
            [] => {}
            [profile] => self.single_profile(request, profile, &mut buffer, &mut warnings)?,
            profiles => self.multiple_profiles(request, profiles, &mut buffer, &mut warnings)?,
        }

        let matrix = Matrix::parse(&buffer).map_err(Error::Matrix)?;

        let profile_data = match profiles.into_iter().next() {
            Some(profile) if request.profile_ids().len() == 1 => {
                Some(ProfileData::new(profile, matrix.clone()))
            }
            _ => None,
        };

        Ok(Export {
            raw: buffer,
            matrix,
            profile_data,
            warnings,
        })
    }

    /// Looks up every requested profile, stopping at the first that is
    /// missing.
    fn validate_profiles(&self, request: &Request) -> Result<Profiles> {
        let mut profiles = Vec::with_capacity(request.profile_ids().len());

        for id in request.profile_ids().iter() {
            match self.profiles.profile_by_stable_id(id)? {
                Some(profile) => profiles.push(profile),
                None => return Ok(Profiles::Missing(id.clone())),
            }
        }

        Ok(Profiles::Found(profiles))
    }

    /// Writes the export of a single profile for one or more genes.
    fn single_profile(
        &self,
        request: &Request,
        profile: &GeneticProfile,
        buffer: &mut String,
        warnings: &mut Warnings,
    ) -> Result<()> {
        debug!(
            "exporting {} genes from profile `{}`",
            request.genes().len(),
            profile.stable_id()
        );

        let genes = self.resolve_genes(
            request.genes(),
            profile.alteration_type(),
            buffer,
            warnings,
        )?;

        if !request.suppress_header() {
            push_row(buffer, ["# DATA_TYPE", profile.name()]);
            push_row(
                buffer,
                ["# COLOR_GRADIENT_SETTINGS", profile.alteration_type().as_str()],
            );
        }

        push_row(
            buffer,
            header_row(&SINGLE_PROFILE_COLUMNS, request.samples()),
        );

        for gene in &genes {
            let values = self.values.data_row(gene, request.samples(), profile)?;
            push_row(buffer, gene_row(gene, values));
        }

        Ok(())
    }

    /// Writes the export of several profiles for a single gene.
    fn multiple_profiles(
        &self,
        request: &Request,
        profiles: &[GeneticProfile],
        buffer: &mut String,
        warnings: &mut Warnings,
    ) -> Result<()> {
        push_row(
            buffer,
            header_row(&MULTIPLE_PROFILE_COLUMNS, request.samples()),
        );

        if let Some((primary, protein_array)) = protein_array_pairing(profiles) {
            debug!(
                "pairing protein-array profile `{}` with profile `{}`",
                protein_array.stable_id(),
                primary.stable_id()
            );

            let primary_row = self.first_gene_row(request, primary, buffer, warnings, None)?;
            self.first_gene_row(
                request,
                protein_array,
                buffer,
                warnings,
                Some(primary_row.as_deref()),
            )?;

            return Ok(());
        }

        debug!("exporting {} independent profiles", profiles.len());

        for profile in profiles {
            self.first_gene_row(request, profile, buffer, warnings, None)?;
        }

        Ok(())
    }

    /// Writes the row for the first requested gene that resolves against
    /// `profile` (if any) and returns the values written.
    ///
    /// When `correlate_with` is provided, the row is instead selected as the
    /// protein-array row that best correlates with the provided values.
    fn first_gene_row(
        &self,
        request: &Request,
        profile: &GeneticProfile,
        buffer: &mut String,
        warnings: &mut Warnings,
        correlate_with: Option<Option<&[String]>>,
    ) -> Result<Option<Vec<String>>> {
        // Data rows never start with the comment prefix.
        if profile.stable_id().starts_with(COMMENT_PREFIX) {
            let message = format!(
                "Invalid {GENETIC_PROFILE_ID}:  {}",
                profile.stable_id()
            );
            push_warning(buffer, warnings, message);
            return Ok(None);
        }

        let genes = self.resolve_genes(
            request.genes(),
            profile.alteration_type(),
            buffer,
            warnings,
        )?;

        let Some(gene) = genes.into_iter().next() else {
            debug!("no gene resolved for profile `{}`", profile.stable_id());
            return Ok(None);
        };

        let values = match (correlate_with, gene.as_canonical()) {
            (Some(target), Some(canonical)) => self
                .values
                .best_correlated_protein_array_row(canonical, request.samples(), target)?,
            _ => self.values.data_row(&gene, request.samples(), profile)?,
        };

        let leading = [profile.stable_id(), profile.alteration_type().as_str()];
        let row = leading
            .into_iter()
            .map(String::from)
            .chain(gene_row(&gene, values.iter().cloned()));
        push_row(buffer, row);

        Ok(Some(values))
    }

    /// Resolves every requested gene identifier for `alteration_type`.
    ///
    /// Identifiers that do not resolve are recorded in `warnings` and noted
    /// within `buffer` as comment lines.
    fn resolve_genes(
        &self,
        identifiers: &[String],
        alteration_type: AlterationType,
        buffer: &mut String,
        warnings: &mut Warnings,
    ) -> Result<Vec<Gene>> {
        let mut genes = Vec::with_capacity(identifiers.len());

        for identifier in identifiers {
            match self.genes.resolve_gene(identifier, alteration_type)? {
                Some(gene) => genes.push(gene),
                None => {
                    let message = match alteration_type {
                        AlterationType::MicroRnaExpression => {
                            format!("Unknown microRNA:  {identifier}")
                        }
                        _ => format!("Unknown gene:  {identifier}"),
                    };

                    push_warning(buffer, warnings, message);
                }
            }
        }

        Ok(genes)
    }
}

/// Finds the `(primary, protein array)` profiles when exactly two profiles are
/// requested and exactly one of them holds protein-array protein levels.
fn protein_array_pairing(
    profiles: &[GeneticProfile],
) -> Option<(&GeneticProfile, &GeneticProfile)> {
    match profiles {
        [first, second] => match (
            first.is_protein_array_protein_level(),
            second.is_protein_array_protein_level(),
        ) {
            (true, false) => Some((second, first)),
            (false, true) => Some((first, second)),
            _ => None,
        },
        _ => None,
    }
}

/// Builds a header row from the leading column headings and the sample ids.
fn header_row<'a>(
    leading: &'a [&'a str],
    samples: &'a [String],
) -> impl Iterator<Item = &'a str> + 'a {
    leading
        .iter()
        .copied()
        .chain(samples.iter().map(String::as_str))
}

/// Builds a gene row from the gene's identifier columns and its values.
fn gene_row(gene: &Gene, values: impl IntoIterator<Item = String>) -> impl Iterator<Item = String> {
    gene.identifier_columns().into_iter().chain(values)
}

/// Records a warning and notes it within `buffer` as a comment line.
fn push_warning(buffer: &mut String, warnings: &mut Warnings, message: String) {
    warn!("{message}");
    push_row(buffer, [format!("{COMMENT_PREFIX} Warning:  {message}")]);
    warnings.push(message);
}

/// Writes a single tab-delimited line into `buffer`.
fn push_row<I, S>(buffer: &mut String, fields: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            buffer.push_str(TAB);
        }

        buffer.push_str(field.as_ref());
    }

    buffer.push_str(NEW_LINE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gene::CanonicalGene;
    use crate::store::memory;

    const DUMP: &str = "\
profile\tcna\tCOPY_NUMBER_ALTERATION\tPutative copy-number alterations
profile\tmrna\tMRNA_EXPRESSION\tmRNA expression
profile\trppa\tPROTEIN_ARRAY_PROTEIN_LEVEL\tProtein levels
profile\trppa2\tPROTEIN_ARRAY_PROTEIN_LEVEL\tMore protein levels
profile\tmirna\tMICRO_RNA_EXPRESSION\tmicroRNA expression
gene\t7157\tTP53
gene\t672\tBRCA1
mirna\thsa-miR-21
value\tcna\t7157\tS1\t-2
value\tcna\t7157\tS2\t0
value\tcna\t672\tS1\t1
value\tmrna\t7157\tS1\t10
value\tmrna\t7157\tS2\t20
value\tmrna\t7157\tS3\t30
value\trppa\t7157\tS1\t0.5
value\tmirna\thsa-miR-21\tS1\t7.5
feature\t7157\tp53_a\tS1\t3
feature\t7157\tp53_a\tS2\t2
feature\t7157\tp53_a\tS3\t1
feature\t7157\tp53_b\tS1\t1
feature\t7157\tp53_b\tS2\t2
feature\t7157\tp53_b\tS3\t3
";

    fn store() -> std::result::Result<memory::Store, Box<dyn std::error::Error>> {
        Ok(memory::Builder.try_build_from(DUMP.as_bytes())?)
    }

    fn request(
        profiles: &[&str],
        genes: &[&str],
        samples: &[&str],
    ) -> std::result::Result<Request, Box<dyn std::error::Error>> {
        Ok(request::Builder::default()
            .profile_ids(profiles.iter().copied())
            .genes(genes.iter().copied())
            .samples(samples.iter().copied())
            .suppress_header(true)
            .try_build()?)
    }

    #[test]
    fn test_single_profile() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let store = store()?;
        let assembler = Assembler::new(&store, &store, &store);

        let export = assembler.assemble(&request(&["cna"], &["TP53", "brca1"], &["S1", "S2"])?)?;

        assert_eq!(
            export.raw(),
            "GENE_ID\tCOMMON\tS1\tS2\n7157\tTP53\t-2\t0\n672\tBRCA1\t1\tNaN\n"
        );

        // One header row plus one row per gene, each with two identifier
        // columns plus one column per sample.
        assert_eq!(export.matrix().num_rows(), 3);
        assert!(export.matrix().rows().iter().all(|row| row.len() == 4));
        assert!(export.warnings().is_empty());

        let data = export.profile_data().unwrap();
        assert_eq!(data.profile().stable_id(), "cna");
        assert_eq!(data.genes(), ["TP53", "BRCA1"]);
        assert_eq!(data.value("BRCA1", "S2"), Some("NaN"));

        Ok(())
    }

    #[test]
    fn test_single_profile_with_header() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let store = store()?;
        let assembler = Assembler::new(&store, &store, &store);

        let request = request::Builder::default()
            .push_profile_id("cna")
            .push_gene("TP53")
            .push_sample("S1")
            .try_build()?;

        let export = assembler.assemble(&request)?;
        assert_eq!(
            export.raw(),
            "# DATA_TYPE\tPutative copy-number alterations\n\
             # COLOR_GRADIENT_SETTINGS\tCOPY_NUMBER_ALTERATION\n\
             GENE_ID\tCOMMON\tS1\n\
             7157\tTP53\t-2\n"
        );
        assert_eq!(export.matrix().num_rows(), 2);

        Ok(())
    }

    #[test]
    fn test_unknown_genes_become_warnings() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let store = store()?;
        let assembler = Assembler::new(&store, &store, &store);

        let export = assembler.assemble(&request(&["cna"], &["NOPE", "TP53"], &["S1"])?)?;

        assert_eq!(
            export.raw(),
            "# Warning:  Unknown gene:  NOPE\nGENE_ID\tCOMMON\tS1\n7157\tTP53\t-2\n"
        );
        assert_eq!(
            export.warnings().iter().collect::<Vec<_>>(),
            vec!["Unknown gene:  NOPE"]
        );
        assert_eq!(export.matrix().num_rows(), 2);

        Ok(())
    }

    #[test]
    fn test_microrna_rows_use_sentinel() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let store = store()?;
        let assembler = Assembler::new(&store, &store, &store);

        let export =
            assembler.assemble(&request(&["mirna"], &["hsa-miR-21", "hsa-miR-1"], &["S1"])?)?;

        assert_eq!(
            export.raw(),
            "# Warning:  Unknown microRNA:  hsa-miR-1\n\
             GENE_ID\tCOMMON\tS1\n\
             -999999\thsa-miR-21\t7.5\n"
        );

        Ok(())
    }

    #[test]
    fn test_missing_profile_short_circuits() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let store = store()?;
        let assembler = Assembler::new(&store, &store, &store);

        let export =
            assembler.assemble(&request(&["cna", "nope", "also_nope"], &["TP53"], &["S1"])?)?;

        assert_eq!(
            export.raw(),
            "No genetic profile available for genetic_profile_id:  nope.\n"
        );
        assert_eq!(export.matrix().num_rows(), 1);
        assert!(export.profile_data().is_none());

        let export = assembler.assemble(&request(&["nope"], &["TP53"], &["S1"])?)?;
        assert!(export.profile_data().is_none());

        Ok(())
    }

    #[test]
    fn test_multiple_profiles() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let store = store()?;
        let assembler = Assembler::new(&store, &store, &store);

        let export =
            assembler.assemble(&request(&["mrna", "cna", "mirna"], &["TP53"], &["S1", "S2"])?)?;

        assert_eq!(
            export.raw(),
            "GENETIC_PROFILE_ID\tALTERATION_TYPE\tGENE_ID\tCOMMON\tS1\tS2\n\
             mrna\tMRNA_EXPRESSION\t7157\tTP53\t10\t20\n\
             cna\tCOPY_NUMBER_ALTERATION\t7157\tTP53\t-2\t0\n\
             # Warning:  Unknown microRNA:  TP53\n"
        );

        // The microRNA profile resolved no gene, so it has no row.
        assert_eq!(export.matrix().num_rows(), 3);
        assert!(export.profile_data().is_none());
        assert_eq!(export.warnings().len(), 1);

        Ok(())
    }

    #[test]
    fn test_protein_array_pairing() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let store = store()?;
        let assembler = Assembler::new(&store, &store, &store);
        let samples = ["S1", "S2", "S3"];

        // The protein-array profile comes first in the request, but the
        // primary profile's row is always emitted first.
        let export = assembler.assemble(&request(&["rppa", "mrna"], &["TP53"], &samples)?)?;

        assert_eq!(
            export.raw(),
            "GENETIC_PROFILE_ID\tALTERATION_TYPE\tGENE_ID\tCOMMON\tS1\tS2\tS3\n\
             mrna\tMRNA_EXPRESSION\t7157\tTP53\t10\t20\t30\n\
             rppa\tPROTEIN_ARRAY_PROTEIN_LEVEL\t7157\tTP53\t1\t2\t3\n"
        );

        Ok(())
    }

    #[test]
    fn test_two_protein_array_profiles_are_independent(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let store = store()?;
        let assembler = Assembler::new(&store, &store, &store);

        let export = assembler.assemble(&request(&["rppa", "rppa2"], &["TP53"], &["S1"])?)?;

        assert_eq!(
            export.raw(),
            "GENETIC_PROFILE_ID\tALTERATION_TYPE\tGENE_ID\tCOMMON\tS1\n\
             rppa\tPROTEIN_ARRAY_PROTEIN_LEVEL\t7157\tTP53\t0.5\n\
             rppa2\tPROTEIN_ARRAY_PROTEIN_LEVEL\t7157\tTP53\tNaN\n"
        );

        Ok(())
    }

    #[test]
    fn test_three_profiles_with_protein_array_are_independent(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let store = store()?;
        let assembler = Assembler::new(&store, &store, &store);

        let export =
            assembler.assemble(&request(&["mrna", "rppa", "cna"], &["TP53"], &["S1"])?)?;

        let ids = export
            .matrix()
            .data_rows()
            .iter()
            .map(|row| row[0].as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["mrna", "rppa", "cna"]);
        assert_eq!(export.matrix().get(2, 4), Some("0.5"));

        Ok(())
    }

    #[test]
    fn test_pairing_detection() {
        let mrna = GeneticProfile::new("m", "m", AlterationType::MrnaExpression);
        let rppa = GeneticProfile::new("r", "r", AlterationType::ProteinArrayProteinLevel);

        let pair = [rppa.clone(), mrna.clone()];
        let (primary, protein_array) = protein_array_pairing(&pair).unwrap();
        assert_eq!(primary.stable_id(), "m");
        assert_eq!(protein_array.stable_id(), "r");

        assert!(protein_array_pairing(&[mrna.clone(), mrna.clone()]).is_none());
        assert!(protein_array_pairing(&[rppa.clone(), rppa.clone()]).is_none());
        assert!(protein_array_pairing(&[mrna.clone(), rppa.clone(), mrna]).is_none());
    }

    /// A store whose every lookup fails.
    struct Unavailable;

    impl ProfileLookup for Unavailable {
        fn profile_by_stable_id(&self, _: &str) -> store::Result<Option<GeneticProfile>> {
            Err(store::Error::Backend(String::from("connection refused")))
        }
    }

    #[test]
    fn test_store_failures_abort() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let store = store()?;
        let assembler = Assembler::new(Unavailable, &store, &store);

        let err = assembler
            .assemble(&request(&["cna"], &["TP53"], &["S1"])?)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "store error: backend error: connection refused"
        );

        Ok(())
    }

    #[test]
    fn test_pairing_without_a_primary_row() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let store = store()?;
        let assembler = Assembler::new(&store, &store, &store);

        // TP53 is not a microRNA, so the primary profile has no row and the
        // protein-array row falls back to the first feature.
        let export =
            assembler.assemble(&request(&["mirna", "rppa"], &["TP53"], &["S1", "S2", "S3"])?)?;

        assert_eq!(
            export.raw(),
            "GENETIC_PROFILE_ID\tALTERATION_TYPE\tGENE_ID\tCOMMON\tS1\tS2\tS3\n\
             # Warning:  Unknown microRNA:  TP53\n\
             rppa\tPROTEIN_ARRAY_PROTEIN_LEVEL\t7157\tTP53\t3\t2\t1\n"
        );
        assert_eq!(export.matrix().num_rows(), 2);
        assert_eq!(export.warnings().len(), 1);

        Ok(())
    }

    /// A profile lookup that also knows of a profile whose stable id starts
    /// with the comment prefix.
    struct WithCommentPrefixedProfile<'a>(&'a memory::Store);

    impl ProfileLookup for WithCommentPrefixedProfile<'_> {
        fn profile_by_stable_id(&self, stable_id: &str) -> store::Result<Option<GeneticProfile>> {
            match stable_id {
                "#cna" => Ok(Some(GeneticProfile::new(
                    stable_id,
                    "Hidden",
                    AlterationType::CopyNumberAlteration,
                ))),
                _ => self.0.profile_by_stable_id(stable_id),
            }
        }
    }

    #[test]
    fn test_comment_prefixed_profiles_emit_no_rows(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let store = store()?;
        let assembler = Assembler::new(WithCommentPrefixedProfile(&store), &store, &store);

        let export = assembler.assemble(&request(&["#cna", "mrna"], &["TP53"], &["S1"])?)?;

        assert_eq!(
            export.raw(),
            "GENETIC_PROFILE_ID\tALTERATION_TYPE\tGENE_ID\tCOMMON\tS1\n\
             # Warning:  Invalid genetic_profile_id:  #cna\n\
             mrna\tMRNA_EXPRESSION\t7157\tTP53\t10\n"
        );

        // Every data row written to the text survives parsing.
        let written = export
            .raw()
            .lines()
            .filter(|line| !line.starts_with(COMMENT_PREFIX))
            .count();
        assert_eq!(export.matrix().num_rows(), written);
        assert_eq!(export.matrix().get(1, 0), Some("mrna"));
        assert_eq!(
            export.warnings().iter().collect::<Vec<_>>(),
            vec!["Invalid genetic_profile_id:  #cna"]
        );

        Ok(())
    }

    #[test]
    fn test_gene_row_identifier_columns_come_first() {
        let gene = Gene::Canonical(CanonicalGene::new(7157, "tp53"));
        let row = gene_row(&gene, vec![String::from("1")]).collect::<Vec<_>>();
        assert_eq!(row, vec!["7157", "TP53", "1"]);
    }
}
