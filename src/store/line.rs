//! A line within a store dump.
//!
//! A dump is a tab-delimited text file where the first field of every line
//! names the kind of record the line holds:
//!
//! ```text
//! profile   <stable id>  <ALTERATION_TYPE>  <name>  [description]
//! gene      <entrez id>  <symbol>
//! mirna     <microRNA id>
//! value     <profile id>  <entrez id or microRNA id>  <sample id>  <value>
//! mutation  <study id>  <sample id>  <symbol>  <start>  <end>
//! feature   <entrez id>  <feature id>  <sample id>  <value>
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::num::ParseIntError;
use std::str::FromStr;

use omics::coordinate::position::Number;

use crate::gene::CanonicalGene;
use crate::gene::MicroRna;
use crate::profile;
use crate::profile::GeneticProfile;

/// The delimiter between fields.
pub const DELIMITER: char = '\t';

/// The prefix for a comment line.
pub const COMMENT_PREFIX: char = '#';

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error associated with parsing a dump line.
#[derive(Debug)]
pub enum ParseError {
    /// The record kind is not recognized.
    UnknownKind(String),

    /// An incorrect number of fields for the record kind.
    IncorrectNumberOfFields(&'static str, usize),

    /// A required field was empty.
    EmptyField(&'static str),

    /// An invalid alteration type.
    InvalidAlterationType(profile::ParseError),

    /// An invalid Entrez gene id.
    InvalidEntrezId(ParseIntError),

    /// An invalid mutation position.
    InvalidPosition(ParseIntError),

    /// A mutation whose start position comes after its end position.
    InvertedPositions(Number, Number),

    /// A profile stable id that starts with [`COMMENT_PREFIX`].
    CommentPrefixedStableId(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnknownKind(kind) => write!(f, "unknown record kind: {kind}"),
            ParseError::IncorrectNumberOfFields(kind, found) => write!(
                f,
                "invalid number of fields for a {kind} record: found {found} fields"
            ),
            ParseError::EmptyField(field) => write!(f, "empty field: {field}"),
            ParseError::InvalidAlterationType(err) => write!(f, "{err}"),
            ParseError::InvalidEntrezId(err) => write!(f, "invalid entrez id: {err}"),
            ParseError::InvalidPosition(err) => write!(f, "invalid position: {err}"),
            ParseError::InvertedPositions(start, end) => write!(
                f,
                "the start position ({start}) comes after the end position ({end})"
            ),
            ParseError::CommentPrefixedStableId(id) => write!(
                f,
                "profile stable id `{id}` must not start with `{COMMENT_PREFIX}`"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// A [`Result`](std::result::Result) with a [`ParseError`].
type Result<T> = std::result::Result<T, ParseError>;

////////////////////////////////////////////////////////////////////////////////////////
// Records
////////////////////////////////////////////////////////////////////////////////////////

/// A single measured value for a gene within a profile.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValueRecord {
    /// The stable id of the profile.
    pub profile_id: String,

    /// The Entrez id or microRNA id of the gene.
    pub gene_key: String,

    /// The sample id.
    pub sample_id: String,

    /// The value, as written.
    pub value: String,
}

/// A single observed mutation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MutationRecord {
    /// The study the sample belongs to.
    pub study_id: String,

    /// The sample carrying the mutation.
    pub sample_id: String,

    /// The HUGO symbol of the mutated gene.
    pub symbol: String,

    /// The first affected position.
    pub start: Number,

    /// The last affected position.
    pub end: Number,
}

/// A single protein-array feature (antibody) reading for a gene.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeatureRecord {
    /// The Entrez id of the gene the feature targets.
    pub entrez_id: i64,

    /// The feature id.
    pub feature_id: String,

    /// The sample id.
    pub sample_id: String,

    /// The value, as written.
    pub value: String,
}

////////////////////////////////////////////////////////////////////////////////////////
// Lines
////////////////////////////////////////////////////////////////////////////////////////

/// A line within a store dump.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Line {
    /// An empty or comment line.
    Empty,

    /// A genetic profile.
    Profile(GeneticProfile),

    /// A canonical gene.
    Gene(CanonicalGene),

    /// A microRNA.
    MicroRna(MicroRna),

    /// A measured value.
    Value(ValueRecord),

    /// An observed mutation.
    Mutation(MutationRecord),

    /// A protein-array feature reading.
    Feature(FeatureRecord),
}

impl FromStr for Line {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() || s.starts_with(COMMENT_PREFIX) {
            return Ok(Line::Empty);
        }

        let parts = s.split(DELIMITER).collect::<Vec<_>>();

        match parts[0] {
            "profile" => parse_profile(&parts).map(Line::Profile),
            "gene" => {
                expect_fields("gene", &parts, 3..=3)?;
                let entrez_id = parse_entrez_id(parts[1])?;
                let symbol = non_empty("symbol", parts[2])?;
                Ok(Line::Gene(CanonicalGene::new(entrez_id, symbol)))
            }
            "mirna" => {
                expect_fields("mirna", &parts, 2..=2)?;
                let id = non_empty("microRNA id", parts[1])?;
                Ok(Line::MicroRna(MicroRna::new(id)))
            }
            "value" => {
                expect_fields("value", &parts, 5..=5)?;
                Ok(Line::Value(ValueRecord {
                    profile_id: non_empty("profile id", parts[1])?.into(),
                    gene_key: non_empty("gene", parts[2])?.into(),
                    sample_id: non_empty("sample id", parts[3])?.into(),
                    value: parts[4].into(),
                }))
            }
            "mutation" => parse_mutation(&parts).map(Line::Mutation),
            "feature" => {
                expect_fields("feature", &parts, 5..=5)?;
                Ok(Line::Feature(FeatureRecord {
                    entrez_id: parse_entrez_id(parts[1])?,
                    feature_id: non_empty("feature id", parts[2])?.into(),
                    sample_id: non_empty("sample id", parts[3])?.into(),
                    value: parts[4].into(),
                }))
            }
            kind => Err(ParseError::UnknownKind(kind.into())),
        }
    }
}

/// Parses a profile line.
fn parse_profile(parts: &[&str]) -> Result<GeneticProfile> {
    expect_fields("profile", parts, 4..=5)?;

    let stable_id = non_empty("stable id", parts[1])?;
    if stable_id.starts_with(COMMENT_PREFIX) {
        return Err(ParseError::CommentPrefixedStableId(stable_id.into()));
    }

    let alteration_type = parts[2]
        .parse()
        .map_err(ParseError::InvalidAlterationType)?;
    let name = non_empty("name", parts[3])?;

    let profile = GeneticProfile::new(stable_id, name, alteration_type);

    match parts.get(4).filter(|description| !description.is_empty()) {
        Some(description) => Ok(profile.with_description(*description)),
        None => Ok(profile),
    }
}

/// Parses a mutation line.
fn parse_mutation(parts: &[&str]) -> Result<MutationRecord> {
    expect_fields("mutation", parts, 6..=6)?;

    let start = parts[4]
        .parse::<Number>()
        .map_err(ParseError::InvalidPosition)?;
    let end = parts[5]
        .parse::<Number>()
        .map_err(ParseError::InvalidPosition)?;

    if start > end {
        return Err(ParseError::InvertedPositions(start, end));
    }

    Ok(MutationRecord {
        study_id: non_empty("study id", parts[1])?.into(),
        sample_id: non_empty("sample id", parts[2])?.into(),
        symbol: non_empty("symbol", parts[3])?.into(),
        start,
        end,
    })
}

/// Ensures a record has a number of fields within `allowed`.
fn expect_fields(
    kind: &'static str,
    parts: &[&str],
    allowed: std::ops::RangeInclusive<usize>,
) -> Result<()> {
    if allowed.contains(&parts.len()) {
        Ok(())
    } else {
        Err(ParseError::IncorrectNumberOfFields(kind, parts.len()))
    }
}

/// Ensures a field is not empty.
fn non_empty<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    match value.trim() {
        "" => Err(ParseError::EmptyField(field)),
        value => Ok(value),
    }
}

/// Parses an Entrez gene id.
fn parse_entrez_id(value: &str) -> Result<i64> {
    value.trim().parse().map_err(ParseError::InvalidEntrezId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::AlterationType;

    #[test]
    fn test_empty_and_comment_lines() -> std::result::Result<(), Box<dyn std::error::Error>> {
        assert_eq!("".parse::<Line>()?, Line::Empty);
        assert_eq!("# studies loaded 2024".parse::<Line>()?, Line::Empty);
        Ok(())
    }

    #[test]
    fn test_profile_line() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let line = "profile\tbrca_rppa\tPROTEIN_ARRAY_PROTEIN_LEVEL\tRPPA\tProtein levels"
            .parse::<Line>()?;

        let expected = GeneticProfile::new("brca_rppa", "RPPA", AlterationType::ProteinArrayProteinLevel)
            .with_description("Protein levels");
        assert_eq!(line, Line::Profile(expected));

        let line = "profile\tbrca_cna\tCOPY_NUMBER_ALTERATION\tCNA".parse::<Line>()?;
        assert!(matches!(line, Line::Profile(p) if p.description().is_none()));
        Ok(())
    }

    #[test]
    fn test_mutation_line() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let line = "mutation\tluad\tS1\tKRAS\t12\t12".parse::<Line>()?;
        assert_eq!(
            line,
            Line::Mutation(MutationRecord {
                study_id: String::from("luad"),
                sample_id: String::from("S1"),
                symbol: String::from("KRAS"),
                start: 12,
                end: 12,
            })
        );
        Ok(())
    }

    #[test]
    fn test_inverted_mutation() {
        let err = "mutation\tluad\tS1\tKRAS\t13\t12".parse::<Line>().unwrap_err();
        assert!(matches!(err, ParseError::InvertedPositions(13, 12)));
    }

    #[test]
    fn test_unknown_kind() {
        let err = "sample\tS1".parse::<Line>().unwrap_err();
        assert_eq!(err.to_string(), "unknown record kind: sample");
    }

    #[test]
    fn test_incorrect_number_of_fields() {
        let err = "gene\t672".parse::<Line>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid number of fields for a gene record: found 2 fields"
        );
    }

    #[test]
    fn test_comment_prefixed_stable_id() {
        let err = "profile\t#cna\tCOPY_NUMBER_ALTERATION\tCNA"
            .parse::<Line>()
            .unwrap_err();
        assert!(matches!(err, ParseError::CommentPrefixedStableId(ref id) if id == "#cna"));
        assert_eq!(
            err.to_string(),
            "profile stable id `#cna` must not start with `#`"
        );
    }

    #[test]
    fn test_invalid_alteration_type() {
        let err = "profile\tp\tRPPA\tname".parse::<Line>().unwrap_err();
        assert_eq!(err.to_string(), "unknown alteration type: RPPA");
    }
}
