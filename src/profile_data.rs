//! A genetic profile paired with the matrix exported from it.

use std::collections::HashMap;

use crate::matrix::Matrix;
use crate::profile::GeneticProfile;

/// The number of identifier columns that lead every gene row.
const NUM_IDENTIFIER_COLUMNS: usize = 2;

/// The column holding the gene symbol within a gene row.
const SYMBOL_COLUMN: usize = 1;

/// Single-profile matrix data keyed by gene symbol and sample id.
#[derive(Clone, Debug)]
pub struct ProfileData {
    /// The genetic profile the data was exported from.
    profile: GeneticProfile,

    /// The exported matrix.
    matrix: Matrix,

    /// The sample ids, in column order.
    samples: Vec<String>,

    /// The gene symbols, in row order.
    genes: Vec<String>,

    /// The values keyed by upper-cased gene symbol then sample id.
    values: HashMap<String, HashMap<String, String>>,
}

impl ProfileData {
    /// Creates a new [`ProfileData`] from a profile and the matrix exported
    /// for it.
    ///
    /// The header row is expected to start with the two identifier columns
    /// (`GENE_ID` and `COMMON`), followed by one column per sample.
    ///
    /// # Examples
    ///
    /// ```
    /// use profiledata::matrix::Matrix;
    /// use profiledata::profile::AlterationType;
    /// use profiledata::profile::GeneticProfile;
    /// use profiledata::profile_data::ProfileData;
    ///
    /// let profile = GeneticProfile::new("gbm_cna", "CNA", AlterationType::CopyNumberAlteration);
    /// let matrix = Matrix::parse("GENE_ID\tCOMMON\tS1\tS2\n1956\tEGFR\t2\t0\n")?;
    /// let data = ProfileData::new(profile, matrix);
    ///
    /// assert_eq!(data.samples(), ["S1", "S2"]);
    /// assert_eq!(data.genes(), ["EGFR"]);
    /// assert_eq!(data.value("egfr", "S1"), Some("2"));
    /// assert_eq!(data.value("EGFR", "S3"), None);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(profile: GeneticProfile, matrix: Matrix) -> Self {
        let samples: Vec<String> = matrix
            .header()
            .map(|header| header.iter().skip(NUM_IDENTIFIER_COLUMNS).cloned().collect())
            .unwrap_or_default();

        let mut genes = Vec::new();
        let mut values = HashMap::<String, HashMap<String, String>>::new();

        for row in matrix.data_rows() {
            let Some(symbol) = row.get(SYMBOL_COLUMN) else {
                continue;
            };

            genes.push(symbol.clone());

            let entry = values.entry(symbol.to_uppercase()).or_default();
            for (sample, value) in samples
                .iter()
                .zip(row.iter().skip(NUM_IDENTIFIER_COLUMNS))
            {
                entry.insert(sample.clone(), value.clone());
            }
        }

        Self {
            profile,
            matrix,
            samples,
            genes,
            values,
        }
    }

    /// Gets the genetic profile.
    pub fn profile(&self) -> &GeneticProfile {
        &self.profile
    }

    /// Gets the exported matrix.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Gets the sample ids, in column order.
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// Gets the gene symbols, in row order.
    pub fn genes(&self) -> &[String] {
        &self.genes
    }

    /// Gets the value recorded for a gene symbol (matched case-insensitively)
    /// and a sample id.
    pub fn value(&self, gene: &str, sample: &str) -> Option<&str> {
        self.values
            .get(&gene.to_uppercase())?
            .get(sample)
            .map(String::as_str)
    }
}
