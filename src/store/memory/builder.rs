//! A builder for a [`Store`].

use std::collections::HashMap;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use flate2::read::GzDecoder;
use omics::coordinate::position::Number;
use rust_lapper as lapper;
use tracing::debug;

use crate::store::line::Line;
use crate::store::line::MutationRecord;
use crate::store::memory::Store;
use crate::store::Error;
use crate::store::Result;

/// The inner value of the mutation lookup data structure.
type Iv = lapper::Interval<Number, MutationRecord>;

/// The extension of a gzipped dump.
const GZIP_EXTENSION: &str = "gz";

/// A builder for a [`Store`].
#[derive(Debug, Default)]
pub struct Builder;

impl Builder {
    /// Builds a [`Store`] from the lines of a dump.
    ///
    /// # Examples
    ///
    /// ```
    /// use profiledata::store::ProfileLookup;
    ///
    /// let data = b"profile\tgbm_cna\tCOPY_NUMBER_ALTERATION\tCNA\ngene\t1956\tEGFR\n";
    /// let store = profiledata::store::memory::Builder.try_build_from(&data[..])?;
    ///
    /// assert_eq!(store.num_profiles(), 1);
    /// assert!(store.profile_by_stable_id("gbm_cna")?.is_some());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_build_from<T>(&self, reader: T) -> Result<Store>
    where
        T: BufRead,
    {
        let mut store = Store::default();
        let mut mutations = HashMap::<String, Vec<Iv>>::default();

        for (i, result) in reader.lines().enumerate() {
            let line_no = i + 1;
            let line = result.map_err(Error::Io)?;
            let line = line
                .parse::<Line>()
                .map_err(|err| Error::Line(err, line_no))?;

            match line {
                Line::Empty => {}
                Line::Profile(profile) => {
                    store
                        .profiles
                        .insert(profile.stable_id().to_string(), profile);
                }
                Line::Gene(gene) => {
                    store
                        .symbols
                        .insert(gene.symbol_all_caps(), gene.entrez_id());
                    store.genes.insert(gene.entrez_id(), gene);
                }
                Line::MicroRna(mirna) => {
                    store.micro_rnas.insert(mirna.id().to_lowercase(), mirna);
                }
                Line::Value(record) => {
                    store
                        .values
                        .entry(record.profile_id)
                        .or_default()
                        .entry(record.gene_key)
                        .or_default()
                        .insert(record.sample_id, record.value);
                }
                Line::Mutation(record) => {
                    mutations
                        .entry(record.symbol.to_uppercase())
                        .or_default()
                        .push(lapper::Interval {
                            start: record.start,
                            stop: record.end.saturating_add(1),
                            val: record,
                        });
                }
                Line::Feature(record) => {
                    store
                        .features
                        .entry(record.entrez_id)
                        .or_default()
                        .entry(record.feature_id)
                        .or_default()
                        .insert(record.sample_id, record.value);
                }
            }
        }

        for (symbol, intervals) in mutations.into_iter() {
            store.mutations.insert(symbol, lapper::Lapper::new(intervals));
        }

        debug!(
            "built store with {} profiles, {} genes, {} microRNAs and mutations for {} genes",
            store.profiles.len(),
            store.genes.len(),
            store.micro_rnas.len(),
            store.mutations.len()
        );

        Ok(store)
    }

    /// Builds a [`Store`] from a dump on disk.
    ///
    /// Files ending in `.gz` are decompressed as they are read.
    pub fn try_build_from_path(&self, path: impl AsRef<Path>) -> Result<Store> {
        let path = path.as_ref();
        let file = File::open(path).map_err(Error::Io)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some(GZIP_EXTENSION) => self.try_build_from(BufReader::new(GzDecoder::new(file))),
            _ => self.try_build_from(BufReader::new(file)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempdir::TempDir;

    use super::*;
    use crate::store::line::ParseError;
    use crate::store::ProfileLookup;

    const DUMP: &str = "# a small dump\nprofile\tp\tMRNA_EXPRESSION\tmRNA\ngene\t672\tBRCA1\n";

    #[test]
    fn test_invalid_line_reports_line_number() {
        let data = b"gene\t672\tBRCA1\n\ngene\tx\tBRCA2\n";
        let err = Builder.try_build_from(&data[..]).unwrap_err();

        assert!(matches!(err, Error::Line(ParseError::InvalidEntrezId(_), 3)));
    }

    #[test]
    fn test_build_from_plain_path() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("profiledata")?;
        let path = dir.path().join("dump.tsv");
        std::fs::write(&path, DUMP)?;

        let store = Builder.try_build_from_path(&path)?;
        assert_eq!(store.num_profiles(), 1);
        assert_eq!(store.num_genes(), 1);
        Ok(())
    }

    #[test]
    fn test_build_from_gzipped_path() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("profiledata")?;
        let path = dir.path().join("dump.tsv.gz");

        let mut encoder = GzEncoder::new(File::create(&path)?, Compression::default());
        encoder.write_all(DUMP.as_bytes())?;
        encoder.finish()?;

        let store = Builder.try_build_from_path(&path)?;
        assert!(store.profile_by_stable_id("p")?.is_some());
        Ok(())
    }

    #[test]
    fn test_missing_path() {
        let err = Builder
            .try_build_from_path("/this/path/does/not/exist.tsv")
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
