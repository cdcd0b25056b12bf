//! An in-memory store built from a dump file.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::HashSet;

use omics::coordinate::position::Number;
use rust_lapper as lapper;
use tracing::debug;

use crate::gene::CanonicalGene;
use crate::gene::Gene;
use crate::gene::MicroRna;
use crate::mutation::AlterationCount;
use crate::mutation::MutationCountAccessor;
use crate::mutation::Query;
use crate::profile::AlterationType;
use crate::profile::GeneticProfile;
use crate::store::line::MutationRecord;
use crate::store::AlterationValues;
use crate::store::GeneResolver;
use crate::store::ProfileLookup;
use crate::store::Result;
use crate::store::MISSING_VALUE;

pub mod builder;

pub use builder::Builder;

/// Values keyed by sample id.
type SampleValues = HashMap<String, String>;

/// A store holding every profile, gene, value, mutation and protein-array
/// feature in memory.
///
/// Generally, you will want to use a [`builder::Builder`] to construct one of
/// these.
#[derive(Debug, Default)]
pub struct Store {
    /// Profiles keyed by stable id.
    pub(crate) profiles: HashMap<String, GeneticProfile>,

    /// Canonical genes keyed by Entrez id.
    pub(crate) genes: HashMap<i64, CanonicalGene>,

    /// Entrez ids keyed by upper-cased symbol.
    pub(crate) symbols: HashMap<String, i64>,

    /// MicroRNAs keyed by lower-cased id.
    pub(crate) micro_rnas: HashMap<String, MicroRna>,

    /// Values keyed by profile stable id, then gene key, then sample id.
    pub(crate) values: HashMap<String, HashMap<String, SampleValues>>,

    /// Mutations keyed by upper-cased symbol and indexed by position.
    pub(crate) mutations: HashMap<String, lapper::Lapper<Number, MutationRecord>>,

    /// Protein-array features keyed by Entrez id, then feature id.
    pub(crate) features: BTreeMap<i64, BTreeMap<String, SampleValues>>,
}

impl Store {
    /// Gets the number of profiles in the store.
    pub fn num_profiles(&self) -> usize {
        self.profiles.len()
    }

    /// Gets the number of canonical genes in the store.
    pub fn num_genes(&self) -> usize {
        self.genes.len()
    }

    /// Gets every mutation matching `query`.
    fn matching_mutations(&self, query: &Query) -> Vec<&MutationRecord> {
        let Some(index) = self.mutations.get(&query.gene().to_uppercase()) else {
            return Vec::new();
        };

        let candidates = match query.position_range() {
            Some(range) => index
                .find(range.start(), range.end().saturating_add(1))
                .map(|iv| &iv.val)
                .filter(|mutation| range.encloses(mutation.start, mutation.end))
                .collect::<Vec<_>>(),
            None => index.iter().map(|iv| &iv.val).collect::<Vec<_>>(),
        };

        candidates
            .into_iter()
            .filter(|mutation| query.includes_study(&mutation.study_id))
            .collect()
    }
}

impl ProfileLookup for Store {
    fn profile_by_stable_id(&self, stable_id: &str) -> Result<Option<GeneticProfile>> {
        Ok(self.profiles.get(stable_id).cloned())
    }
}

impl GeneResolver for Store {
    fn resolve_gene(
        &self,
        identifier: &str,
        alteration_type: AlterationType,
    ) -> Result<Option<Gene>> {
        let identifier = identifier.trim();

        if alteration_type == AlterationType::MicroRnaExpression {
            return Ok(self
                .micro_rnas
                .get(&identifier.to_lowercase())
                .cloned()
                .map(Gene::MicroRna));
        }

        let entrez_id = match identifier.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => self.symbols.get(&identifier.to_uppercase()).copied(),
        };

        Ok(entrez_id
            .and_then(|id| self.genes.get(&id))
            .cloned()
            .map(Gene::Canonical))
    }
}

impl AlterationValues for Store {
    fn data_row(
        &self,
        gene: &Gene,
        samples: &[String],
        profile: &GeneticProfile,
    ) -> Result<Vec<String>> {
        let key = match gene {
            Gene::Canonical(gene) => gene.entrez_id().to_string(),
            Gene::MicroRna(mirna) => mirna.id().to_string(),
        };

        let values = self
            .values
            .get(profile.stable_id())
            .and_then(|genes| genes.get(&key));

        Ok(row_for(values, samples))
    }

    fn best_correlated_protein_array_row(
        &self,
        gene: &CanonicalGene,
        samples: &[String],
        target: Option<&[String]>,
    ) -> Result<Vec<String>> {
        let Some(features) = self
            .features
            .get(&gene.entrez_id())
            .filter(|features| !features.is_empty())
        else {
            return Ok(row_for(None, samples));
        };

        let mut rows = features
            .iter()
            .map(|(id, values)| (id, row_for(Some(values), samples)))
            .collect::<Vec<_>>();

        let mut best: Option<(usize, f64)> = None;

        if let Some(target) = target {
            for (i, (id, row)) in rows.iter().enumerate() {
                let Some(r) = pearson(target, row) else {
                    debug!("feature {id} has too few values to correlate");
                    continue;
                };

                if best.map_or(true, |(_, best_r)| r > best_r) {
                    best = Some((i, r));
                }
            }
        }

        let (i, _) = best.unwrap_or((0, f64::NAN));
        let (id, row) = rows.swap_remove(i);

        debug!(
            "selected protein-array feature {id} for gene {}",
            gene.symbol()
        );

        Ok(row)
    }
}

impl MutationCountAccessor for Store {
    fn counts_per_study(&self, query: &Query) -> Result<Vec<AlterationCount>> {
        let mut studies = BTreeMap::<&str, HashSet<&str>>::new();

        for mutation in self.matching_mutations(query) {
            studies
                .entry(mutation.study_id.as_str())
                .or_default()
                .insert(mutation.sample_id.as_str());
        }

        Ok(studies
            .into_iter()
            .map(|(study, samples)| AlterationCount::for_study(study, samples.len()))
            .collect())
    }

    fn counts(&self, query: &Query) -> Result<AlterationCount> {
        let samples = self
            .matching_mutations(query)
            .into_iter()
            .map(|mutation| (mutation.study_id.as_str(), mutation.sample_id.as_str()))
            .collect::<HashSet<_>>();

        Ok(AlterationCount::aggregate(samples.len()))
    }
}

/// Lays the recorded values out in the order of `samples`.
fn row_for(values: Option<&SampleValues>, samples: &[String]) -> Vec<String> {
    samples
        .iter()
        .map(|sample| {
            values
                .and_then(|values| values.get(sample))
                .cloned()
                .unwrap_or_else(|| String::from(MISSING_VALUE))
        })
        .collect()
}

/// Computes the Pearson correlation between two rows over the positions
/// where both hold a finite number.
///
/// Returns [`None`] with fewer than two such positions or when either side
/// has no variance.
fn pearson(a: &[String], b: &[String]) -> Option<f64> {
    let pairs = a
        .iter()
        .zip(b)
        .filter_map(|(x, y)| Some((finite(x)?, finite(y)?)))
        .collect::<Vec<_>>();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        cov += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x).powi(2);
        var_y += (y - mean_y).powi(2);
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

/// Parses a value as a finite number.
fn finite(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use nonempty::NonEmpty;

    use super::*;
    use crate::mutation::PositionRange;

    fn store() -> std::result::Result<Store, Box<dyn std::error::Error>> {
        let data = "\
profile\tcna\tCOPY_NUMBER_ALTERATION\tCNA
profile\tmirna\tMICRO_RNA_EXPRESSION\tmiRNA
gene\t7157\tTP53
gene\t3845\tKRAS
mirna\thsa-miR-21
value\tcna\t7157\tS1\t-2
value\tcna\t7157\tS2\t0
value\tmirna\thsa-miR-21\tS1\t4.5
mutation\tluad\tS1\tKRAS\t12\t12
mutation\tluad\tS1\tKRAS\t61\t61
mutation\tluad\tS2\tKRAS\t13\t13
mutation\tpaad\tP1\tKRAS\t12\t12
mutation\tpaad\tP2\tKRAS\t100\t140
feature\t7157\tp53_b\tS1\t1.0
feature\t7157\tp53_b\tS2\t2.0
feature\t7157\tp53_b\tS3\t3.0
feature\t7157\tp53_a\tS1\t3.0
feature\t7157\tp53_a\tS2\t2.0
feature\t7157\tp53_a\tS3\t1.0
";
        Ok(Builder.try_build_from(data.as_bytes())?)
    }

    fn samples(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_gene() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let store = store()?;

        let by_symbol = store.resolve_gene("tp53", AlterationType::CopyNumberAlteration)?;
        let by_id = store.resolve_gene("7157", AlterationType::CopyNumberAlteration)?;
        assert_eq!(by_symbol, by_id);
        assert!(by_symbol.is_some());

        assert!(store
            .resolve_gene("NOPE", AlterationType::CopyNumberAlteration)?
            .is_none());

        let mirna = store.resolve_gene("HSA-MIR-21", AlterationType::MicroRnaExpression)?;
        assert_eq!(mirna, Some(Gene::MicroRna(MicroRna::new("hsa-miR-21"))));

        // Canonical genes are not microRNAs.
        assert!(store
            .resolve_gene("TP53", AlterationType::MicroRnaExpression)?
            .is_none());

        Ok(())
    }

    #[test]
    fn test_data_row_fills_missing_values() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let store = store()?;
        let profile = store.profile_by_stable_id("cna")?.unwrap();
        let gene = Gene::Canonical(CanonicalGene::new(7157, "TP53"));

        let row = store.data_row(&gene, &samples(&["S2", "S9", "S1"]), &profile)?;
        assert_eq!(row, vec!["0", "NaN", "-2"]);
        Ok(())
    }

    #[test]
    fn test_counts_without_filters() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let store = store()?;
        let query = Query::try_new("kras")?;

        let per_study = store.counts_per_study(&query)?;
        assert_eq!(
            per_study,
            vec![
                AlterationCount::for_study("luad", 2),
                AlterationCount::for_study("paad", 2),
            ]
        );

        assert_eq!(store.counts(&query)?, AlterationCount::aggregate(4));
        Ok(())
    }

    #[test]
    fn test_counts_with_range() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let store = store()?;
        let query = Query::try_new("KRAS")?.range(PositionRange::try_new(12, 13)?);

        let per_study = store.counts_per_study(&query)?;
        assert_eq!(
            per_study,
            vec![
                AlterationCount::for_study("luad", 2),
                AlterationCount::for_study("paad", 1),
            ]
        );

        // Overlapping but not enclosed mutations are excluded.
        let query = Query::try_new("KRAS")?.range(PositionRange::try_new(90, 120)?);
        assert!(store.counts_per_study(&query)?.is_empty());
        assert_eq!(store.counts(&query)?.count(), 0);

        Ok(())
    }

    #[test]
    fn test_counts_with_studies() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let store = store()?;
        let query = Query::try_new("KRAS")?
            .range(PositionRange::try_new(12, 12)?)
            .studies(NonEmpty::new(String::from("paad")));

        assert_eq!(
            store.counts_per_study(&query)?,
            vec![AlterationCount::for_study("paad", 1)]
        );
        assert_eq!(store.counts(&query)?, AlterationCount::aggregate(1));
        Ok(())
    }

    #[test]
    fn test_counts_for_unknown_gene() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let store = store()?;
        let query = Query::try_new("BRAF")?;

        assert!(store.counts_per_study(&query)?.is_empty());
        assert_eq!(store.counts(&query)?, AlterationCount::aggregate(0));
        Ok(())
    }

    #[test]
    fn test_best_correlated_feature() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let store = store()?;
        let gene = CanonicalGene::new(7157, "TP53");
        let ids = samples(&["S1", "S2", "S3"]);

        let target = samples(&["10", "20", "30"]);
        let row = store.best_correlated_protein_array_row(&gene, &ids, Some(&target))?;
        assert_eq!(row, vec!["1.0", "2.0", "3.0"]);

        let target = samples(&["30", "20", "10"]);
        let row = store.best_correlated_protein_array_row(&gene, &ids, Some(&target))?;
        assert_eq!(row, vec!["3.0", "2.0", "1.0"]);

        // Without a target, the first feature (by id) is used.
        let row = store.best_correlated_protein_array_row(&gene, &ids, None)?;
        assert_eq!(row, vec!["3.0", "2.0", "1.0"]);

        Ok(())
    }

    #[test]
    fn test_best_correlated_without_features() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let store = store()?;
        let gene = CanonicalGene::new(3845, "KRAS");

        let row = store.best_correlated_protein_array_row(&gene, &samples(&["S1", "S2"]), None)?;
        assert_eq!(row, vec!["NaN", "NaN"]);
        Ok(())
    }

    #[test]
    fn test_pearson() {
        let a = samples(&["1", "2", "3", "NaN"]);
        let b = samples(&["2", "4", "6", "8"]);
        let r = pearson(&a, &b).unwrap();
        assert!((r - 1.0).abs() < 1e-12);

        let flat = samples(&["1", "1", "1", "1"]);
        assert_eq!(pearson(&flat, &b), None);
        assert_eq!(pearson(&samples(&["1"]), &samples(&["1"])), None);
    }
}
