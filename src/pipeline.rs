//! Batch deduplication: normalize, resolve against the cache, emit pairs.

use crate::cache::SimilarityCache;
use crate::config::DedupConfig;
use crate::error::Result;
use crate::ingestion::{load_seed_mappings, IngestionConnector, JsonlConnector, SeedMapping};
use crate::normalizer::normalize_optional;
use crate::output::{write_csv, AffiliationRecord};
use crate::similarity::{Levenshtein, Metric, StringSimilarity};
use crate::stats::DedupStats;
use std::fs;
use tracing::info;

/// Owns the cache for one run and maps raw affiliations to canonical forms.
pub struct Deduplicator<S = Levenshtein> {
    cache: SimilarityCache<S>,
}

impl Deduplicator<Levenshtein> {
    pub fn new() -> Self {
        Self::with_cache(SimilarityCache::new())
    }
}

impl Default for Deduplicator<Levenshtein> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StringSimilarity> Deduplicator<S> {
    pub fn with_cache(cache: SimilarityCache<S>) -> Self {
        Self { cache }
    }

    /// Canonical form of one raw value; null and empty map to `""`.
    pub fn process(&mut self, raw: Option<&str>) -> String {
        let normalized = normalize_optional(raw);
        self.cache.resolve(&normalized)
    }

    /// Process values in order, one output pair per input.
    pub fn process_batch<I>(&mut self, raws: I) -> Vec<AffiliationRecord>
    where
        I: IntoIterator<Item = Option<String>>,
    {
        raws.into_iter()
            .map(|raw| {
                let normalized_affiliation = self.process(raw.as_deref());
                AffiliationRecord {
                    original_affiliation: raw,
                    normalized_affiliation,
                }
            })
            .collect()
    }

    /// Apply seed mappings in order; later mappings overwrite earlier ones.
    pub fn seed_all(&mut self, mappings: &[SeedMapping]) {
        for mapping in mappings {
            self.cache.seed(&mapping.original, &mapping.canonical);
        }
    }

    pub fn cache(&self) -> &SimilarityCache<S> {
        &self.cache
    }

    pub fn stats(&self, total_records: usize) -> DedupStats {
        DedupStats::new(total_records, self.cache.size())
    }
}

/// Run one batch end to end: read, seed, resolve, write.
///
/// Input is parsed completely before anything is resolved or written, so a
/// malformed record leaves no output file behind.
pub fn run(config: &DedupConfig) -> Result<DedupStats> {
    config.validate()?;

    let mut connector = JsonlConnector::from_path(&config.input)?.with_field(config.field.clone());
    let records = connector.fetch()?;
    info!(
        source = connector.source_id(),
        records = records.len(),
        "loaded input"
    );

    let cache = SimilarityCache::<Metric>::with_metric(config.metric).with_threshold(config.threshold);
    let mut dedup = Deduplicator::with_cache(cache);

    if let Some(seed_path) = &config.seed_file {
        let mappings = load_seed_mappings(seed_path)?;
        dedup.seed_all(&mappings);
        info!(mappings = mappings.len(), "applied seed mappings");
    }

    info!(threshold = %config.threshold, metric = %config.metric, "processing");
    let output = dedup.process_batch(records.into_iter().map(|r| r.affiliation));

    write_csv(&config.output, &output)?;
    info!(
        "Normalized author affiliations from {} to {}",
        config.input.display(),
        config.output.display()
    );

    if let Some(dump_path) = &config.dump_cache {
        let json = serde_json::to_string_pretty(dedup.cache().entries())?;
        fs::write(dump_path, json)?;
        info!(path = %dump_path.display(), entries = dedup.cache().size(), "dumped cache");
    }

    Ok(dedup.stats(output.len()))
}
