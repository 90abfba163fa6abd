//! Incremental similarity cache.
//!
//! Holds every canonical form seen during a run, in insertion order. A new
//! string joins the first cluster whose key is similar enough, otherwise it
//! starts a new cluster. Entries are never removed.

use crate::normalizer::normalize;
use crate::similarity::{Levenshtein, StringSimilarity};
use crate::threshold::Threshold;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, trace};

/// One cache entry: a normalized key and the canonical form it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheEntry {
    pub key: String,
    pub canonical: String,
}

/// Ordered key -> canonical mapping with first-match-wins lookup.
#[derive(Debug, Clone)]
pub struct SimilarityCache<S = Levenshtein> {
    entries: Vec<CacheEntry>,
    /// key -> position in `entries`
    index: HashMap<String, usize>,
    metric: S,
    threshold: Threshold,
}

impl SimilarityCache<Levenshtein> {
    pub fn new() -> Self {
        Self::with_metric(Levenshtein)
    }
}

impl Default for SimilarityCache<Levenshtein> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StringSimilarity> SimilarityCache<S> {
    pub fn with_metric(metric: S) -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            metric,
            threshold: Threshold::DEFAULT,
        }
    }

    /// Set the threshold used by [`resolve`](Self::resolve).
    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Resolve a normalized string with the cache's default threshold.
    pub fn resolve(&mut self, normalized: &str) -> String {
        self.resolve_with(normalized, self.threshold)
    }

    /// Map `normalized` to a canonical form, inserting it as a new cluster
    /// when no existing key reaches `threshold`.
    ///
    /// The empty string resolves to itself and is never inserted.
    pub fn resolve_with(&mut self, normalized: &str, threshold: Threshold) -> String {
        if normalized.is_empty() {
            return String::new();
        }

        if let Some(entry) = self.find_match(normalized, threshold) {
            trace!(input = normalized, key = %entry.key, canonical = %entry.canonical, "matched cluster");
            return entry.canonical.clone();
        }

        debug!(canonical = normalized, size = self.entries.len() + 1, "new cluster");
        self.upsert(normalized.to_string(), normalized.to_string());
        normalized.to_string()
    }

    /// First entry, in insertion order, whose key is at least `threshold`
    /// similar to `normalized`. Does not modify the cache.
    pub fn find_match(&self, normalized: &str, threshold: Threshold) -> Option<&CacheEntry> {
        self.entries.iter().find(|entry| {
            threshold.is_met_by(self.metric.upper_bound(normalized, &entry.key))
                && threshold.is_met_by(self.metric.similarity(normalized, &entry.key))
        })
    }

    /// Force `original` to map to `canonical`, overwriting any existing mapping.
    ///
    /// Both arguments are normalized first. The write is unconditional: an
    /// existing key keeps its scan position and only its canonical changes.
    pub fn seed(&mut self, original: &str, canonical: &str) {
        let key = normalize(original);
        let canonical = normalize(canonical);
        debug!(key = %key, canonical = %canonical, "seeding mapping");
        self.upsert(key, canonical);
    }

    /// Number of distinct keys.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[CacheEntry] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&pos| self.entries[pos].canonical.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    // Overwriting keeps the entry's scan position.
    fn upsert(&mut self, key: String, canonical: String) {
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].canonical = canonical,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push(CacheEntry { key, canonical });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::JaroWinkler;

    fn threshold(v: f64) -> Threshold {
        Threshold::new(v).unwrap()
    }

    #[test]
    fn test_new_strings_create_clusters() {
        let mut cache = SimilarityCache::new();
        assert_eq!(cache.resolve("new university"), "new university");
        assert!(cache.contains_key("new university"));
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_similar_strings_join_cluster() {
        let mut cache = SimilarityCache::new();
        cache.resolve("stanford university");
        assert_eq!(cache.resolve("stanford universty"), "stanford university");
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_empty_input_short_circuits() {
        let mut cache = SimilarityCache::new();
        cache.resolve("mit");
        assert_eq!(cache.resolve(""), "");
        assert_eq!(cache.size(), 1);
        assert!(!cache.contains_key(""));
    }

    #[test]
    fn test_first_match_wins() {
        let mut cache = SimilarityCache::new();
        // "abcdx" and "abcdy" are 0.8 similar to each other, so force both in
        cache.resolve_with("abcdx", threshold(1.0));
        cache.resolve_with("abcdy", threshold(1.0));
        assert_eq!(cache.size(), 2);

        // "abcdz" is 0.8 similar to both keys
        assert_eq!(cache.resolve_with("abcdz", threshold(0.8)), "abcdx");
        assert_eq!(cache.size(), 2);
    }

    #[test]
    fn test_first_match_wins_over_better_match() {
        let mut cache = SimilarityCache::new();
        cache.resolve_with("abcdef", threshold(1.0));
        cache.resolve_with("abcdeg", threshold(1.0));
        // exact match with the second key, but the first already clears 0.8
        assert_eq!(cache.resolve_with("abcdeg", threshold(0.8)), "abcdef");
    }

    #[test]
    fn test_tie_at_threshold_boundary_matches() {
        let mut cache = SimilarityCache::new();
        cache.resolve("hello");
        // similarity is exactly 0.8
        assert_eq!(cache.resolve_with("hallo", threshold(0.8)), "hello");
    }

    #[test]
    fn test_threshold_per_call() {
        let mut cache = SimilarityCache::new();
        cache.resolve("hello");
        assert_eq!(cache.resolve_with("hallo", threshold(0.9)), "hallo");
        assert_eq!(cache.size(), 2);
    }

    #[test]
    fn test_zero_threshold_matches_anything() {
        let mut cache = SimilarityCache::new().with_threshold(threshold(0.0));
        cache.resolve("abc");
        assert_eq!(cache.resolve("xyz"), "abc");
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_size_is_monotonic() {
        let mut cache = SimilarityCache::new();
        let inputs = ["mit", "mit", "", "stanford university", "stanford univ", "oxford", ""];
        let mut last = 0;
        for input in inputs {
            cache.resolve(input);
            assert!(cache.size() >= last);
            last = cache.size();
        }
    }

    #[test]
    fn test_resolved_canonical_is_key() {
        let mut cache = SimilarityCache::new();
        for input in ["mit", "massachusetts institute of technology", "oxford", "oxfrd"] {
            let canonical = cache.resolve(input);
            assert!(cache.contains_key(&canonical), "{} is not a key", canonical);
        }
    }

    #[test]
    fn test_seed_maps_to_canonical() {
        let mut cache = SimilarityCache::new();
        cache
            .seed("Mass. Inst. of Tech", "massachusetts institute of technology")
            ;

        assert_eq!(
            cache.get("mass inst of tech"),
            Some("massachusetts institute of technology")
        );
        assert_eq!(
            cache.resolve("mass inst of tech"),
            "massachusetts institute of technology"
        );
        assert_eq!(
            cache.resolve("mass inst of techn"),
            "massachusetts institute of technology"
        );
    }

    #[test]
    fn test_seed_normalizes_both_sides() {
        let mut cache = SimilarityCache::new();
        cache.seed("M.I.T.", "Mass. Inst. of Tech");
        assert_eq!(cache.get("m i t"), Some("mass inst of tech"));
    }

    #[test]
    fn test_seed_overwrites() {
        let mut cache = SimilarityCache::new();
        cache.seed("MIT", "first mapping");
        cache.seed("MIT", "second mapping");
        assert_eq!(cache.get("mit"), Some("second mapping"));
        assert_eq!(cache.resolve("mit"), "second mapping");
        // overwritten key keeps its position
        assert_eq!(cache.entries()[0].key, "mit");
    }

    #[test]
    fn test_seed_overwrites_resolved_entry() {
        let mut cache = SimilarityCache::new();
        assert_eq!(cache.resolve("mit"), "mit");
        cache.seed("MIT", "massachusetts institute of technology");
        assert_eq!(cache.resolve("mit"), "massachusetts institute of technology");
    }

    #[test]
    fn test_seed_writes_single_entry() {
        let mut cache = SimilarityCache::new();
        cache.seed("MIT", "Massachusetts Institute of Technology");
        assert_eq!(cache.size(), 1);
        assert!(!cache.contains_key("massachusetts institute of technology"));

        // the canonical form is not a key, so a near miss opens its own cluster
        assert_eq!(
            cache.resolve("massachusetts institute of technolog"),
            "massachusetts institute of technolog"
        );
        assert_eq!(cache.size(), 2);
    }

    #[test]
    fn test_seed_respects_threshold() {
        let mut cache = SimilarityCache::new();
        cache.seed("MIT", "massachusetts institute of technology");
        assert_eq!(
            cache.resolve_with("mit", threshold(0.9)),
            "massachusetts institute of technology"
        );
        // "mitt" is 0.75 similar to "mit"
        assert_eq!(cache.resolve_with("mitt", threshold(0.9)), "mitt");
    }

    #[test]
    fn test_entries_in_insertion_order() {
        let mut cache = SimilarityCache::new();
        for s in ["oxford", "cambridge", "harvard"] {
            cache.resolve(s);
        }
        let keys: Vec<&str> = cache.entries().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["oxford", "cambridge", "harvard"]);
    }

    #[test]
    fn test_custom_metric() {
        let mut cache = SimilarityCache::with_metric(JaroWinkler).with_threshold(threshold(0.85));
        cache.resolve("hello");
        assert_eq!(cache.resolve("helloo"), "hello");
    }
}
