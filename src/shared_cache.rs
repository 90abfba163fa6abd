//! Thread-safe handle around [`SimilarityCache`].
//!
//! The lock is held across the whole scan-then-insert of `resolve`, so two
//! near-duplicates submitted at the same time cannot both open a cluster.

use crate::cache::{CacheEntry, SimilarityCache};
use crate::similarity::{Levenshtein, StringSimilarity};
use crate::threshold::Threshold;
use std::sync::{Arc, Mutex, MutexGuard};

pub struct SharedSimilarityCache<S = Levenshtein> {
    inner: Arc<Mutex<SimilarityCache<S>>>,
}

impl<S> Clone for SharedSimilarityCache<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: StringSimilarity> SharedSimilarityCache<S> {
    pub fn new(cache: SimilarityCache<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    // A panic mid-resolve leaves at most one fully inserted entry behind,
    // so a poisoned cache is still consistent.
    fn lock(&self) -> MutexGuard<'_, SimilarityCache<S>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn resolve(&self, normalized: &str) -> String {
        self.lock().resolve(normalized)
    }

    pub fn resolve_with(&self, normalized: &str, threshold: Threshold) -> String {
        self.lock().resolve_with(normalized, threshold)
    }

    pub fn seed(&self, original: &str, canonical: &str) {
        self.lock().seed(original, canonical);
    }

    pub fn size(&self) -> usize {
        self.lock().size()
    }

    /// Copy of the entries at the time of the call.
    pub fn snapshot(&self) -> Vec<CacheEntry> {
        self.lock().entries().to_vec()
    }
}

impl Default for SharedSimilarityCache<Levenshtein> {
    fn default() -> Self {
        Self::new(SimilarityCache::new())
    }
}
