pub mod cache;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod normalizer;
pub mod output;
pub mod pipeline;
pub mod shared_cache;
pub mod similarity;
pub mod stats;
pub mod threshold;

pub use cache::{CacheEntry, SimilarityCache};
pub use config::DedupConfig;
pub use error::{DedupError, Result};
pub use normalizer::{normalize, normalize_optional};
pub use output::AffiliationRecord;
pub use pipeline::{run, Deduplicator};
pub use shared_cache::SharedSimilarityCache;
pub use similarity::{JaroWinkler, Levenshtein, Metric, StringSimilarity};
pub use stats::DedupStats;
pub use threshold::Threshold;
