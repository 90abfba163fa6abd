//! Run configuration, assembled from CLI arguments and the environment.

use crate::error::{DedupError, Result};
use crate::ingestion::DEFAULT_FIELD;
use crate::similarity::Metric;
use crate::threshold::Threshold;
use serde::Serialize;
use std::path::PathBuf;

/// Environment variable consulted when no threshold is given on the command line
pub const THRESHOLD_ENV: &str = "AFFILIATION_THRESHOLD";

#[derive(Debug, Clone, Serialize)]
pub struct DedupConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub threshold: Threshold,
    pub metric: Metric,
    /// JSON field holding the affiliation
    pub field: String,
    pub seed_file: Option<PathBuf>,
    /// Where to write the final cache entries as JSON
    pub dump_cache: Option<PathBuf>,
}

impl DedupConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            threshold: Threshold::DEFAULT,
            metric: Metric::default(),
            field: DEFAULT_FIELD.to_string(),
            seed_file: None,
            dump_cache: None,
        }
    }

    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    pub fn with_seed_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.seed_file = Some(path.into());
        self
    }

    pub fn with_dump_cache(mut self, path: impl Into<PathBuf>) -> Self {
        self.dump_cache = Some(path.into());
        self
    }

    /// Checks that must pass before any input is read.
    pub fn validate(&self) -> Result<()> {
        if self.input == self.output {
            return Err(DedupError::Config(format!(
                "input and output are the same file: {}",
                self.input.display()
            )));
        }
        if self.field.trim().is_empty() {
            return Err(DedupError::Config("field name must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Pick the threshold: explicit argument, then environment, then the default.
pub fn resolve_threshold(arg: Option<&str>, env: Option<&str>) -> Result<Threshold> {
    match arg.or(env) {
        Some(raw) => raw.parse(),
        None => Ok(Threshold::DEFAULT),
    }
}
