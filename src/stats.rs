use serde::Serialize;
use std::fmt;

/// Summary of one deduplication batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DedupStats {
    /// Records processed, including null and empty ones
    pub total_records: usize,
    /// Cache size after the batch
    pub unique_values: usize,
}

impl DedupStats {
    pub fn new(total_records: usize, unique_values: usize) -> Self {
        Self {
            total_records,
            unique_values,
        }
    }

    /// `1 - unique / total`, or 0 for an empty batch.
    ///
    /// Seeded entries count towards `unique_values`, so this can go negative
    /// on small batches.
    pub fn reduction_ratio(&self) -> f64 {
        if self.total_records == 0 {
            return 0.0;
        }
        1.0 - self.unique_values as f64 / self.total_records as f64
    }
}

impl fmt::Display for DedupStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of original strings: {}", self.total_records)?;
        writeln!(f, "Number of normalized values: {}", self.unique_values)?;
        write!(
            f,
            "Estimated reduction ratio: {:.2}%",
            self.reduction_ratio() * 100.0
        )
    }
}
