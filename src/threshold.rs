use crate::error::{DedupError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minimum similarity for a string to join an existing cluster.
///
/// Always within `[0, 1]`; out-of-range and NaN values cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Threshold(f64);

impl Threshold {
    pub const DEFAULT: Threshold = Threshold(0.7);

    pub fn new(value: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(DedupError::InvalidThreshold(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_met_by(self, score: f64) -> bool {
        score >= self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for Threshold {
    type Error = DedupError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Threshold> for f64 {
    fn from(t: Threshold) -> f64 {
        t.0
    }
}

impl FromStr for Threshold {
    type Err = DedupError;

    fn from_str(s: &str) -> Result<Self> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| DedupError::InvalidThreshold(s.to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
