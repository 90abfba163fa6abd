//! String similarity strategies used by the cache.
//!
//! Scores are in `[0, 1]`, 1.0 meaning identical.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strsim::{jaro_winkler, normalized_levenshtein};

/// A similarity metric over normalized strings.
pub trait StringSimilarity {
    /// Similarity score in `[0, 1]`.
    fn similarity(&self, a: &str, b: &str) -> f64;

    /// Cheap upper bound on `similarity(a, b)`.
    ///
    /// The cache skips a candidate when the bound is below the threshold, so
    /// an implementation must never return less than the real score.
    fn upper_bound(&self, _a: &str, _b: &str) -> f64 {
        1.0
    }
}

/// Levenshtein distance normalized by the longer string's length (in chars).
///
/// Two empty strings score 1.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Levenshtein;

impl StringSimilarity for Levenshtein {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        normalized_levenshtein(a, b)
    }

    // Edit distance is at least the length difference.
    fn upper_bound(&self, a: &str, b: &str) -> f64 {
        let len_a = a.chars().count();
        let len_b = b.chars().count();
        let max_len = len_a.max(len_b);
        if max_len == 0 {
            return 1.0;
        }
        1.0 - (len_a.abs_diff(len_b) as f64 / max_len as f64)
    }
}

/// Jaro-Winkler similarity, favouring strings sharing a prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinkler;

impl StringSimilarity for JaroWinkler {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        if a.is_empty() && b.is_empty() {
            return 1.0;
        }
        jaro_winkler(a, b)
    }
}

/// Runtime-selectable metric, used by the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    #[default]
    Levenshtein,
    JaroWinkler,
}

impl StringSimilarity for Metric {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        match self {
            Metric::Levenshtein => Levenshtein.similarity(a, b),
            Metric::JaroWinkler => JaroWinkler.similarity(a, b),
        }
    }

    fn upper_bound(&self, a: &str, b: &str) -> f64 {
        match self {
            Metric::Levenshtein => Levenshtein.upper_bound(a, b),
            Metric::JaroWinkler => JaroWinkler.upper_bound(a, b),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Levenshtein => write!(f, "levenshtein"),
            Metric::JaroWinkler => write!(f, "jaro-winkler"),
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "levenshtein" => Ok(Metric::Levenshtein),
            "jaro-winkler" | "jaro_winkler" | "jarowinkler" => Ok(Metric::JaroWinkler),
            other => Err(format!(
                "unknown metric '{}' (expected levenshtein or jaro-winkler)",
                other
            )),
        }
    }
}
