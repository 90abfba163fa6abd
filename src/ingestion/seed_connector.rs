//! Seed mappings - Known synonyms loaded from CSV before any resolution

use crate::error::{DedupError, Result};
use crate::normalizer::normalize;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One `original -> canonical` pair to force into the cache.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SeedMapping {
    pub original: String,
    pub canonical: String,
}

impl SeedMapping {
    pub fn new(original: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            canonical: canonical.into(),
        }
    }
}

/// Read seed mappings from a CSV with header `original,canonical`.
///
/// A row whose original or canonical normalizes to an empty string is
/// rejected.
pub fn read_seed_mappings<R: Read>(reader: R) -> Result<Vec<SeedMapping>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut out = Vec::new();
    for (idx, result) in rdr.deserialize::<SeedMapping>().enumerate() {
        let mapping = result.map_err(|e| {
            DedupError::InvalidSeed(format!("row {}: {}", idx + 1, e))
        })?;
        if normalize(&mapping.original).is_empty() {
            return Err(DedupError::InvalidSeed(format!(
                "row {}: original '{}' normalizes to an empty string",
                idx + 1,
                mapping.original
            )));
        }
        if normalize(&mapping.canonical).is_empty() {
            return Err(DedupError::InvalidSeed(format!(
                "row {}: canonical form for '{}' normalizes to an empty string",
                idx + 1,
                mapping.original
            )));
        }
        out.push(mapping);
    }

    Ok(out)
}

pub fn load_seed_mappings(path: &Path) -> Result<Vec<SeedMapping>> {
    let file = File::open(path)?;
    read_seed_mappings(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_seed_mappings() {
        let csv_text = "original,canonical\n\
                        MIT,massachusetts institute of technology\n\
                        \"Mass. Inst. of Tech\", massachusetts institute of technology\n";
        let mappings = read_seed_mappings(csv_text.as_bytes()).unwrap();

        assert_eq!(mappings.len(), 2);
        assert_eq!(
            mappings[0],
            SeedMapping::new("MIT", "massachusetts institute of technology")
        );
        assert_eq!(mappings[1].original, "Mass. Inst. of Tech");
        assert_eq!(mappings[1].canonical, "massachusetts institute of technology");
    }

    #[test]
    fn test_missing_column_is_rejected() {
        let csv_text = "original,canonical\nMIT\n";
        let err = read_seed_mappings(csv_text.as_bytes()).unwrap_err();
        assert!(matches!(err, DedupError::InvalidSeed(ref msg) if msg.starts_with("row 1")));
    }

    #[test]
    fn test_empty_sides_are_rejected() {
        let csv_text = "original,canonical
MIT,massachusetts institute of technology
...,nothing
";
        let err = read_seed_mappings(csv_text.as_bytes()).unwrap_err();
        assert!(matches!(err, DedupError::InvalidSeed(ref msg) if msg.starts_with("row 2")));

        let csv_text = "original,canonical
MIT,\" - \"
";
        let err = read_seed_mappings(csv_text.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("canonical form for 'MIT'"));
    }
}
