//! Two-column CSV output of (original, canonical) pairs.

use crate::error::{DedupError, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const HEADERS: [&str; 2] = ["original_affiliation", "normalized_affiliation"];

/// One output row. A null original is written as an empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AffiliationRecord {
    pub original_affiliation: Option<String>,
    pub normalized_affiliation: String,
}

/// Write the header and every record, in order.
pub fn write_records<W: Write>(writer: W, records: &[AffiliationRecord]) -> Result<()> {
    // Header written by hand so an empty batch still gets one
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(HEADERS)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write to a hidden sibling file, then rename it over `path`.
///
/// A failure part-way through removes the sibling and leaves `path` untouched.
pub fn write_csv(path: &Path, records: &[AffiliationRecord]) -> Result<()> {
    let tmp = staging_path(path)?;
    let written = File::create(&tmp)
        .map_err(DedupError::from)
        .and_then(|file| write_records(file, records))
        .and_then(|()| fs::rename(&tmp, path).map_err(DedupError::from));

    if written.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    written
}

fn staging_path(path: &Path) -> Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        DedupError::Config(format!("output path has no file name: {}", path.display()))
    })?;
    Ok(path.with_file_name(format!(".{}.tmp", name.to_string_lossy())))
}
