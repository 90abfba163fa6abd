//! JSONL Connector - Reads one affiliation per JSON Lines record

use crate::error::{DedupError, Result};
use crate::ingestion::connector::{IngestionConnector, RawRecord};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Field read from each record unless overridden
pub const DEFAULT_FIELD: &str = "author_affiliation";

/// JSONL Connector - Parses line-delimited JSON objects.
///
/// Blank lines are skipped and are not counted as records. Any line that is
/// not a JSON object, or whose field is neither a string nor null, fails the
/// whole batch. Lines are decoded one at a time, so invalid UTF-8 is reported
/// against the line it occurs on.
pub struct JsonlConnector {
    source_id: String,
    jsonl_bytes: Vec<u8>,
    field: String,
    consumed: bool,
}

impl JsonlConnector {
    pub fn new(source_id: impl Into<String>, jsonl_text: impl Into<String>) -> Self {
        Self::from_bytes(source_id, jsonl_text.into().into_bytes())
    }

    pub fn from_bytes(source_id: impl Into<String>, jsonl_bytes: Vec<u8>) -> Self {
        Self {
            source_id: source_id.into(),
            jsonl_bytes,
            field: DEFAULT_FIELD.to_string(),
            consumed: false,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        Ok(Self::from_bytes(path.display().to_string(), bytes))
    }

    /// Read a different field than `author_affiliation`
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    fn parse_records(&self) -> Result<Vec<RawRecord>> {
        let mut out = Vec::new();

        for (line_idx, raw) in self.jsonl_bytes.split(|&b| b == b'\n').enumerate() {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            let record = out.len() + 1;

            let line = match std::str::from_utf8(raw) {
                Ok(line) => line,
                Err(e) => {
                    return Err(DedupError::MalformedRecord {
                        record,
                        line: line_idx + 1,
                        content: String::from_utf8_lossy(raw).into_owned(),
                        message: format!("invalid UTF-8: {}", e),
                    })
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            let malformed = |message: String| DedupError::MalformedRecord {
                record,
                line: line_idx + 1,
                content: line.to_string(),
                message,
            };

            let value: Value = serde_json::from_str(line).map_err(|e| malformed(e.to_string()))?;
            let affiliation = extract_field(&value, &self.field).map_err(malformed)?;

            out.push(RawRecord {
                record,
                line: line_idx + 1,
                affiliation,
            });
        }

        debug!(source = %self.source_id, records = out.len(), "parsed jsonl");
        Ok(out)
    }
}

fn extract_field(value: &Value, field: &str) -> std::result::Result<Option<String>, String> {
    let obj = value
        .as_object()
        .ok_or_else(|| "expected a JSON object".to_string())?;

    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(format!(
            "field '{}' must be a string or null, got {}",
            field, other
        )),
    }
}

impl IngestionConnector for JsonlConnector {
    fn fetch(&mut self) -> Result<Vec<RawRecord>> {
        if self.consumed {
            return Ok(vec![]);
        }

        let records = self.parse_records()?;
        self.consumed = true;
        Ok(records)
    }

    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn source_type(&self) -> &str {
        "jsonl"
    }
}
