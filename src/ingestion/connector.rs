//! Ingestion Connector Trait - Abstract interface for affiliation sources

use crate::error::Result;

/// One input record, positioned within its source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based index among non-blank records
    pub record: usize,

    /// 1-based physical line (or row) in the source
    pub line: usize,

    /// Raw affiliation; `None` when null or missing
    pub affiliation: Option<String>,
}

/// Ingestion Connector Trait
///
/// Implementations:
/// - JsonlConnector: line-delimited JSON files
/// - MemoryConnector: in-memory values (tests, embedding)
///
/// `fetch` returns the whole batch or fails; no partial batches.
pub trait IngestionConnector {
    /// Fetch every record of the source, in order
    fn fetch(&mut self) -> Result<Vec<RawRecord>>;

    /// Get source ID (unique identifier)
    fn source_id(&self) -> &str;

    /// Get source type (e.g., "jsonl", "memory")
    fn source_type(&self) -> &str;
}

/// Memory Connector - Wraps already-extracted affiliation values
pub struct MemoryConnector {
    source_id: String,
    values: Vec<Option<String>>,
    consumed: bool,
}

impl MemoryConnector {
    pub fn new(source_id: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            source_id: source_id.into(),
            values,
            consumed: false,
        }
    }

    /// Build from plain strings, none of them null
    pub fn from_strings<I, T>(source_id: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::new(source_id, values.into_iter().map(|v| Some(v.into())).collect())
    }
}

impl IngestionConnector for MemoryConnector {
    fn fetch(&mut self) -> Result<Vec<RawRecord>> {
        if self.consumed {
            return Ok(vec![]);
        }

        self.consumed = true;
        Ok(self
            .values
            .iter()
            .enumerate()
            .map(|(idx, value)| RawRecord {
                record: idx + 1,
                line: idx + 1,
                affiliation: value.clone(),
            })
            .collect())
    }

    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn source_type(&self) -> &str {
        "memory"
    }
}
