use thiserror::Error;

#[derive(Error, Debug)]
pub enum DedupError {
    #[error("Malformed record {record} (line {line}): {message}\nLine content: {content}")]
    MalformedRecord {
        record: usize,
        line: usize,
        content: String,
        message: String,
    },

    #[error("Invalid threshold: {0} (must be between 0 and 1)")]
    InvalidThreshold(String),

    #[error("Invalid seed mapping: {0}")]
    InvalidSeed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, DedupError>;
