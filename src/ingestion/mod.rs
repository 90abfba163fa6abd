//! Ingestion Module
//!
//! Sources of raw affiliation strings and seed mappings. Every source is read
//! in full before processing starts, so a bad record aborts the run before any
//! output exists.

pub mod connector;
pub mod jsonl_connector;
pub mod seed_connector;

pub use connector::{IngestionConnector, MemoryConnector, RawRecord};
pub use jsonl_connector::{JsonlConnector, DEFAULT_FIELD};
pub use seed_connector::{load_seed_mappings, read_seed_mappings, SeedMapping};
