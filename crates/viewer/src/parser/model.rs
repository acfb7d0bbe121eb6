use std::io;
use thiserror::Error;
use serde::Serialize;
use serde_json::Value;

/// One parsed line of the source file.
///
/// Records are arbitrary JSON values; only objects carry columns. A loaded
/// collection is never mutated in place, it is replaced wholesale.
pub type Record = Value;

#[derive(Debug, Error)]
pub enum LoadError {
    /// A non-blank line is not valid JSON. Nothing from the load is kept.
    #[error("Failed to parse {source_name}: line {line} is not valid JSON: {message}")]
    ParseFailure {
        source_name: String,
        line: usize,
        message: String,
    },

    /// The underlying file could not be read.
    #[error("Failed to read {source_name}: {source}")]
    ReadFailure {
        source_name: String,
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    pub fn source_name(&self) -> &str {
        match self {
            LoadError::ParseFailure { source_name, .. } => source_name,
            LoadError::ReadFailure { source_name, .. } => source_name,
        }
    }
}

/// Counters collected while loading a single source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    /// Physical lines in the input, blank ones included
    pub lines: usize,
    pub blank_lines: usize,
    pub records: usize,
    /// Records that are JSON objects (the only ones carrying columns)
    pub object_records: usize,
    pub bytes: usize,
}
