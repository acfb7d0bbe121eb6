//! Model — ViewerConfig and related structs.

use std::collections::BTreeMap;
use std::io;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::SortOrder;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to encode TOML: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// NDJSON file to load
    pub input_path: Option<String>,
    /// Page to print (1-based)
    pub page_number: usize,
    /// Where display preferences are loaded from and saved to
    pub preferences_path: String,
    /// Initial sort column
    pub sort_by: Option<String>,
    pub descending: bool,
    /// Initial per-column substring filters
    pub filters: BTreeMap<String, String>,
    pub inference: InferenceConfig,
}

/// Heuristic constants of schema inference. None of the exact values are
/// load-bearing for correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Deepest nested path, in segments
    pub max_depth: usize,
    /// Leading records sampled per column
    pub sample_records: usize,
    /// Sample values collected per column
    pub sample_values: usize,
    /// Sample values inspected by the value-shape rules
    pub inspected_values: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            input_path: None,
            page_number: 1,
            preferences_path: "viewer-prefs.toml".to_string(),
            sort_by: None,
            descending: false,
            filters: BTreeMap::new(),
            inference: InferenceConfig::default(),
        }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            sample_records: 10,
            sample_values: 10,
            inspected_values: 3,
        }
    }
}

impl ViewerConfig {
    /// Initial sort order requested by the configuration.
    pub fn sort_order(&self) -> SortOrder {
        match (&self.sort_by, self.descending) {
            (Some(column), false) => SortOrder::ascending(column.as_str()),
            (Some(column), true) => SortOrder::descending(column.as_str()),
            (None, _) => SortOrder::none(),
        }
    }
}

impl InferenceConfig {
    /// Validate inference tunables
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("inference.max_depth must be > 0".to_string()));
        }
        if self.sample_records == 0 {
            return Err(ConfigError::Invalid("inference.sample_records must be > 0".to_string()));
        }
        if self.sample_values == 0 {
            return Err(ConfigError::Invalid("inference.sample_values must be > 0".to_string()));
        }
        if self.inspected_values == 0 {
            return Err(ConfigError::Invalid("inference.inspected_values must be > 0".to_string()));
        }
        Ok(())
    }
}
