//! Load — config loading from file and environment variables.

use std::fs;
use std::path::Path;

use super::model::{ConfigError, InferenceConfig, ViewerConfig};

impl ViewerConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = std::env::var("VIEWER_CONFIG_FILE")
            .unwrap_or_else(|_| "viewer.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::info!("Config file not found at {}, using environment variables", config_path);
            Self::from_env()
        };

        // Environment variables override file config
        if let Ok(input) = std::env::var("VIEWER_INPUT") {
            config.input_path = Some(input);
        }
        if let Some(page) = env_parse("VIEWER_PAGE") {
            config.page_number = page;
        }
        if let Ok(prefs) = std::env::var("VIEWER_PREFERENCES") {
            config.preferences_path = prefs;
        }
        if let Ok(sort_by) = std::env::var("VIEWER_SORT_BY") {
            config.sort_by = Some(sort_by).filter(|s| !s.is_empty());
        }
        if let Some(descending) = env_parse("VIEWER_DESCENDING") {
            config.descending = descending;
        }
        if let Some(depth) = env_parse("VIEWER_MAX_DEPTH") {
            config.inference.max_depth = depth;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Decode {
            path: path.to_string(),
            source,
        })
    }

    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            input_path: std::env::var("VIEWER_INPUT").ok(),
            page_number: env_parse("VIEWER_PAGE").unwrap_or(defaults.page_number),
            preferences_path: std::env::var("VIEWER_PREFERENCES")
                .unwrap_or(defaults.preferences_path),
            sort_by: std::env::var("VIEWER_SORT_BY").ok().filter(|s| !s.is_empty()),
            descending: env_parse("VIEWER_DESCENDING").unwrap_or(false),
            filters: defaults.filters,
            inference: InferenceConfig::from_env(),
        }
    }

    /// Validate that configuration values are sane
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_number == 0 {
            return Err(ConfigError::Invalid("page_number must be >= 1".to_string()));
        }
        if self.preferences_path.is_empty() {
            return Err(ConfigError::Invalid("preferences_path must not be empty".to_string()));
        }
        self.inference.validate()
    }
}

impl InferenceConfig {
    /// Load inference tunables from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_depth: env_parse("VIEWER_MAX_DEPTH").unwrap_or(defaults.max_depth),
            sample_records: env_parse("VIEWER_SAMPLE_RECORDS").unwrap_or(defaults.sample_records),
            sample_values: env_parse("VIEWER_SAMPLE_VALUES").unwrap_or(defaults.sample_values),
            inspected_values: env_parse("VIEWER_INSPECTED_VALUES")
                .unwrap_or(defaults.inspected_values),
        }
    }
}

pub(crate) fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.trim().parse().ok())
}
