//! Prefs — display preferences owned by the user, with an explicit
//! load/save contract.
//!
//! The core never reads these from ambient state; they are loaded once at
//! the process boundary and passed into formatting.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::load::env_parse;
use super::model::ConfigError;
use crate::query::DEFAULT_PAGE_SIZE;
use crate::time::local_timezone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// IANA timezone used for human-readable timestamps
    pub timezone: String,
    pub human_readable: bool,
    pub theme: Theme,
    pub page_size: usize,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            human_readable: true,
            theme: Theme::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Preferences {
    /// First-run preferences: defaults in the process-local timezone.
    pub fn initial() -> Self {
        Self {
            timezone: local_timezone().unwrap_or_else(|| "UTC".to_string()),
            ..Self::default()
        }
    }

    /// Load preferences from `path`; a missing file yields [`Preferences::initial`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "No saved preferences, using initial values");
            return Ok(Self::initial());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let prefs: Preferences = toml::from_str(&contents).map_err(|source| ConfigError::Decode {
            path: path.display().to_string(),
            source,
        })?;
        prefs.validate()?;
        Ok(prefs)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), "Saved preferences");
        Ok(())
    }

    /// Environment overrides: `VIEWER_TIMEZONE`, `VIEWER_HUMAN_READABLE`,
    /// `VIEWER_PAGE_SIZE`.
    pub fn apply_env(&mut self) {
        if let Ok(tz) = std::env::var("VIEWER_TIMEZONE") {
            if !tz.is_empty() {
                self.timezone = tz;
            }
        }
        if let Some(human_readable) = env_parse("VIEWER_HUMAN_READABLE") {
            self.human_readable = human_readable;
        }
        if let Some(page_size) = env_parse::<usize>("VIEWER_PAGE_SIZE") {
            if page_size > 0 {
                self.page_size = page_size;
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be > 0".to_string()));
        }
        Ok(())
    }
}
