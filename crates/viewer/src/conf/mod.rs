//! Conf module — viewer configuration, inference tunables and display
//! preferences.

pub mod model;
pub mod load;
pub mod prefs;

pub use model::{ConfigError, InferenceConfig, ViewerConfig};
pub use prefs::{Preferences, Theme};
