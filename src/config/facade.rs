//! ConfigLoader facade: composes sources and deserializes to AppConfig.

use super::sources::{environment, file};
use super::AppConfig;
use config::{Config, ConfigError};
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration.
    /// Precedence: serde defaults (lowest) -> config file -> environment (highest).
    /// An explicit `path` must exist.
    pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = file::add_to_builder(builder, path, true)?;
        }
        let builder = environment::add_to_builder(builder)?;

        builder.build()?.try_deserialize()
    }

    /// Create default configuration.
    pub fn default() -> AppConfig {
        AppConfig::default()
    }
}
