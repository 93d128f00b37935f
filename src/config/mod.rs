//! Configuration
//!
//! `AppConfig` holds process-level settings (fetch concurrency, default manifest
//! name, base location for relative identifiers, logging) and is layered from
//! defaults, an optional file and `STATICDIFF__*` environment variables.
//! `ComparisonParams` holds the per-comparison parameters.

pub mod facade;
pub mod params;
pub mod sources;

pub use facade::ConfigLoader;
pub use params::ComparisonParams;

use crate::error::ApiError;
use crate::logging::{init_logging, LoggingConfig};
use crate::types::{DEFAULT_MANIFEST_FILE, DEFAULT_MAX_CONCURRENT_FETCHES};
use serde::{Deserialize, Serialize};
use url::Url;

fn default_max_concurrent() -> usize {
    DEFAULT_MAX_CONCURRENT_FETCHES
}

fn default_manifest_file() -> String {
    DEFAULT_MANIFEST_FILE.to_string()
}

/// Content fetch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Maximum number of content fetches in flight across the whole file list
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
        }
    }
}

/// Top-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Manifest file name used when a comparison does not override it
    #[serde(default = "default_manifest_file")]
    pub manifest_file: String,

    /// Base location for identifiers that are not absolute URLs
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            manifest_file: default_manifest_file(),
            base_url: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.fetch.max_concurrent == 0 {
            return Err(ApiError::ConfigError(
                "fetch.max_concurrent must be at least 1".to_string(),
            ));
        }
        if self.manifest_file.is_empty() {
            return Err(ApiError::ConfigError(
                "manifest_file must not be empty".to_string(),
            ));
        }
        self.base()?;
        Ok(())
    }

    /// Install the global tracing subscriber described by `logging`.
    ///
    /// Call once per process, before starting a session.
    pub fn init_logging(&self) -> Result<(), ApiError> {
        init_logging(Some(&self.logging))
    }

    /// Parsed `base_url`, if configured
    pub fn base(&self) -> Result<Option<Url>, ApiError> {
        self.base_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw).map_err(|e| {
                    ApiError::ConfigError(format!("Invalid base_url {}: {}", raw, e))
                })
            })
            .transpose()
    }
}
