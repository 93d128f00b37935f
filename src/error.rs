//! Error types
//!
//! Fatal errors (configuration, manifest parsing, tree structure) abort a whole
//! comparison. `FetchError` is scoped to a single file once the comparison is
//! running and only becomes fatal while loading a manifest.

use thiserror::Error;

/// Manifest parse errors
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Missing path in {manifest}: {line}")]
    MissingPath { manifest: String, line: String },

    #[error("Cannot resolve {path} against {base}: {message}")]
    InvalidLocation {
        path: String,
        base: String,
        message: String,
    },
}

/// Directory tree construction errors
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Conflict between file and directory while adding {path}")]
    StructureConflict { path: String },
}

/// Retrieval errors for manifests and file contents
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {location} failed: {message}")]
    Transport { location: String, message: String },

    #[error("Request to {location} returned status {status}")]
    Status { location: String, status: u16 },

    #[error("Failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Content at {location} is not valid UTF-8")]
    InvalidUtf8 { location: String },

    #[error("Unsupported location scheme: {location}")]
    UnsupportedScheme { location: String },

    #[error("Fetch task ended without producing a result")]
    Abandoned,
}

/// Crate-level error
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Missing parameter: {name}. Add #{name}=... to the comparison parameters")]
    MissingParameter { name: &'static str },

    #[error(
        "Nothing to compare. Append #l=/path/to/dir1&r=/path/to/dir2; \
         these directories should contain a {manifest_file} file"
    )]
    NoComparison { manifest_file: String },

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
