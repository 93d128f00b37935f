//! Manifest Model
//!
//! A manifest is a plain-text list of `<hash><whitespace><relative-path>` records
//! describing one side of a comparison. Parsing turns it into typed file
//! descriptors whose content locations are resolved against the manifest's own
//! location.

pub mod loader;

pub use loader::{load_manifest, resolve_identifier};

use crate::error::ManifestError;
use crate::types::{ContentHash, Uid};
use serde::Serialize;
use url::Url;

/// One file listed in a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDescriptor {
    pub uid: Uid,
    pub display_path: String,
    pub hash: ContentHash,
    pub location: Url,
}

/// A parsed manifest: display name plus the files it lists
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub name: String,
    pub files: Vec<FileDescriptor>,
}

/// Where a manifest's text came from
#[derive(Debug, Clone, Copy)]
pub struct ManifestSource<'a> {
    /// Comparison target the manifest was requested for
    pub identifier: &'a str,
    /// Manifest file name; records naming it are skipped
    pub manifest_file: &'a str,
    /// Final location the text was retrieved from
    pub location: &'a Url,
}

impl ManifestSource<'_> {
    fn label(&self) -> String {
        format!(
            "{}/{}",
            self.identifier.trim_end_matches('/'),
            self.manifest_file
        )
    }
}

impl Manifest {
    /// Parse manifest text.
    ///
    /// `name` overrides the display name; otherwise the last segment of the
    /// identifier is used.
    pub fn parse(
        text: &str,
        source: ManifestSource<'_>,
        name: Option<&str>,
    ) -> Result<Self, ManifestError> {
        let name = match name {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => default_name(source.identifier),
        };
        Ok(Self {
            name,
            files: parse_records(text, source)?,
        })
    }
}

/// Last path segment of an identifier, ignoring trailing slashes
pub fn default_name(identifier: &str) -> String {
    identifier
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Parse every record of a manifest into file descriptors
pub fn parse_records(
    text: &str,
    source: ManifestSource<'_>,
) -> Result<Vec<FileDescriptor>, ManifestError> {
    let mut files = Vec::new();
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let (hash, path) = split_record(line);
        if path == source.manifest_file {
            continue;
        }
        if path.is_empty() {
            return Err(ManifestError::MissingPath {
                manifest: source.label(),
                line: line.to_string(),
            });
        }

        let location = source
            .location
            .join(path)
            .map_err(|e| ManifestError::InvalidLocation {
                path: path.to_string(),
                base: source.location.to_string(),
                message: e.to_string(),
            })?;

        files.push(FileDescriptor {
            uid: urlencoding::encode(path).into_owned(),
            display_path: path.to_string(),
            hash: hash.to_string(),
            location,
        });
    }
    Ok(files)
}

/// Split a trimmed record on its first whitespace run; strips one leading `./`
fn split_record(line: &str) -> (&str, &str) {
    let (hash, rest) = match line.split_once(char::is_whitespace) {
        Some((hash, rest)) => (hash, rest.trim_start()),
        None => (line, ""),
    };
    let path = rest.strip_prefix("./").unwrap_or(rest);
    (hash, path)
}
