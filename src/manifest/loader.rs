//! Manifest retrieval: resolve a comparison target to a location, fetch its
//! manifest and parse it.

use super::{Manifest, ManifestSource};
use crate::error::ApiError;
use crate::fetch::Retriever;
use tracing::{debug, info};
use url::Url;

/// Resolve a comparison identifier to a directory location (trailing `/`).
///
/// Absolute URLs are used as-is. Anything else is joined onto `base` when one
/// is configured, or treated as a filesystem path relative to the current
/// directory.
pub fn resolve_identifier(identifier: &str, base: Option<&Url>) -> Result<Url, ApiError> {
    let mut url = match Url::parse(identifier) {
        Ok(url) if url.scheme().len() > 1 => url,
        _ => match base {
            Some(base) => base.join(identifier).map_err(|e| {
                ApiError::ConfigError(format!(
                    "Cannot resolve {} against {}: {}",
                    identifier, base, e
                ))
            })?,
            None => {
                let path = std::path::Path::new(identifier);
                let absolute = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    std::env::current_dir()
                        .map_err(|e| {
                            ApiError::ConfigError(format!(
                                "Failed to determine current directory: {}",
                                e
                            ))
                        })?
                        .join(path)
                };
                Url::from_directory_path(&absolute).map_err(|_| {
                    ApiError::ConfigError(format!(
                        "Cannot use {} as a comparison target",
                        absolute.display()
                    ))
                })?
            }
        },
    };

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Fetch and parse the manifest for one side of a comparison
pub async fn load_manifest(
    retriever: &dyn Retriever,
    identifier: &str,
    base: Option<&Url>,
    manifest_file: &str,
    name: Option<&str>,
) -> Result<Manifest, ApiError> {
    let directory = resolve_identifier(identifier, base)?;
    let manifest_location = directory.join(manifest_file).map_err(|e| {
        ApiError::ConfigError(format!(
            "Invalid manifest file name {}: {}",
            manifest_file, e
        ))
    })?;

    debug!(location = %manifest_location, "Fetching manifest");
    let retrieved = retriever.retrieve(&manifest_location).await?;

    let manifest = Manifest::parse(
        &retrieved.body,
        ManifestSource {
            identifier,
            manifest_file,
            location: &retrieved.location,
        },
        name,
    )?;

    info!(
        name = %manifest.name,
        files = manifest.files.len(),
        location = %retrieved.location,
        "Loaded manifest"
    );
    Ok(manifest)
}
