//! Core types shared across the manifest, tree and fetch layers.

/// Uid: URL-safe encoding of a file's display path, unique within one manifest
pub type Uid = String;

/// ContentHash: opaque content hash as written in a manifest
pub type ContentHash = String;

/// Default manifest file name looked up under each comparison target
pub const DEFAULT_MANIFEST_FILE: &str = "MANIFEST";

/// Default number of content fetches allowed in flight at once
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 2;
