//! StaticDiff: Hierarchical Manifest Comparison
//!
//! Compares two file sets described by hash manifests, produces a pruned
//! directory-tree diff and its flattened display order, and lazily retrieves
//! and line-diffs the changed files under a bounded number of concurrent
//! fetches.

pub mod config;
pub mod difflist;
pub mod error;
pub mod fetch;
pub mod linediff;
pub mod logging;
pub mod manifest;
pub mod render;
pub mod selection;
pub mod session;
pub mod tree;
pub mod types;

pub use error::ApiError;
pub use session::{Comparison, Session};
