//! Directory trees and their diffs
//!
//! Manifests are turned into directory trees, two trees are diffed into a
//! pruned diff tree, and the diff tree is flattened into display order. All of
//! it is synchronous and pure.

pub mod builder;
pub mod diff;
pub mod flatten;
pub mod node;

pub use builder::build_tree;
pub use diff::{
    diff_trees, DiffDirectory, DiffFile, DiffNode, FileChange, FileStatus, ROOT_ENTRY_NAME,
};
pub use flatten::flatten_diff;
pub use node::{DirectoryTree, TreeEntry};
