//! Directory tree node types

use crate::manifest::FileDescriptor;
use std::collections::BTreeMap;

/// A child of a directory: either a file or a nested directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEntry {
    File(FileDescriptor),
    Directory(DirectoryTree),
}

impl TreeEntry {
    pub fn is_directory(&self) -> bool {
        matches!(self, TreeEntry::Directory(_))
    }
}

/// Directory node keyed by path segment. The root has no name of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryTree {
    pub entries: BTreeMap<String, TreeEntry>,
}

impl DirectoryTree {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, segment: &str) -> Option<&TreeEntry> {
        self.entries.get(segment)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of files anywhere below this directory
    pub fn file_count(&self) -> usize {
        self.entries
            .values()
            .map(|entry| match entry {
                TreeEntry::File(_) => 1,
                TreeEntry::Directory(dir) => dir.file_count(),
            })
            .sum()
    }
}
