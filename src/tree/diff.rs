//! Tree Differ
//!
//! Structural comparison of two directory trees. Only changed files are
//! emitted; directories survive only when something below them changed.

use super::node::{DirectoryTree, TreeEntry};
use crate::manifest::FileDescriptor;
use crate::types::Uid;
use serde::Serialize;
use std::collections::BTreeSet;
use url::Url;

/// Entry name of the synthetic root directory
pub const ROOT_ENTRY_NAME: &str = "<root>";

/// Per-file change status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Removed,
    Modified,
}

/// What changed for one file, with the locations each side can be read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileChange {
    Added { right: Url },
    Removed { left: Url },
    Modified { left: Url, right: Url },
}

impl FileChange {
    pub fn status(&self) -> FileStatus {
        match self {
            FileChange::Added { .. } => FileStatus::Added,
            FileChange::Removed { .. } => FileStatus::Removed,
            FileChange::Modified { .. } => FileStatus::Modified,
        }
    }

    pub fn left_location(&self) -> Option<&Url> {
        match self {
            FileChange::Removed { left } | FileChange::Modified { left, .. } => Some(left),
            FileChange::Added { .. } => None,
        }
    }

    pub fn right_location(&self) -> Option<&Url> {
        match self {
            FileChange::Added { right } | FileChange::Modified { right, .. } => Some(right),
            FileChange::Removed { .. } => None,
        }
    }
}

/// A changed file.
///
/// `entry_name` is the directory-local name inside a diff tree, or the full
/// `/`-joined path once flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffFile {
    pub uid: Uid,
    pub entry_name: String,
    #[serde(flatten)]
    pub change: FileChange,
}

impl DiffFile {
    pub fn status(&self) -> FileStatus {
        self.change.status()
    }
}

/// A directory with at least one changed descendant (or the root)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffDirectory {
    pub entry_name: String,
    pub children: Vec<DiffNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DiffNode {
    File(DiffFile),
    #[serde(rename = "dir")]
    Directory(DiffDirectory),
}

impl DiffNode {
    pub fn entry_name(&self) -> &str {
        match self {
            DiffNode::File(file) => &file.entry_name,
            DiffNode::Directory(dir) => &dir.entry_name,
        }
    }
}

/// Diff two trees, returning the root of the diff tree
pub fn diff_trees(left: &DirectoryTree, right: &DirectoryTree) -> DiffDirectory {
    DiffDirectory {
        entry_name: ROOT_ENTRY_NAME.to_string(),
        children: diff_entries(left, right),
    }
}

fn diff_entries(left: &DirectoryTree, right: &DirectoryTree) -> Vec<DiffNode> {
    let names: BTreeSet<&String> = left.entries.keys().chain(right.entries.keys()).collect();
    let empty = DirectoryTree::empty();
    let mut children = Vec::new();

    for name in names {
        let l = left.get(name);
        let r = right.get(name);

        match (l, r) {
            (Some(TreeEntry::File(lf)), Some(TreeEntry::File(rf))) => {
                if lf.hash != rf.hash {
                    children.push(DiffNode::File(DiffFile {
                        uid: lf.uid.clone(),
                        entry_name: name.clone(),
                        change: FileChange::Modified {
                            left: lf.location.clone(),
                            right: rf.location.clone(),
                        },
                    }));
                }
            }
            (Some(TreeEntry::Directory(ld)), Some(TreeEntry::Directory(rd))) => {
                push_directory(&mut children, name, diff_entries(ld, rd));
            }
            _ => {
                // One-sided, or a file on one side and a directory on the other:
                // report the removal and the addition independently.
                match l {
                    Some(TreeEntry::File(lf)) => children.push(removed(name, lf)),
                    Some(TreeEntry::Directory(ld)) => {
                        push_directory(&mut children, name, diff_entries(ld, &empty))
                    }
                    None => {}
                }
                match r {
                    Some(TreeEntry::File(rf)) => children.push(added(name, rf)),
                    Some(TreeEntry::Directory(rd)) => {
                        push_directory(&mut children, name, diff_entries(&empty, rd))
                    }
                    None => {}
                }
            }
        }
    }

    // Stable: a removed entry keeps its place before an added one of the same name
    children.sort_by(|a, b| a.entry_name().cmp(b.entry_name()));
    children
}

fn push_directory(children: &mut Vec<DiffNode>, name: &str, sub: Vec<DiffNode>) {
    if !sub.is_empty() {
        children.push(DiffNode::Directory(DiffDirectory {
            entry_name: name.to_string(),
            children: sub,
        }));
    }
}

fn removed(name: &str, file: &FileDescriptor) -> DiffNode {
    DiffNode::File(DiffFile {
        uid: file.uid.clone(),
        entry_name: name.to_string(),
        change: FileChange::Removed {
            left: file.location.clone(),
        },
    })
}

fn added(name: &str, file: &FileDescriptor) -> DiffNode {
    DiffNode::File(DiffFile {
        uid: file.uid.clone(),
        entry_name: name.to_string(),
        change: FileChange::Added {
            right: file.location.clone(),
        },
    })
}
