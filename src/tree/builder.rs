//! Tree Builder: flat file descriptors to a directory tree.

use super::node::{DirectoryTree, TreeEntry};
use crate::error::TreeError;
use crate::manifest::FileDescriptor;
use tracing::debug;

/// Build a directory tree from a flat list of files.
///
/// A leading `.` segment is dropped. A later descriptor at the same path
/// replaces the earlier one.
pub fn build_tree(files: &[FileDescriptor]) -> Result<DirectoryTree, TreeError> {
    let mut root = DirectoryTree::empty();

    for file in files {
        let mut segments: Vec<&str> = file.display_path.split('/').collect();
        if segments.len() > 1 && segments[0] == "." {
            segments.remove(0);
        }
        // `split` always yields at least one segment
        let Some((leaf, parents)) = segments.split_last() else {
            continue;
        };

        let mut dir = &mut root;
        for segment in parents {
            let entry = dir
                .entries
                .entry((*segment).to_string())
                .or_insert_with(|| TreeEntry::Directory(DirectoryTree::empty()));
            dir = match entry {
                TreeEntry::Directory(next) => next,
                TreeEntry::File(_) => {
                    return Err(TreeError::StructureConflict {
                        path: file.display_path.clone(),
                    })
                }
            };
        }

        if let Some(previous) = dir
            .entries
            .insert((*leaf).to_string(), TreeEntry::File(file.clone()))
        {
            debug!(
                path = %file.display_path,
                replaced_directory = previous.is_directory(),
                "Replaced existing tree entry"
            );
        }
    }

    debug!(files = root.file_count(), "Built directory tree");
    Ok(root)
}
