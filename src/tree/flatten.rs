//! Diff Flattener: diff tree to the ordered list of changed files.

use super::diff::{DiffDirectory, DiffFile, DiffNode};

/// Depth-first list of changed files with fully qualified entry names.
///
/// Follows the child order already imposed by the differ; the root
/// contributes no path segment.
pub fn flatten_diff(root: &DiffDirectory) -> Vec<DiffFile> {
    let mut out = Vec::new();
    let mut prefix: Vec<&str> = Vec::new();
    for child in &root.children {
        collect(child, &mut prefix, &mut out);
    }
    out
}

fn collect<'a>(node: &'a DiffNode, prefix: &mut Vec<&'a str>, out: &mut Vec<DiffFile>) {
    match node {
        DiffNode::File(file) => {
            let mut path = prefix.join("/");
            if !path.is_empty() {
                path.push('/');
            }
            path.push_str(&file.entry_name);
            out.push(DiffFile {
                entry_name: path,
                ..file.clone()
            });
        }
        DiffNode::Directory(dir) => {
            prefix.push(&dir.entry_name);
            for child in &dir.children {
                collect(child, prefix, out);
            }
            prefix.pop();
        }
    }
}
