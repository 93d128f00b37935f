//! Plain-text rendering of diff trees and file panes.

use crate::difflist::Presenter;
use crate::error::{ApiError, FetchError};
use crate::linediff::{Segment, SegmentKind};
use crate::tree::{DiffDirectory, DiffFile, DiffNode, FileStatus};
use crate::types::Uid;
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::collections::BTreeMap;

fn prefix(kind: SegmentKind) -> &'static str {
    match kind {
        SegmentKind::Added => "+ ",
        SegmentKind::Removed => "- ",
        SegmentKind::Same => "  ",
    }
}

/// Render one segment, prefixing every line with its marker
pub fn format_segment(segment: &Segment, color: bool) -> String {
    let marker = prefix(segment.kind);
    let text = format!(
        "{}{}",
        marker,
        segment.text.replace('\n', &format!("\n{}", marker))
    );
    if !color {
        return text;
    }
    match segment.kind {
        SegmentKind::Added => text.green().to_string(),
        SegmentKind::Removed => text.red().to_string(),
        SegmentKind::Same => text,
    }
}

/// Render a file pane: header line followed by its segments
pub fn format_pane(title: &str, segments: &[Segment], color: bool) -> String {
    let mut out = if color {
        format!("{}\n", title.bold())
    } else {
        format!("{}\n", title)
    };
    for segment in segments {
        out.push_str(&format_segment(segment, color));
        out.push('\n');
    }
    out
}

fn status_marker(status: FileStatus) -> &'static str {
    match status {
        FileStatus::Added => "+",
        FileStatus::Removed => "-",
        FileStatus::Modified => "~",
    }
}

/// Indented outline of a diff tree, directories first-class with a trailing `/`
pub fn format_diff_tree(root: &DiffDirectory, color: bool) -> String {
    let mut out = String::new();
    for child in &root.children {
        outline(child, 0, color, &mut out);
    }
    out
}

fn outline(node: &DiffNode, depth: usize, color: bool, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        DiffNode::File(file) => {
            let line = format!("{} {}", status_marker(file.status()), file.entry_name);
            let line = match (color, file.status()) {
                (true, FileStatus::Added) => line.green().to_string(),
                (true, FileStatus::Removed) => line.red().to_string(),
                _ => line,
            };
            out.push_str(&format!("{}{}\n", indent, line));
        }
        DiffNode::Directory(dir) => {
            out.push_str(&format!("{}{}/\n", indent, dir.entry_name));
            for child in &dir.children {
                outline(child, depth + 1, color, out);
            }
        }
    }
}

/// JSON export of a diff tree for a rendering front end
pub fn diff_tree_json(root: &DiffDirectory) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(root)?)
}

/// Presenter that keeps rendered panes in memory
#[derive(Debug, Default)]
pub struct TextPresenter {
    color: bool,
    panes: Mutex<BTreeMap<Uid, String>>,
    failures: Mutex<BTreeMap<Uid, String>>,
    scrolls: Mutex<Vec<Uid>>,
}

impl TextPresenter {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn pane(&self, uid: &str) -> Option<String> {
        self.panes.lock().get(uid).cloned()
    }

    pub fn failure(&self, uid: &str) -> Option<String> {
        self.failures.lock().get(uid).cloned()
    }

    /// Uids scrolled to, in order
    pub fn scrolls(&self) -> Vec<Uid> {
        self.scrolls.lock().clone()
    }

    pub fn ready_count(&self) -> usize {
        self.panes.lock().len()
    }
}

impl Presenter for TextPresenter {
    fn file_ready(&self, file: &DiffFile, segments: &[Segment]) {
        let text = format_pane(&file.entry_name, segments, self.color);
        self.panes.lock().insert(file.uid.clone(), text);
    }

    fn file_failed(&self, file: &DiffFile, error: &FetchError) {
        self.failures
            .lock()
            .insert(file.uid.clone(), error.to_string());
    }

    fn scroll_to(&self, file: &DiffFile) {
        self.scrolls.lock().push(file.uid.clone());
    }
}
