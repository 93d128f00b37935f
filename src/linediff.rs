//! Line-level diff of two text bodies, backed by `similar`.

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

/// Segment classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Added,
    Removed,
    Same,
}

/// A run of consecutive lines sharing one kind.
///
/// `text` has its final newline removed, so an interior empty line shows up
/// as an empty string between two `\n`s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

impl From<ChangeTag> for SegmentKind {
    fn from(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Insert => SegmentKind::Added,
            ChangeTag::Delete => SegmentKind::Removed,
            ChangeTag::Equal => SegmentKind::Same,
        }
    }
}

/// Diff `left` against `right` line by line
pub fn diff_lines(left: &str, right: &str) -> Vec<Segment> {
    let diff = TextDiff::from_lines(left, right);

    let mut runs: Vec<(SegmentKind, String)> = Vec::new();
    for change in diff.iter_all_changes() {
        let kind = SegmentKind::from(change.tag());
        match runs.last_mut() {
            Some((last, text)) if *last == kind => text.push_str(change.value()),
            _ => runs.push((kind, change.value().to_string())),
        }
    }

    runs.into_iter()
        .map(|(kind, mut text)| {
            if text.ends_with('\n') {
                text.pop();
            }
            Segment { kind, text }
        })
        .collect()
}

/// True when any segment is an addition or removal
pub fn has_changes(segments: &[Segment]) -> bool {
    segments.iter().any(|s| s.kind != SegmentKind::Same)
}
