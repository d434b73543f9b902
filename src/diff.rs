//! Positional line diff between the committed and working snapshots of a file.
//!
//! Lines are compared index by index; there is no longest-common-subsequence
//! alignment. A line inserted near the top of a file therefore shows up as a
//! run of modified lines followed by one added line.
//!
//! An empty snapshot has zero lines, so a missing file and an empty file
//! produce the same output.

use crate::types::LineChange;

fn split_lines(content: &str) -> Vec<&str> {
    if content.is_empty() {
        Vec::new()
    } else {
        content.split('\n').collect()
    }
}

/// Walks both snapshots side by side, yielding `(index, old, new)` for every
/// position of the longer one.
fn positions<'a>(
    committed: &'a str,
    working: &'a str,
) -> impl Iterator<Item = (usize, Option<&'a str>, Option<&'a str>)> {
    let old = split_lines(committed);
    let new = split_lines(working);
    let len = old.len().max(new.len());
    (0..len).map(move |i| (i, old.get(i).copied(), new.get(i).copied()))
}

/// Returns one [`LineChange`] per position where the two snapshots differ.
#[must_use]
pub fn diff_lines(committed: &str, working: &str) -> Vec<LineChange> {
    positions(committed, working)
        .filter_map(|(i, old, new)| match (old, new) {
            (None, Some(new)) => Some(LineChange::Added {
                line_number: i + 1,
                new_content: new.to_string(),
            }),
            (Some(old), None) => Some(LineChange::Removed {
                line_number: i + 1,
                old_content: old.to_string(),
            }),
            (Some(old), Some(new)) if old != new => Some(LineChange::Modified {
                line_number: i + 1,
                old_content: old.to_string(),
                new_content: new.to_string(),
            }),
            _ => None,
        })
        .collect()
}

/// Renders the positional diff with ` `, `-` and `+` prefixes. A modified line
/// becomes a removal followed by an addition. No trailing newline.
#[must_use]
pub fn render_unified(committed: &str, working: &str) -> String {
    let mut lines = Vec::new();
    for (_, old, new) in positions(committed, working) {
        match (old, new) {
            (None, Some(new)) => lines.push(format!("+{new}")),
            (Some(old), None) => lines.push(format!("-{old}")),
            (Some(old), Some(new)) if old != new => {
                lines.push(format!("-{old}"));
                lines.push(format!("+{new}"));
            }
            (Some(same), Some(_)) => lines.push(format!(" {same}")),
            (None, None) => {}
        }
    }
    lines.join("\n")
}
