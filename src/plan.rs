use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::{ChangeRecord, CommitGroup};

/// Parses the model's raw text into commit groups.
///
/// The text must be a JSON array of `{"files": [...], "commitMessage": "..."}`
/// objects, optionally wrapped in a markdown code fence.
///
/// # Errors
///
/// Returns [`Error::MalformedPlan`] if the text is not a valid plan
pub fn parse_commit_groups(raw: &str) -> Result<Vec<CommitGroup>> {
    let json = strip_code_fence(raw);
    let groups: Vec<CommitGroup> = serde_json::from_str(json).map_err(Error::MalformedPlan)?;
    debug!(groups = groups.len(), "Commit plan parsed");
    Ok(groups)
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening fence line.
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Checks a plan against the change records it was produced from.
///
/// Every group needs at least one file and a message, every file must be one
/// of the changed files, and no file may be claimed twice. Changed files the
/// plan leaves out only produce a warning.
///
/// # Errors
///
/// Returns [`Error::InvalidPlan`] describing the first violation found
pub fn validate_plan(groups: &[CommitGroup], records: &[ChangeRecord]) -> Result<()> {
    let known: HashSet<&str> = records.iter().map(|r| r.filename.as_str()).collect();
    let mut claimed: HashSet<&str> = HashSet::with_capacity(known.len());

    for (index, group) in groups.iter().enumerate() {
        let number = index + 1;
        if group.files.is_empty() {
            return Err(Error::InvalidPlan(format!("group {number} has no files")));
        }
        if group.commit_message.trim().is_empty() {
            return Err(Error::InvalidPlan(format!(
                "group {number} has an empty commit message"
            )));
        }
        for file in &group.files {
            if !known.contains(file.as_str()) {
                return Err(Error::InvalidPlan(format!(
                    "group {number} references unknown file {file}"
                )));
            }
            if !claimed.insert(file.as_str()) {
                return Err(Error::InvalidPlan(format!(
                    "file {file} appears in more than one place (group {number})"
                )));
            }
        }
    }

    for record in records {
        if !claimed.contains(record.filename.as_str()) {
            warn!(path = %record.filename, "File not included in any commit group, leaving it uncommitted");
        }
    }

    Ok(())
}
