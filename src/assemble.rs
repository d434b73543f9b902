use tracing::{debug, error, instrument};

use crate::binary::is_binary;
use crate::classify::classify;
use crate::diff::{diff_lines, render_unified};
use crate::error::{Error, Result};
use crate::git::Repository;
use crate::types::{ChangeRecord, StatusEntry, ABSENT};

/// Builds one [`ChangeRecord`] per entry, in input order.
///
/// A file that cannot be read is logged and left out; the remaining files are
/// still processed.
#[instrument(skip_all, fields(files = entries.len()))]
pub fn assemble(repo: &impl Repository, entries: &[StatusEntry]) -> Vec<ChangeRecord> {
    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        match build_record(repo, entry) {
            Ok(record) => records.push(record),
            Err(err) => {
                error!(path = %entry.path, error = %err, "Error getting diff, skipping file");
            }
        }
    }
    debug!(records = records.len(), "Diff assembly finished");
    records
}

fn build_record(repo: &impl Repository, entry: &StatusEntry) -> Result<ChangeRecord> {
    let committed = if entry.flags.head == ABSENT {
        Vec::new()
    } else {
        repo.read_committed_blob(&entry.path)?
    };

    let working = if entry.flags.workdir == ABSENT {
        Vec::new()
    } else {
        match repo.read_working_file(&entry.path) {
            Ok(content) => content,
            Err(Error::IoError(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                Vec::new()
            }
            Err(err) => return Err(err),
        }
    };

    let status = classify(entry.flags);

    if is_binary(&entry.path, &committed, &working) {
        debug!(path = %entry.path, status = %status, "Binary file, diff suppressed");
        return Ok(ChangeRecord {
            filename: entry.path.clone(),
            status,
            diff_text: format!("Binary file {status}"),
            is_binary: true,
            line_changes: Vec::new(),
        });
    }

    let committed = String::from_utf8_lossy(&committed);
    let working = String::from_utf8_lossy(&working);

    Ok(ChangeRecord {
        filename: entry.path.clone(),
        status,
        diff_text: render_unified(&committed, &working),
        is_binary: false,
        line_changes: diff_lines(&committed, &working),
    })
}
