use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal used by every status flag for "not present".
pub const ABSENT: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Untracked,
    Added,
    Modified,
    Deleted,
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Untracked => "untracked",
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Deleted => "deleted",
        };
        f.write_str(name)
    }
}

/// Status of one path in the last commit, the working tree and the index.
///
/// `head`: 0 absent, 1 present.
/// `workdir`: 0 absent, 1 identical to HEAD, 2 differs from HEAD.
/// `index`: 0 absent, 1 identical to HEAD, 2 identical to workdir, 3 differs from both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStatusFlags {
    pub head: u8,
    pub workdir: u8,
    pub index: u8,
}

impl FileStatusFlags {
    #[must_use]
    pub const fn new(head: u8, workdir: u8, index: u8) -> Self {
        Self {
            head,
            workdir,
            index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub path: String,
    pub flags: FileStatusFlags,
    /// The path has an unresolved merge conflict.
    pub conflicted: bool,
}

impl StatusEntry {
    #[must_use]
    pub fn new(path: impl Into<String>, flags: FileStatusFlags) -> Self {
        Self {
            path: path.into(),
            flags,
            conflicted: false,
        }
    }

    #[must_use]
    pub fn unmerged(path: impl Into<String>, flags: FileStatusFlags) -> Self {
        Self {
            conflicted: true,
            ..Self::new(path, flags)
        }
    }

    /// The index no longer matches HEAD for this path.
    #[must_use]
    pub const fn is_staged(&self) -> bool {
        self.flags.index != self.flags.head
    }

    /// The working tree no longer matches the index for this path.
    #[must_use]
    pub const fn has_unstaged_changes(&self) -> bool {
        self.flags.workdir != self.flags.index
    }
}

/// A single positional line difference. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LineChange {
    Added {
        line_number: usize,
        new_content: String,
    },
    Removed {
        line_number: usize,
        old_content: String,
    },
    Modified {
        line_number: usize,
        old_content: String,
        new_content: String,
    },
}

/// Everything known about one changed file. This is the payload sent to the
/// grouping request, so `line_changes` stays out of the serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    pub filename: String,
    #[serde(rename = "changeType")]
    pub status: ChangeStatus,
    pub diff_text: String,
    pub is_binary: bool,
    #[serde(skip)]
    pub line_changes: Vec<LineChange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitGroup {
    pub files: Vec<String>,
    pub commit_message: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunConfig {
    pub auto_approve: bool,
    pub dry_run: bool,
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorIdentity {
    pub name: String,
    pub email: String,
}
