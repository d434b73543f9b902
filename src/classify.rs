use crate::types::{ChangeStatus, FileStatusFlags, ABSENT};

/// Derives the change classification of a file from its status flags.
#[must_use]
pub const fn classify(flags: FileStatusFlags) -> ChangeStatus {
    if flags.head == ABSENT && flags.index == ABSENT {
        ChangeStatus::Untracked
    } else if flags.workdir == ABSENT {
        ChangeStatus::Deleted
    } else if flags.head == ABSENT {
        ChangeStatus::Added
    } else {
        ChangeStatus::Modified
    }
}
