//! Sequential stage-and-commit loop over the proposed commit groups.
//!
//! Each group moves through display, decision (auto-approved or confirmed by
//! the user), and then either a skip, a dry-run report, or a stage + commit
//! pair. A failed group has its paths reset in the index so they cannot leak
//! into a later commit. It then stops the run in interactive mode; in
//! auto-approve mode it is logged and the loop moves on.

use tracing::{error, info, instrument, warn};

use crate::console::Interaction;
use crate::error::{Error, Result};
use crate::git::Repository;
use crate::types::{AuthorIdentity, CommitGroup, RunConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupOutcome {
    Committed,
    /// Dry run: the group was approved but nothing was staged or committed.
    WouldCommit,
    Skipped,
    /// Only produced in auto-approve mode.
    Failed(String),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ApplySummary {
    pub outcomes: Vec<GroupOutcome>,
}

impl ApplySummary {
    fn count(&self, predicate: impl Fn(&GroupOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(o)).count()
    }

    #[must_use]
    pub fn committed(&self) -> usize {
        self.count(|o| matches!(o, GroupOutcome::Committed))
    }

    #[must_use]
    pub fn would_commit(&self) -> usize {
        self.count(|o| matches!(o, GroupOutcome::WouldCommit))
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, GroupOutcome::Skipped))
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, GroupOutcome::Failed(_)))
    }
}

pub struct CommitEngine<'a, R> {
    repo: &'a R,
    author: &'a AuthorIdentity,
    config: RunConfig,
}

impl<'a, R: Repository> CommitEngine<'a, R> {
    #[must_use]
    pub const fn new(repo: &'a R, author: &'a AuthorIdentity, config: RunConfig) -> Self {
        Self {
            repo,
            author,
            config,
        }
    }

    /// Applies the groups in order.
    ///
    /// # Errors
    ///
    /// Outside auto-approve mode, returns [`Error::GroupCommitError`] for the
    /// first group that fails to stage or commit; later groups are not
    /// attempted. Also fails if a confirmation cannot be read.
    #[instrument(skip_all, fields(groups = groups.len(), auto_approve = self.config.auto_approve, dry_run = self.config.dry_run))]
    pub fn apply(
        &self,
        groups: &[CommitGroup],
        interaction: &mut impl Interaction,
    ) -> Result<ApplySummary> {
        info!("Found {} commit group(s)", groups.len());
        if self.config.auto_approve {
            info!("YOLO mode enabled - committing all groups automatically");
        }

        let mut summary = ApplySummary {
            outcomes: Vec::with_capacity(groups.len()),
        };

        for (index, group) in groups.iter().enumerate() {
            let number = index + 1;
            interaction.show_group(index, group);

            let approved = self.config.auto_approve || interaction.confirm("Commit this group?")?;
            if !approved {
                info!(group = number, "Skipped commit group {number}");
                summary.outcomes.push(GroupOutcome::Skipped);
                continue;
            }

            if self.config.dry_run {
                info!(
                    group = number,
                    "Dry run: would stage {} and commit \"{}\"",
                    group.files.join(", "),
                    group.commit_message
                );
                summary.outcomes.push(GroupOutcome::WouldCommit);
                continue;
            }

            match self.stage_and_commit(group) {
                Ok(()) => {
                    info!(group = number, "Committed: {}", group.commit_message);
                    summary.outcomes.push(GroupOutcome::Committed);
                }
                Err(err) => {
                    error!(group = number, error = %err, "Failed to commit group {number}");
                    if let Err(reset_err) = self.repo.unstage(&group.files) {
                        warn!(
                            group = number,
                            error = %reset_err,
                            "Failed to unstage files of group {number}"
                        );
                    }
                    if !self.config.auto_approve {
                        return Err(Error::GroupCommitError {
                            group: number,
                            source: Box::new(err),
                        });
                    }
                    warn!(group = number, "Continuing with the next group");
                    summary.outcomes.push(GroupOutcome::Failed(err.to_string()));
                }
            }
        }

        Ok(summary)
    }

    fn stage_and_commit(&self, group: &CommitGroup) -> Result<()> {
        info!("Staging files: {}", group.files.join(", "));
        self.repo.stage(&group.files)?;

        info!("Creating commit: {}", group.commit_message);
        self.repo.commit(&group.commit_message, self.author)
    }
}
