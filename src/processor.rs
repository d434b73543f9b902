use tracing::{debug, info, instrument, warn};

use crate::assemble::assemble;
use crate::console::Interaction;
use crate::engine::{ApplySummary, CommitEngine};
use crate::error::Result;
use crate::git::Repository;
use crate::oracle::{build_user_prompt, GroupingOracle};
use crate::plan::{parse_commit_groups, validate_plan};
use crate::tokens::estimate_tokens;
use crate::types::{RunConfig, StatusEntry};

pub const DEFAULT_TOKEN_BUDGET: usize = 100_000;

/// Per-invocation settings for [`CommitProcessor::run`].
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: RunConfig,
    /// Extra free-form context for the grouping request.
    pub extra_context: Option<String>,
    /// Contents of the rules file, already loaded.
    pub rules: Option<String>,
    /// Requests estimated above this many tokens need confirmation.
    pub token_budget: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config: RunConfig::default(),
            extra_context: None,
            rules: None,
            token_budget: DEFAULT_TOKEN_BUDGET,
        }
    }
}

/// How a run ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(ApplySummary),
    /// Nothing to commit.
    NoChanges,
    /// The index already held changes before the run; the paths are listed.
    AlreadyStaged(Vec<String>),
    /// A merge is in progress with unresolved conflicts in the listed paths.
    Unmerged(Vec<String>),
    /// The user declined to send an oversized request.
    Cancelled,
}

/// Runs the whole pipeline: status, diffs, grouping request, commits.
pub struct CommitProcessor<R, O> {
    repo: R,
    oracle: O,
}

impl<R: Repository, O: GroupingOracle> CommitProcessor<R, O> {
    pub const fn new(repo: R, oracle: O) -> Self {
        Self { repo, oracle }
    }

    pub const fn repo(&self) -> &R {
        &self.repo
    }

    pub const fn oracle(&self) -> &O {
        &self.oracle
    }

    /// # Errors
    ///
    /// Returns an error if the status cannot be read, the author identity is
    /// missing, the grouping request fails or returns an unusable plan, or a
    /// group fails to commit outside auto-approve mode.
    #[instrument(skip_all, fields(auto_approve = options.config.auto_approve, dry_run = options.config.dry_run))]
    pub fn run(
        &self,
        options: &RunOptions,
        interaction: &mut impl Interaction,
    ) -> Result<RunOutcome> {
        info!("Analyzing repository status...");
        let status = self.repo.status_snapshot()?;

        let conflicted: Vec<String> = status
            .iter()
            .filter(|entry| entry.conflicted)
            .map(|entry| entry.path.clone())
            .collect();
        if !conflicted.is_empty() {
            return Ok(RunOutcome::Unmerged(conflicted));
        }

        let staged: Vec<String> = status
            .iter()
            .filter(|entry| entry.is_staged())
            .map(|entry| entry.path.clone())
            .collect();
        if !staged.is_empty() {
            return Ok(RunOutcome::AlreadyStaged(staged));
        }

        let author = self.repo.author_identity()?;
        debug!(author = %author.name, email = %author.email, "Author identity resolved");

        let unstaged: Vec<StatusEntry> = status
            .into_iter()
            .filter(StatusEntry::has_unstaged_changes)
            .collect();

        info!("Calculating diffs...");
        let records = assemble(&self.repo, &unstaged);
        if records.is_empty() {
            return Ok(RunOutcome::NoChanges);
        }
        info!("Found {} file(s) with changes", records.len());

        let extra_context = options.extra_context.as_deref();
        let rules = options.rules.as_deref();

        let estimated = estimate_tokens(&build_user_prompt(&records, extra_context, rules)?);
        debug!(estimated_tokens = estimated, budget = options.token_budget, "Request size estimated");
        if estimated > options.token_budget {
            warn!(
                "Grouping request is about {estimated} tokens, above the budget of {}",
                options.token_budget
            );
            if !options.config.auto_approve
                && !interaction.confirm("Send the request anyway?")?
            {
                return Ok(RunOutcome::Cancelled);
            }
        }

        info!("Generating commit groups...");
        let response = self.oracle.generate(&records, extra_context, rules)?;

        info!("Parsing commit groups...");
        let groups = parse_commit_groups(&response)?;
        validate_plan(&groups, &records)?;

        let summary =
            CommitEngine::new(&self.repo, &author, options.config).apply(&groups, interaction)?;
        Ok(RunOutcome::Completed(summary))
    }
}
