pub use error::{Error, Result};
pub use types::{
    AuthorIdentity, ChangeRecord, ChangeStatus, CommitGroup, FileStatusFlags, LineChange,
    RunConfig, StatusEntry,
};

use std::path::Path;

pub mod assemble;
pub mod binary;
pub mod classify;
pub mod console;
pub mod diff;
pub mod engine;
mod error;
pub mod git;
pub mod oracle;
pub mod plan;
pub mod processor;
pub mod rules;
pub mod style;
pub mod tokens;
mod types;

/// Creates a `CommitProcessor` for a local repository that asks an
/// OpenAI-compatible endpoint for the commit groups.
///
/// # Arguments
///
/// * `repo_path`: A path inside the local Git repository. Git operations run
///   from the repository's top-level directory.
/// * `settings`: Endpoint, model and credentials for the grouping request.
///
/// # Errors
///
/// Returns an error if the path does not exist or is not inside a Git working
/// tree, or if the HTTP client cannot be built.
pub fn new(
    repo_path: &Path,
    settings: oracle::OracleSettings,
) -> Result<processor::CommitProcessor<git::GitCli, oracle::OpenAiOracle>> {
    if !repo_path.is_dir() {
        return Err(Error::GitCommandError(format!(
            "repository path {} does not exist",
            repo_path.display()
        )));
    }
    let repo = git::GitCli::discover(repo_path)?;
    let oracle = oracle::OpenAiOracle::new(settings)?;
    Ok(processor::CommitProcessor::new(repo, oracle))
}
