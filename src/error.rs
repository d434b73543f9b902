#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Prompt failed: {0}")]
    PromptError(#[from] dialoguer::Error),

    #[error("Git command failed: {0}")]
    GitCommandError(String),

    #[error(
        "Git user.name and user.email must be configured. Run:\n\
         git config --global user.name \"Your Name\"\n\
         git config --global user.email \"your.email@example.com\""
    )]
    MissingAuthorIdentity,

    #[error("Failed to read rules file {path}: {source}")]
    RulesFileError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API request failed (HTTP {status}): {body}")]
    ApiError { status: u16, body: String },

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Failed to parse AI response: {0}")]
    MalformedPlan(#[source] serde_json::Error),

    #[error("Invalid commit plan: {0}")]
    InvalidPlan(String),

    #[error("Failed to commit group {group}: {source}")]
    GroupCommitError {
        group: usize,
        #[source]
        source: Box<Error>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
