//! Grouping request against an OpenAI-compatible chat completions endpoint.

use std::fmt::Write as _;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::types::ChangeRecord;

pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4.1";

const SYSTEM_PROMPT: &str = r#"You are a git assistant that analyzes code changes, groups related files into atomic commits and writes a conventional commit message for each group.

CRITICAL RULE: If a file has changeType "modified", you are MODIFYING existing code, NOT adding new features.

ANALYSIS RULES:
1. For changeType "modified" files, use ONLY these commit types:
   - "refactor" when improving or changing existing code structure or logic
   - "fix" when fixing bugs in existing code
   - "chore" when updating config, removing unused code, or maintenance
   - NEVER use "feat" or words like "add", "implement", "create" for modified files
2. For changeType "added" or "untracked" files (new files), use "feat" if it is genuinely new functionality.
3. For changeType "deleted" files, use "chore" or "refactor".
4. Files with isBinary true carry no diff; describe them by name and change type only.

FORBIDDEN WORDS for modified files: "add", "implement", "create", "introduce", "establish", "build".
REQUIRED WORDS for modified files: "update", "improve", "change", "modify", "refactor", "fix", "adjust".

EXAMPLES:
- Modified ai.ts with prompt changes -> "refactor(ai): improve system prompt analysis"
- Modified types.ts removing a property -> "refactor(types): remove unused workdir property"
- New file added -> "feat(module): add new functionality"

Every file must appear in exactly one group. Keep messages short and accurate. Focus on WHAT changed, not imaginary new features.

Return ONLY a JSON array, no prose:
[{"files": ["file.ts"], "commitMessage": "refactor(scope): what was actually changed"}]"#;

/// Turns the full list of change records into a raw commit plan.
pub trait GroupingOracle {
    /// Send a single grouping request and return the model's raw text
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response carries no text
    fn generate(
        &self,
        records: &[ChangeRecord],
        extra_context: Option<&str>,
        rules: Option<&str>,
    ) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct OracleSettings {
    pub api_base_url: String,
    pub api_key: String,
    pub model: String,
    pub request_timeout_secs: u64,
}

impl OracleSettings {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout_secs: 120,
        }
    }
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenAiOracle {
    client: reqwest::blocking::Client,
    settings: OracleSettings,
}

impl OpenAiOracle {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(settings: OracleSettings) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .connect_timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client, settings })
    }
}

impl GroupingOracle for OpenAiOracle {
    #[instrument(skip_all, fields(model = %self.settings.model, files = records.len()))]
    fn generate(
        &self,
        records: &[ChangeRecord],
        extra_context: Option<&str>,
        rules: Option<&str>,
    ) -> Result<String> {
        let prompt = build_user_prompt(records, extra_context, rules)?;
        let request = ApiRequest {
            model: &self.settings.model,
            temperature: 0.2,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Message {
                    role: "user",
                    content: &prompt,
                },
            ],
        };

        let url = format!(
            "{}/chat/completions",
            self.settings.api_base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.settings.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let api_response: ApiResponse = response.json()?;
        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(Error::EmptyResponse)?;

        debug!(response_length = content.len(), "Grouping response received");
        Ok(content)
    }
}

/// The user message: the change records as pretty JSON, followed by the
/// optional context and rules sections.
///
/// # Errors
///
/// Returns an error if the records cannot be serialized
pub fn build_user_prompt(
    records: &[ChangeRecord],
    extra_context: Option<&str>,
    rules: Option<&str>,
) -> Result<String> {
    let mut prompt = serde_json::to_string_pretty(records)?;

    if let Some(context) = extra_context.filter(|c| !c.trim().is_empty()) {
        let _ = write!(prompt, "\n\n## Additional context\n{}", context.trim());
    }
    if let Some(rules) = rules.filter(|r| !r.trim().is_empty()) {
        let _ = write!(prompt, "\n\n## Project rules\n{}", rules.trim());
    }

    Ok(prompt)
}
