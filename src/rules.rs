use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Rules file picked up from the repository root when none is given.
pub const DEFAULT_RULES_FILE: &str = ".aigito-rules";

/// Loads the free-form guidance passed along with the grouping request.
///
/// An explicitly requested file must exist. Without one, the default file in
/// `repo_root` is used if present. Blank contents count as no rules.
///
/// # Errors
///
/// Returns [`Error::RulesFileError`] if the explicit file, or an existing
/// default file, cannot be read
pub fn load_rules(explicit: Option<&Path>, repo_root: &Path) -> Result<Option<String>> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default = repo_root.join(DEFAULT_RULES_FILE);
            if !default.exists() {
                debug!(path = %default.display(), "No default rules file");
                return Ok(None);
            }
            default
        }
    };

    let contents = std::fs::read_to_string(&path).map_err(|source| Error::RulesFileError {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), length = contents.len(), "Rules loaded");

    let trimmed = contents.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}
