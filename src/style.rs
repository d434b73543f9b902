//! Terminal colors for user-facing output.
//!
//! Colors are dropped when `NO_COLOR` is set or stdout is not a color terminal.

use std::sync::OnceLock;

use owo_colors::OwoColorize;

static COLOR_ENABLED: OnceLock<bool> = OnceLock::new();

#[must_use]
pub fn colors_enabled() -> bool {
    *COLOR_ENABLED.get_or_init(|| {
        if std::env::var_os("NO_COLOR").is_some() {
            return false;
        }
        supports_color::on(supports_color::Stream::Stdout).is_some_and(|level| level.has_basic)
    })
}

fn paint(s: &str, styled: impl FnOnce(&str) -> String) -> String {
    if colors_enabled() {
        styled(s)
    } else {
        s.to_string()
    }
}

/// Banner and progress lines (bold cyan).
#[must_use]
pub fn banner(s: &str) -> String {
    paint(s, |s| s.cyan().bold().to_string())
}

/// Completed actions and commit messages (green).
#[must_use]
pub fn success(s: &str) -> String {
    paint(s, |s| s.green().to_string())
}

/// Failures (bold red).
#[must_use]
pub fn error(s: &str) -> String {
    paint(s, |s| s.red().bold().to_string())
}

/// Prompt markers and soft warnings (yellow).
#[must_use]
pub fn warning(s: &str) -> String {
    paint(s, |s| s.yellow().to_string())
}

/// Group headers (bold magenta).
#[must_use]
pub fn header(s: &str) -> String {
    paint(s, |s| s.magenta().bold().to_string())
}

/// File paths.
#[must_use]
pub fn path(s: &str) -> String {
    paint(s, |s| s.cyan().to_string())
}

#[must_use]
pub fn label(s: &str) -> String {
    paint(s, |s| s.bold().to_string())
}

#[must_use]
pub fn dim(s: &str) -> String {
    paint(s, |s| s.dimmed().to_string())
}
