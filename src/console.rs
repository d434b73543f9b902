use dialoguer::Input;

use crate::error::Result;
use crate::style;
use crate::types::CommitGroup;

const ANSWER_HINT: &str = "Please answer with y/yes or n/no";

/// The user-facing side of the commit loop.
pub trait Interaction {
    /// Show a proposed group. `index` is 0-based.
    fn show_group(&mut self, index: usize, group: &CommitGroup);

    /// Ask a yes/no question and block until it is answered
    ///
    /// # Errors
    ///
    /// Returns an error if the answer cannot be read
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Prints groups to stdout and asks questions on the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalInteraction;

impl TerminalInteraction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Interaction for TerminalInteraction {
    fn show_group(&mut self, index: usize, group: &CommitGroup) {
        println!("{}", render_group(index, group));
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = Input::<String>::new()
            .with_prompt(format!(
                "{} {question} {}",
                style::warning("?"),
                style::dim("(y/n)")
            ))
            .validate_with(|input: &String| -> std::result::Result<(), &'static str> {
                parse_answer(input).map(|_| ()).ok_or(ANSWER_HINT)
            })
            .interact_text()?;

        Ok(parse_answer(&answer).unwrap_or(false))
    }
}

/// `y`/`yes` and `n`/`no`, case-insensitive, surrounding whitespace ignored.
#[must_use]
pub fn parse_answer(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// The block shown before a group is decided on.
#[must_use]
pub fn render_group(index: usize, group: &CommitGroup) -> String {
    let mut lines = vec![
        String::new(),
        style::header(&format!("📦 Commit Group {}", index + 1)),
        format!(
            "{} {}",
            style::label("Message:"),
            style::success(&group.commit_message)
        ),
        style::label("Files:"),
    ];
    lines.extend(
        group
            .files
            .iter()
            .map(|file| format!("  {} {}", style::dim("•"), style::path(file))),
    );
    lines.join("\n")
}
