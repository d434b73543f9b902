use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::types::{AuthorIdentity, FileStatusFlags, StatusEntry};

/// Trait defining the repository operations the commit pipeline relies on
pub trait Repository {
    /// List every path whose HEAD, index or working tree state differs
    ///
    /// # Errors
    ///
    /// Returns an error if the status cannot be read
    fn status_snapshot(&self) -> Result<Vec<StatusEntry>>;

    /// Read the content of a file as of the last commit
    ///
    /// # Errors
    ///
    /// Returns an error if the file has no committed version or cannot be read
    fn read_committed_blob(&self, path: &str) -> Result<Vec<u8>>;

    /// Read the content of a file from the working tree
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be read
    fn read_working_file(&self, path: &str) -> Result<Vec<u8>>;

    /// Stage the given paths, including deletions
    ///
    /// # Errors
    ///
    /// Returns an error if the index cannot be updated
    fn stage(&self, paths: &[String]) -> Result<()>;

    /// Reset the given paths in the index back to HEAD, keeping the working tree
    ///
    /// # Errors
    ///
    /// Returns an error if the index cannot be updated
    fn unstage(&self, paths: &[String]) -> Result<()>;

    /// Commit the staged changes
    ///
    /// # Errors
    ///
    /// Returns an error if the commit cannot be created
    fn commit(&self, message: &str, author: &AuthorIdentity) -> Result<()>;

    /// Resolve the identity commits are authored with
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingAuthorIdentity`] if the name or email is not configured
    fn author_identity(&self) -> Result<AuthorIdentity>;
}

/// Implementation of repository operations using the local Git CLI
pub struct GitCli {
    repo_path: PathBuf,
}

impl GitCli {
    /// Creates a new `GitCli` instance with the given repository path
    #[must_use]
    pub const fn new(repo_path: PathBuf) -> Self {
        Self { repo_path }
    }

    /// Opens the repository containing `path`, rooted at its top-level
    /// directory so status paths resolve against the right place.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not inside a Git working tree
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn discover(path: &Path) -> Result<Self> {
        let toplevel =
            Self::new(path.to_path_buf()).run_git_command(&["rev-parse", "--show-toplevel"])?;
        debug!(root = %toplevel, "Repository root resolved");
        Ok(Self::new(PathBuf::from(toplevel)))
    }

    #[must_use]
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    fn output(&self, args: &[&str]) -> Result<Vec<u8>> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .map_err(|e| Error::GitCommandError(e.to_string()))?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            debug!(error = %error, "Git command failed");
            return Err(Error::GitCommandError(error.trim().to_string()));
        }

        Ok(output.stdout)
    }

    fn run_git_command(&self, args: &[&str]) -> Result<String> {
        let stdout = self.output(args)?;
        String::from_utf8(stdout)
            .map(|s| s.trim().to_string())
            .map_err(|e| Error::GitCommandError(e.to_string()))
    }

    fn config_value(&self, key: &str) -> Option<String> {
        self.run_git_command(&["config", key])
            .ok()
            .filter(|value| !value.is_empty())
    }
}

impl Repository for GitCli {
    #[instrument(skip(self), fields(repo_path = %self.repo_path.display()))]
    fn status_snapshot(&self) -> Result<Vec<StatusEntry>> {
        let stdout = self.output(&[
            "status",
            "--porcelain=v1",
            "-z",
            "--untracked-files=all",
            "--no-renames",
        ])?;
        let raw = String::from_utf8_lossy(&stdout);
        let entries = parse_porcelain(&raw);
        debug!(entries = entries.len(), "Status snapshot read");
        Ok(entries)
    }

    #[instrument(skip(self), fields(path = %path))]
    fn read_committed_blob(&self, path: &str) -> Result<Vec<u8>> {
        let content = self.output(&["show", &format!("HEAD:{path}")])?;
        debug!(content_length = content.len(), "Committed content retrieved");
        Ok(content)
    }

    #[instrument(skip(self), fields(path = %path))]
    fn read_working_file(&self, path: &str) -> Result<Vec<u8>> {
        let content = std::fs::read(self.repo_path.join(path))?;
        debug!(content_length = content.len(), "Working content retrieved");
        Ok(content)
    }

    #[instrument(skip(self), fields(files = ?paths))]
    fn stage(&self, paths: &[String]) -> Result<()> {
        if paths.is_empty() {
            return Err(Error::GitCommandError("No files to stage".to_string()));
        }
        let mut args = vec!["add", "-A", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.output(&args)?;
        debug!("Files staged");
        Ok(())
    }

    #[instrument(skip(self), fields(files = ?paths))]
    fn unstage(&self, paths: &[String]) -> Result<()> {
        let mut args = vec!["reset", "-q", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.output(&args)?;
        debug!("Files unstaged");
        Ok(())
    }

    #[instrument(skip(self, message), fields(author = %author.name))]
    fn commit(&self, message: &str, author: &AuthorIdentity) -> Result<()> {
        let name = format!("user.name={}", author.name);
        let email = format!("user.email={}", author.email);
        let author_arg = format!("{} <{}>", author.name, author.email);

        self.output(&[
            "-c",
            name.as_str(),
            "-c",
            email.as_str(),
            "commit",
            "-m",
            message,
            "--author",
            author_arg.as_str(),
        ])?;
        debug!("Commit created");
        Ok(())
    }

    #[instrument(skip(self))]
    fn author_identity(&self) -> Result<AuthorIdentity> {
        match (self.config_value("user.name"), self.config_value("user.email")) {
            (Some(name), Some(email)) => Ok(AuthorIdentity { name, email }),
            _ => Err(Error::MissingAuthorIdentity),
        }
    }
}

/// Translates `git status --porcelain=v1 -z` output into status flags.
///
/// `X` is the index state against HEAD and `Y` the working tree state against
/// the index. Unmerged paths are kept and marked as conflicted; other codes
/// that cannot be expressed (ignored files) are left out.
#[must_use]
pub fn parse_porcelain(raw: &str) -> Vec<StatusEntry> {
    raw.split('\0')
        .filter(|record| record.len() > 3)
        .filter_map(|record| {
            let mut codes = record.chars();
            let x = codes.next()?;
            let y = codes.next()?;
            let path = record.get(3..)?;
            if let Some(flags) = unmerged_flags(x, y) {
                return Some(StatusEntry::unmerged(path, flags));
            }
            porcelain_flags(x, y).map(|flags| StatusEntry::new(path, flags))
        })
        .collect()
}

fn unmerged_flags(x: char, y: char) -> Option<FileStatusFlags> {
    match (x, y) {
        ('A', 'A' | 'U') | ('U', 'A') => Some(FileStatusFlags::new(0, 2, 3)),
        ('D', 'D') => Some(FileStatusFlags::new(1, 0, 3)),
        ('U', 'U' | 'D') | ('D', 'U') => Some(FileStatusFlags::new(1, 2, 3)),
        _ => None,
    }
}

fn porcelain_flags(x: char, y: char) -> Option<FileStatusFlags> {
    if x == '?' && y == '?' {
        return Some(FileStatusFlags::new(0, 2, 0));
    }

    // HEAD presence and index state relative to HEAD / working tree.
    let (head, index_differs_from_head, index_present) = match x {
        ' ' => (1, false, true),
        'M' | 'T' => (1, true, true),
        'A' => (0, true, true),
        'D' => (1, true, false),
        _ => return None,
    };

    let (workdir, index) = match y {
        ' ' => {
            let workdir = match (head, index_present, index_differs_from_head) {
                (_, false, _) => 0,
                (1, true, false) => 1,
                _ => 2,
            };
            let index = match (index_present, index_differs_from_head) {
                (false, _) => 0,
                (true, false) => 1,
                (true, true) => 2,
            };
            (workdir, index)
        }
        'M' | 'T' => {
            let index = match (head, index_differs_from_head) {
                (1, false) => 1,
                _ => 3,
            };
            (2, index)
        }
        'D' => {
            let index = match (head, index_differs_from_head) {
                (1, false) => 1,
                _ => 3,
            };
            (0, index)
        }
        _ => return None,
    };

    Some(FileStatusFlags::new(head, workdir, index))
}
