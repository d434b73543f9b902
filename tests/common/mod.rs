#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::io;

use aigito::console::Interaction;
use aigito::git::Repository;
use aigito::oracle::GroupingOracle;
use aigito::{AuthorIdentity, ChangeRecord, CommitGroup, Error, FileStatusFlags, Result, StatusEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Stage(Vec<String>),
    Unstage(Vec<String>),
    Commit(String),
}

/// In-memory repository that records every mutation.
#[derive(Default)]
pub struct FakeRepo {
    pub status: Vec<StatusEntry>,
    pub committed: HashMap<String, Vec<u8>>,
    pub working: HashMap<String, Vec<u8>>,
    pub unreadable: HashSet<String>,
    /// 1-based stage call numbers that fail.
    pub failing_stages: HashSet<usize>,
    /// 1-based commit call numbers that fail.
    pub failing_commits: HashSet<usize>,
    pub identity: Option<AuthorIdentity>,
    pub calls: RefCell<Vec<Call>>,
    stage_attempts: Cell<usize>,
    commit_attempts: Cell<usize>,
}

impl FakeRepo {
    pub fn new() -> Self {
        Self {
            identity: Some(test_author()),
            ..Self::default()
        }
    }

    pub fn with_file(
        mut self,
        path: &str,
        flags: FileStatusFlags,
        committed: Option<&[u8]>,
        working: Option<&[u8]>,
    ) -> Self {
        self.status.push(StatusEntry::new(path, flags));
        if let Some(content) = committed {
            self.committed.insert(path.to_string(), content.to_vec());
        }
        if let Some(content) = working {
            self.working.insert(path.to_string(), content.to_vec());
        }
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl Repository for FakeRepo {
    fn status_snapshot(&self) -> Result<Vec<StatusEntry>> {
        Ok(self.status.clone())
    }

    fn read_committed_blob(&self, path: &str) -> Result<Vec<u8>> {
        if self.unreadable.contains(path) {
            return Err(Error::GitCommandError(format!("cannot read {path}")));
        }
        self.committed
            .get(path)
            .cloned()
            .ok_or_else(|| Error::GitCommandError(format!("{path} not in HEAD")))
    }

    fn read_working_file(&self, path: &str) -> Result<Vec<u8>> {
        if self.unreadable.contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied").into());
        }
        self.working
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "missing").into())
    }

    fn stage(&self, paths: &[String]) -> Result<()> {
        self.calls.borrow_mut().push(Call::Stage(paths.to_vec()));
        let attempt = self.stage_attempts.get() + 1;
        self.stage_attempts.set(attempt);
        if self.failing_stages.contains(&attempt) {
            return Err(Error::GitCommandError("pathspec did not match".to_string()));
        }
        Ok(())
    }

    fn unstage(&self, paths: &[String]) -> Result<()> {
        self.calls.borrow_mut().push(Call::Unstage(paths.to_vec()));
        Ok(())
    }

    fn commit(&self, message: &str, _author: &AuthorIdentity) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(Call::Commit(message.to_string()));
        let attempt = self.commit_attempts.get() + 1;
        self.commit_attempts.set(attempt);
        if self.failing_commits.contains(&attempt) {
            return Err(Error::GitCommandError("commit rejected".to_string()));
        }
        Ok(())
    }

    fn author_identity(&self) -> Result<AuthorIdentity> {
        self.identity.clone().ok_or(Error::MissingAuthorIdentity)
    }
}

/// Oracle returning a canned response.
pub struct StubOracle {
    pub response: String,
    pub requests: Cell<usize>,
    pub last_files: RefCell<Vec<String>>,
}

impl StubOracle {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            requests: Cell::new(0),
            last_files: RefCell::new(Vec::new()),
        }
    }
}

impl GroupingOracle for StubOracle {
    fn generate(
        &self,
        records: &[ChangeRecord],
        _extra_context: Option<&str>,
        _rules: Option<&str>,
    ) -> Result<String> {
        self.requests.set(self.requests.get() + 1);
        *self.last_files.borrow_mut() = records.iter().map(|r| r.filename.clone()).collect();
        Ok(self.response.clone())
    }
}

/// Answers confirmations from a script and records which groups were shown.
#[derive(Default)]
pub struct ScriptedInteraction {
    pub answers: VecDeque<bool>,
    pub shown: Vec<usize>,
    pub questions: Vec<String>,
}

impl ScriptedInteraction {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl Interaction for ScriptedInteraction {
    fn show_group(&mut self, index: usize, _group: &CommitGroup) {
        self.shown.push(index);
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        self.questions.push(question.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more answers").into())
    }
}

pub fn test_author() -> AuthorIdentity {
    AuthorIdentity {
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
    }
}

pub fn group(files: &[&str], message: &str) -> CommitGroup {
    CommitGroup {
        files: files.iter().map(ToString::to_string).collect(),
        commit_message: message.to_string(),
    }
}

pub const MODIFIED: FileStatusFlags = FileStatusFlags::new(1, 2, 1);
pub const UNTRACKED: FileStatusFlags = FileStatusFlags::new(0, 2, 0);
pub const DELETED: FileStatusFlags = FileStatusFlags::new(1, 0, 1);
