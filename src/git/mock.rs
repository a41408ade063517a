use crate::domain::{CommitRecord, FIELD_SEPARATOR};
use crate::error::Result;
use crate::git::{GitClient, LogRange};
use std::sync::Mutex;

/// Mock git client for testing without a repository
///
/// Serves canned tags and log entries. Branch-scoped requests get the branch
/// entries; every since-tag request gets the same history regardless of tag.
#[derive(Debug, Default)]
pub struct MockGitClient {
    tags: Vec<String>,
    history: Vec<String>,
    branch: Vec<String>,
    requests: Mutex<Vec<LogRange>>,
}

impl MockGitClient {
    /// Create a new empty mock client
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tags reported by `list_tags`
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Add a commit to the since-tag history
    pub fn with_commit(mut self, commit: CommitRecord) -> Self {
        self.history.push(commit.to_log_entry(FIELD_SEPARATOR));
        self
    }

    /// Add commits to the since-tag history, one per subject
    pub fn with_subjects(mut self, subjects: &[&str]) -> Self {
        for (i, subject) in subjects.iter().enumerate() {
            let commit = CommitRecord::new(format!("{:06x}", i), *subject, None);
            self.history.push(commit.to_log_entry(FIELD_SEPARATOR));
        }
        self
    }

    /// Add a raw, possibly malformed, entry to the since-tag history
    pub fn with_raw_entry(mut self, entry: impl Into<String>) -> Self {
        self.history.push(entry.into());
        self
    }

    /// Add a commit that only exists on the current branch
    pub fn with_branch_commit(mut self, commit: CommitRecord) -> Self {
        self.branch.push(commit.to_log_entry(FIELD_SEPARATOR));
        self
    }

    /// Log ranges requested so far, in call order
    pub fn requests(&self) -> Vec<LogRange> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl GitClient for MockGitClient {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.clone())
    }

    fn log(&self, range: &LogRange) -> Result<Vec<String>> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(range.clone());
        }

        match range {
            LogRange::SinceTag(_) => Ok(self.history.clone()),
            LogRange::Branch(_) => Ok(self.branch.clone()),
        }
    }
}
