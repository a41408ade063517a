//! Version-control collaborator abstraction
//!
//! The release analyzer only ever needs two things from version control: the
//! list of tags, and the raw log entries for a range of commits. This module
//! provides a trait-based abstraction over those two operations so that the
//! decision logic can run against a real repository or against canned data.
//!
//! # Overview
//!
//! - [repository::Git2Client]: A real implementation using the `git2` crate
//! - [mock::MockGitClient]: An in-memory implementation for testing
//!
//! # Usage
//!
//! ```rust
//! # use conventional_release::git::{GitClient, LogRange};
//! # fn example<G: GitClient>(git: &G) -> Result<(), Box<dyn std::error::Error>> {
//! let tags = git.list_tags()?;
//! let entries = git.log(&LogRange::SinceTag(tags.first().cloned()))?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockGitClient;
pub use repository::Git2Client;

use crate::error::Result;
use std::fmt;

/// Which commits a log request covers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogRange {
    /// Commits reachable from HEAD but not from the given tag.
    ///
    /// `None` means the whole history of HEAD.
    SinceTag(Option<String>),
    /// Commits on any ref that are not reachable from the target branch
    Branch(String),
}

impl fmt::Display for LogRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogRange::SinceTag(Some(tag)) => write!(f, "{}..HEAD", tag),
            LogRange::SinceTag(None) => write!(f, "HEAD"),
            LogRange::Branch(target) => write!(f, "--all --not {}", target),
        }
    }
}

/// Version-control operations the release analyzer depends on
///
/// ## Thread Safety
///
/// Implementors must be `Send + Sync` so independent analyzer runs can share a client.
///
/// ## Log entry format
///
/// Each entry returned by [GitClient::log] is a single commit formatted as
/// `hash @-@-@-@-@ subject @-@-@-@-@ body` (see [crate::domain::FIELD_SEPARATOR]).
/// Merge commits are excluded. Order is unspecified.
pub trait GitClient: Send + Sync {
    /// Get all tags in the repository
    ///
    /// Returns every tag name, unordered and unfiltered.
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Get raw log entries for a range of commits
    ///
    /// # Arguments
    /// * `range` - Which commits to list
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - One delimited entry per non-merge commit
    /// * `Err` - If the range cannot be resolved
    fn log(&self, range: &LogRange) -> Result<Vec<String>>;
}
