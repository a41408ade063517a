use thiserror::Error;

/// Unified error type for conventional-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// No conventional commits were found to base a release on.
    ///
    /// Displays as the bare message so callers can print `Error: {message}`.
    #[error("{0}")]
    NoFormattedCommits(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results in conventional-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a "no formatted commits" error carrying a caller-supplied message
    pub fn no_formatted_commits(msg: impl Into<String>) -> Self {
        ReleaseError::NoFormattedCommits(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }
}
