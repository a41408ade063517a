use crate::analyzer::{AnalyzerOptions, DEFAULT_NO_FORMATTED_COMMITS_MESSAGE};
use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the configuration file looked up in the working and config directories.
pub const CONFIG_FILE_NAME: &str = "conventional-release.toml";

/// Represents the complete configuration for conventional-release.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserConfig,
}

/// Returns the default message reported when no conventional commits are found.
fn default_no_formatted_commits_message() -> String {
    DEFAULT_NO_FORMATTED_COMMITS_MESSAGE.to_string()
}

/// Configuration for commit parsing and release-notes rendering.
///
/// Every value can be overridden from the command line.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ParserConfig {
    #[serde(default)]
    pub strict: bool,

    #[serde(default)]
    pub hide_commit_hashes: bool,

    #[serde(default = "default_no_formatted_commits_message")]
    pub no_formatted_commits_message: String,

    #[serde(default)]
    pub target_branch: Option<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            strict: false,
            hide_commit_hashes: false,
            no_formatted_commits_message: default_no_formatted_commits_message(),
            target_branch: None,
        }
    }
}

impl ParserConfig {
    /// Analyzer options equivalent to this configuration
    pub fn to_options(&self) -> AnalyzerOptions {
        AnalyzerOptions {
            strict: self.strict,
            hide_commit_hashes: self.hide_commit_hashes,
            target_branch: self.target_branch.clone(),
            no_formatted_commits_message: self.no_formatted_commits_message.clone(),
        }
    }
}

/// Finds the configuration file to use, if any.
///
/// Lookup order:
/// 1. Custom path provided as parameter
/// 2. `conventional-release.toml` in `dir`
/// 3. `.conventional-release.toml` in user config directory
fn locate_config(config_path: Option<&str>, dir: &Path) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(PathBuf::from(path));
    }

    let local = dir.join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(format!(".{}", CONFIG_FILE_NAME)))
        .filter(|path| path.exists())
}

/// Loads configuration from file or returns defaults.
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    load_config_from(config_path, Path::new("."))
}

/// Like [load_config], but looks for `conventional-release.toml` in `dir`
/// instead of the current directory
pub fn load_config_from(config_path: Option<&str>, dir: &Path) -> Result<Config> {
    let Some(path) = locate_config(config_path, dir) else {
        debug!("no configuration file found, using defaults");
        return Ok(Config::default());
    };

    debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(&path)?;
    toml::from_str(&config_str)
        .map_err(|e| ReleaseError::config(format!("{}: {}", path.display(), e)))
}

/// Parses configuration from TOML text
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| ReleaseError::config(e.to_string()))
}
