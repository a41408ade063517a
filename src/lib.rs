pub mod analyzer;
pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod logging;
pub mod ui;

pub use analyzer::{AnalyzerOptions, ReleaseAnalyzer};
pub use error::{ReleaseError, Result};
