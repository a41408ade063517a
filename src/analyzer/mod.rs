//! Analysis engine for deciding the next release from commits

pub mod release_analyzer;

pub use release_analyzer::{
    AnalyzerOptions, ReleaseAnalyzer, ReleaseTag, DEFAULT_NO_FORMATTED_COMMITS_MESSAGE,
};
