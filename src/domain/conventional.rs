use crate::domain::commit::CommitRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

const BREAKING_CHANGE_FOOTERS: [&str; 2] = ["BREAKING CHANGE:", "BREAKING-CHANGE:"];

static SCOPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]*)\)").expect("valid scope regex"));

/// Commit types that drive version bumps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownType {
    Feat,
    Fix,
    Hotfix,
}

impl KnownType {
    pub fn friendly_name(&self) -> &'static str {
        match self {
            KnownType::Feat => "Feature",
            KnownType::Fix => "Bug Fix",
            KnownType::Hotfix => "Hotfix",
        }
    }
}

/// The type of a conventional commit: one of the known types, or any other label
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommitType {
    Known(KnownType),
    Unknown(String),
}

impl CommitType {
    /// Map a lower-cased type label (without scope or `!`) to a commit type
    pub fn from_label(label: &str) -> Self {
        match label {
            "feat" => CommitType::Known(KnownType::Feat),
            "fix" => CommitType::Known(KnownType::Fix),
            "hotfix" => CommitType::Known(KnownType::Hotfix),
            other => CommitType::Unknown(other.replace('!', "")),
        }
    }

    /// Human readable name used as the release-notes group label
    pub fn friendly_name(&self) -> String {
        match self {
            CommitType::Known(known) => known.friendly_name().to_string(),
            CommitType::Unknown(label) => capitalize(label),
        }
    }

    pub fn is(&self, known: KnownType) -> bool {
        matches!(self, CommitType::Known(k) if *k == known)
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.friendly_name())
    }
}

/// A commit whose subject follows the Conventional Commits grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalCommit {
    pub description: String,
    pub hash: String,
    pub scope: Option<String>,
    pub commit_type: CommitType,
    pub is_breaking: bool,
}

impl ConventionalCommit {
    pub fn new(
        description: impl Into<String>,
        hash: impl Into<String>,
        scope: Option<String>,
        commit_type: CommitType,
        is_breaking: bool,
    ) -> Self {
        ConventionalCommit {
            description: description.into(),
            hash: hash.into(),
            scope,
            commit_type,
            is_breaking,
        }
    }

    /// Classify a commit against the Conventional Commits grammar.
    ///
    /// Supports formats:
    /// - type(scope)!: description
    /// - type(scope): description
    /// - type!: description
    /// - type: description
    ///
    /// Returns `None` when the subject has no colon, or when anything other than
    /// letters, `(`, `)` and `!` precedes it (e.g. "commit author: Smokes").
    pub fn classify(commit: &CommitRecord) -> Option<Self> {
        let subject = commit.subject.as_str();
        let colon_index = subject.find(':')?;
        let prefix = &subject[..colon_index];

        if prefix
            .chars()
            .any(|c| !(c.is_alphabetic() || matches!(c, '(' | ')' | '!')))
        {
            return None;
        }

        let type_token = prefix.to_lowercase();

        let (bare_type, scope) = match SCOPE_RE.captures(&type_token) {
            Some(captures) => {
                let segment = captures.get(0).map(|m| m.as_str()).unwrap_or_default();
                let scope = captures
                    .get(1)
                    .map(|m| m.as_str().replace('(', ""))
                    .unwrap_or_default();
                (type_token.replace(segment, ""), Some(scope))
            }
            None => (type_token.clone(), None),
        };

        let (label, has_exclamation) = match bare_type.strip_suffix('!') {
            Some(label) => (label, true),
            None => (bare_type.as_str(), false),
        };

        let body_declares_breaking = commit
            .body
            .as_deref()
            .is_some_and(|body| BREAKING_CHANGE_FOOTERS.iter().any(|f| body.contains(f)));

        Some(ConventionalCommit {
            description: subject[colon_index + 1..].trim().to_string(),
            hash: commit.hash.clone(),
            scope,
            commit_type: CommitType::from_label(label),
            is_breaking: has_exclamation || body_declares_breaking,
        })
    }

    pub fn friendly_name(&self) -> String {
        self.commit_type.friendly_name()
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
