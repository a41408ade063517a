use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Semantic version with an optional, opaque prerelease suffix
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
}

impl SemanticVersion {
    /// Create a new release version (no prerelease)
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            prerelease: None,
        }
    }

    /// Create a new version carrying a prerelease suffix
    pub fn with_prerelease(
        major: u64,
        minor: u64,
        patch: u64,
        prerelease: impl Into<String>,
    ) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            prerelease: Some(prerelease.into()),
        }
    }

    /// The version every repository starts from when no release tag exists
    pub fn initial() -> Self {
        SemanticVersion::new(0, 0, 0)
    }

    /// Parse a version from a tag name (e.g., "v1.2.3-rc1" -> 1.2.3 with prerelease "rc1").
    ///
    /// Everything after the first `-` is kept verbatim as the prerelease. Returns `None`
    /// for anything that is not a release tag; callers skip such tags.
    pub fn parse(tag: &str) -> Option<Self> {
        let clean_tag = tag.strip_prefix('v').unwrap_or(tag);

        let (core, prerelease) = match clean_tag.split_once('-') {
            Some((core, prerelease)) => (core, Some(prerelease.to_string())),
            None => (clean_tag, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return None;
        }

        // u64::MAX is rejected so that every parsed version can be bumped.
        let component = |part: &str| part.parse::<u64>().ok().filter(|n| *n < u64::MAX);
        let major = component(parts[0])?;
        let minor = component(parts[1])?;
        let patch = component(parts[2])?;

        Some(SemanticVersion {
            major,
            minor,
            patch,
            prerelease,
        })
    }

    /// Bump version according to bump type.
    ///
    /// Every real bump drops the prerelease; `BumpType::None` returns the version unchanged.
    /// Components saturate at `u64::MAX`, which `parse` never produces.
    pub fn bump(&self, bump_type: BumpType) -> Self {
        match bump_type {
            BumpType::Major => SemanticVersion::new(self.major.saturating_add(1), 0, 0),
            BumpType::Minor => SemanticVersion::new(self.major, self.minor.saturating_add(1), 0),
            BumpType::Patch => {
                SemanticVersion::new(self.major, self.minor, self.patch.saturating_add(1))
            }
            BumpType::None => self.clone(),
        }
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.prerelease, &other.prerelease) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                // Plain string ordering: "rc.11" sorts before "rc.2".
                (Some(lhs), Some(rhs)) => lhs.cmp(rhs),
            })
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(prerelease) = &self.prerelease {
            write!(f, "-{}", prerelease)?;
        }
        Ok(())
    }
}

impl FromStr for SemanticVersion {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s).ok_or_else(|| {
            ReleaseError::version(format!(
                "Invalid version format: '{}' - expected [v]X.Y.Z[-prerelease]",
                s
            ))
        })
    }
}

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    Major,
    Minor,
    Patch,
    None,
}

impl BumpType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpType::Major => "major",
            BumpType::Minor => "minor",
            BumpType::Patch => "patch",
            BumpType::None => "none",
        }
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
