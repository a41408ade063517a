use crate::domain::conventional::ConventionalCommit;
use crate::domain::version::{BumpType, SemanticVersion};
use crate::error::Result;
use chrono::NaiveDate;
use serde::Serialize;

/// Release notes for one computed release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseNotes {
    pub version: SemanticVersion,
    pub bump_type: BumpType,
    pub commits: Vec<ConventionalCommit>,
    pub hide_commit_hashes: bool,
    pub date: NaiveDate,
}

/// JSON envelope handed to consumers. Field order is part of the output format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReleaseNotesEnvelope {
    bump_type: BumpType,
    release_notes: String,
    version: String,
}

impl ReleaseNotes {
    pub fn new(
        version: SemanticVersion,
        bump_type: BumpType,
        commits: Vec<ConventionalCommit>,
        hide_commit_hashes: bool,
        date: NaiveDate,
    ) -> Self {
        ReleaseNotes {
            version,
            bump_type,
            commits,
            hide_commit_hashes,
            date,
        }
    }

    pub fn contains_breaking_change(&self) -> bool {
        self.commits.iter().any(|commit| commit.is_breaking)
    }

    /// Commits grouped by friendly type name, in release-notes order.
    ///
    /// Within a group commits keep their input order.
    pub fn groups(&self) -> Vec<(String, Vec<&ConventionalCommit>)> {
        let mut groups: Vec<(String, Vec<&ConventionalCommit>)> = Vec::new();

        for commit in &self.commits {
            let name = commit.friendly_name();
            match groups.iter_mut().find(|(existing, _)| *existing == name) {
                Some((_, members)) => members.push(commit),
                None => groups.push((name, vec![commit])),
            }
        }

        groups.sort_by(|(lhs, _), (rhs, _)| {
            group_priority(lhs)
                .cmp(&group_priority(rhs))
                .then_with(|| lhs.cmp(rhs))
        });
        groups
    }

    /// Render the release notes as Markdown
    pub fn markdown(&self) -> String {
        let sections: Vec<String> = self
            .groups()
            .into_iter()
            .map(|(name, commits)| {
                let bullets: Vec<String> = commits.iter().map(|c| self.bullet(c)).collect();
                format!("### {}\n{}", pluralize(&name), bullets.join("\n"))
            })
            .collect();

        format!(
            "## [{}] - {}\n\n{}",
            self.version,
            self.date.format("%Y-%m-%d"),
            sections.join("\n\n")
        )
    }

    /// Render the `{bumpType, releaseNotes, version}` JSON envelope
    pub fn to_json(&self) -> Result<String> {
        let envelope = ReleaseNotesEnvelope {
            bump_type: self.bump_type,
            release_notes: self.markdown(),
            version: self.version.to_string(),
        };
        Ok(serde_json::to_string_pretty(&envelope)?)
    }

    fn bullet(&self, commit: &ConventionalCommit) -> String {
        let marker = if commit.is_breaking {
            "[**BREAKING CHANGE**] "
        } else {
            ""
        };

        if self.hide_commit_hashes {
            format!("* {}{}", marker, commit.description)
        } else {
            format!("* {}{} ({})", marker, commit.description, commit.hash)
        }
    }
}

/// Features, then bug fixes, then hotfixes, then everything else.
fn group_priority(name: &str) -> u8 {
    let name = name.to_lowercase();
    if name.contains("feature") {
        0
    } else if name.contains("bug fix") {
        1
    } else if name.contains("hotfix") {
        2
    } else {
        3
    }
}

/// Narrow English pluralization for group headers.
fn pluralize(name: &str) -> String {
    if name.ends_with('x') {
        format!("{}es", name)
    } else if name.ends_with('s') {
        name.to_string()
    } else {
        format!("{}s", name)
    }
}
