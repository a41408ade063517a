use crate::clock::Clock;
use crate::domain::{
    BumpType, CommitRecord, ConventionalCommit, KnownType, ReleaseNotes, SemanticVersion,
    FIELD_SEPARATOR,
};
use crate::error::{ReleaseError, Result};
use crate::git::{GitClient, LogRange};
use tracing::{debug, info};

pub const DEFAULT_NO_FORMATTED_COMMITS_MESSAGE: &str = "No formatted commits";

/// Options for a single release analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerOptions {
    /// Follow Conventional Commits strictly: `fix` is a patch and `hotfix` bumps nothing.
    pub strict: bool,
    pub hide_commit_hashes: bool,
    /// When set, only proceed if the current branch has conventional commits of its own
    pub target_branch: Option<String>,
    pub no_formatted_commits_message: String,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        AnalyzerOptions {
            strict: false,
            hide_commit_hashes: false,
            target_branch: None,
            no_formatted_commits_message: DEFAULT_NO_FORMATTED_COMMITS_MESSAGE.to_string(),
        }
    }
}

/// The most recent release tag, by semantic version order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    pub name: String,
    pub version: SemanticVersion,
}

/// Analyzes repository history to decide the next version and its release notes
pub struct ReleaseAnalyzer {
    options: AnalyzerOptions,
}

impl ReleaseAnalyzer {
    /// Create a new release analyzer
    pub fn new(options: AnalyzerOptions) -> Self {
        ReleaseAnalyzer { options }
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    /// Run the full pipeline: tags, baseline, commits, bump, release notes.
    ///
    /// Fails only with [ReleaseError::NoFormattedCommits] (or a collaborator error)
    /// when no conventional commits are available to base a release on.
    pub fn analyze<G, C>(&self, git: &G, clock: &C) -> Result<ReleaseNotes>
    where
        G: GitClient + ?Sized,
        C: Clock + ?Sized,
    {
        let tags = git.list_tags()?;
        debug!(count = tags.len(), "listed tags");
        let latest = Self::latest_release_tag(&tags);
        let baseline = latest
            .as_ref()
            .map(|tag| tag.version.clone())
            .unwrap_or_else(SemanticVersion::initial);
        info!(
            tag = latest.as_ref().map(|t| t.name.as_str()).unwrap_or("<none>"),
            baseline = %baseline,
            "selected baseline version"
        );

        if let Some(target) = &self.options.target_branch {
            let entries = git.log(&LogRange::Branch(target.clone()))?;
            let branch_commits = Self::classify_entries(&entries);
            debug!(
                target = %target,
                count = branch_commits.len(),
                "conventional commits only on current branch"
            );
            if branch_commits.is_empty() {
                return Err(self.no_formatted_commits());
            }
        }

        let range = LogRange::SinceTag(latest.map(|tag| tag.name));
        let entries = git.log(&range)?;
        let commits = Self::classify_entries(&entries);
        if commits.is_empty() {
            return Err(self.no_formatted_commits());
        }

        let bump_type = self.determine_bump(&commits);
        let version = baseline.bump(bump_type);
        info!(
            bump = %bump_type,
            version = %version,
            commits = commits.len(),
            "computed next version"
        );

        Ok(ReleaseNotes::new(
            version,
            bump_type,
            commits,
            self.options.hide_commit_hashes,
            clock.today(),
        ))
    }

    /// Decide the bump type for a set of conventional commits.
    ///
    /// Evaluated in order, first match wins:
    /// 1. any breaking change -> major
    /// 2. any `feat`, or any `fix` when lenient -> minor
    /// 3. any `fix` when strict -> patch
    /// 4. any `hotfix` when lenient -> patch
    /// 5. otherwise -> none
    pub fn determine_bump(&self, commits: &[ConventionalCommit]) -> BumpType {
        let strict = self.options.strict;
        let has = |known: KnownType| commits.iter().any(|c| c.commit_type.is(known));

        if commits.iter().any(|c| c.is_breaking) {
            BumpType::Major
        } else if has(KnownType::Feat) || (has(KnownType::Fix) && !strict) {
            BumpType::Minor
        } else if has(KnownType::Fix) && strict {
            BumpType::Patch
        } else if has(KnownType::Hotfix) && !strict {
            BumpType::Patch
        } else {
            BumpType::None
        }
    }

    /// Pick the highest semantic version among `tags`, ignoring tags that do not parse
    pub fn latest_release_tag(tags: &[String]) -> Option<ReleaseTag> {
        tags.iter()
            .filter_map(|name| match SemanticVersion::parse(name) {
                Some(version) => Some(ReleaseTag {
                    name: name.clone(),
                    version,
                }),
                None => {
                    debug!(tag = %name, "skipping tag that is not a semantic version");
                    None
                }
            })
            .max_by(|lhs, rhs| lhs.version.cmp(&rhs.version))
    }

    /// Parse and classify raw log entries, dropping anything malformed or non-conventional
    pub fn classify_entries(entries: &[String]) -> Vec<ConventionalCommit> {
        let commits: Vec<ConventionalCommit> = entries
            .iter()
            .filter_map(|entry| CommitRecord::parse(entry, FIELD_SEPARATOR))
            .filter_map(|record| ConventionalCommit::classify(&record))
            .collect();

        debug!(
            entries = entries.len(),
            conventional = commits.len(),
            "classified log entries"
        );
        commits
    }

    fn no_formatted_commits(&self) -> ReleaseError {
        ReleaseError::no_formatted_commits(self.options.no_formatted_commits_message.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::git::MockGitClient;

    fn analyzer(strict: bool) -> ReleaseAnalyzer {
        ReleaseAnalyzer::new(AnalyzerOptions {
            strict,
            ..AnalyzerOptions::default()
        })
    }

    fn classify(subjects: &[&str]) -> Vec<ConventionalCommit> {
        subjects
            .iter()
            .map(|s| ConventionalCommit::classify(&CommitRecord::new("abcdef", *s, None)).unwrap())
            .collect()
    }

    fn next_version(git: &MockGitClient, strict: bool) -> (SemanticVersion, BumpType) {
        let notes = analyzer(strict).analyze(git, &FixedClock::epoch()).unwrap();
        (notes.version, notes.bump_type)
    }

    #[test]
    fn test_bump_breaking_wins() {
        let commits = classify(&["feat: one", "feat: two", "fix(core)!: breaking"]);
        assert_eq!(analyzer(false).determine_bump(&commits), BumpType::Major);
        assert_eq!(analyzer(true).determine_bump(&commits), BumpType::Major);
    }

    #[test]
    fn test_bump_feature_is_minor() {
        let commits = classify(&["feat(auth): add oauth", "fix: typo"]);
        assert_eq!(analyzer(false).determine_bump(&commits), BumpType::Minor);
        assert_eq!(analyzer(true).determine_bump(&commits), BumpType::Minor);
    }

    #[test]
    fn test_bump_fix_depends_on_strictness() {
        let commits = classify(&["fix: bug"]);
        assert_eq!(analyzer(false).determine_bump(&commits), BumpType::Minor);
        assert_eq!(analyzer(true).determine_bump(&commits), BumpType::Patch);
    }

    #[test]
    fn test_bump_hotfix_depends_on_strictness() {
        let commits = classify(&["hotfix: prod"]);
        assert_eq!(analyzer(false).determine_bump(&commits), BumpType::Patch);
        assert_eq!(analyzer(true).determine_bump(&commits), BumpType::None);
    }

    #[test]
    fn test_bump_fix_and_hotfix() {
        let commits = classify(&["hotfix: prod", "fix: bug"]);
        assert_eq!(analyzer(false).determine_bump(&commits), BumpType::Minor);
        assert_eq!(analyzer(true).determine_bump(&commits), BumpType::Patch);
    }

    #[test]
    fn test_bump_other_types_is_none() {
        let commits = classify(&["docs: readme", "chore: deps", "style: fmt", "test: more"]);
        assert_eq!(analyzer(false).determine_bump(&commits), BumpType::None);
    }

    #[test]
    fn test_bump_breaking_footer_on_chore() {
        let record = CommitRecord::new(
            "abc123",
            "chore: drop old api",
            Some("BREAKING CHANGE: removed".to_string()),
        );
        let commits = vec![ConventionalCommit::classify(&record).unwrap()];
        assert_eq!(analyzer(true).determine_bump(&commits), BumpType::Major);
    }

    #[test]
    fn test_latest_release_tag() {
        let tags: Vec<String> = ["1.0.0", "1.4.0", "1.3.0", "1.2.0", "1.4.1", "1.1.0", "nightly"]
            .iter()
            .map(|t| t.to_string())
            .collect();
        let latest = ReleaseAnalyzer::latest_release_tag(&tags).unwrap();
        assert_eq!(latest.name, "1.4.1");
        assert_eq!(latest.version, SemanticVersion::new(1, 4, 1));
    }

    #[test]
    fn test_latest_release_tag_keeps_tag_name() {
        let tags = vec!["v0.9.0".to_string(), "v1.0.0-rc1".to_string(), "v1.0.0".to_string()];
        let latest = ReleaseAnalyzer::latest_release_tag(&tags).unwrap();
        assert_eq!(latest.name, "v1.0.0");
    }

    #[test]
    fn test_latest_release_tag_none() {
        assert_eq!(ReleaseAnalyzer::latest_release_tag(&[]), None);
        assert_eq!(
            ReleaseAnalyzer::latest_release_tag(&["latest".to_string()]),
            None
        );
    }

    #[test]
    fn test_analyze_no_tags_single_feature() {
        let git = MockGitClient::new().with_subjects(&["feat: Awesome feature"]);
        assert_eq!(
            next_version(&git, false),
            (SemanticVersion::new(0, 1, 0), BumpType::Minor)
        );
        assert_eq!(
            next_version(&git, true),
            (SemanticVersion::new(0, 1, 0), BumpType::Minor)
        );
    }

    #[test]
    fn test_analyze_no_tags_single_fix() {
        let git = MockGitClient::new().with_subjects(&["fix: Awesome bug fix"]);
        assert_eq!(
            next_version(&git, false),
            (SemanticVersion::new(0, 1, 0), BumpType::Minor)
        );
        assert_eq!(
            next_version(&git, true),
            (SemanticVersion::new(0, 0, 1), BumpType::Patch)
        );
    }

    #[test]
    fn test_analyze_no_tags_single_hotfix() {
        let git = MockGitClient::new().with_subjects(&["hotfix: Awesome hotfix"]);
        assert_eq!(
            next_version(&git, false),
            (SemanticVersion::new(0, 0, 1), BumpType::Patch)
        );
        assert_eq!(
            next_version(&git, true),
            (SemanticVersion::new(0, 0, 0), BumpType::None)
        );
    }

    #[test]
    fn test_analyze_no_tags_breaking_changes() {
        for subject in ["feat!: x", "fix!: x", "hotfix!: My bugfix"] {
            let git = MockGitClient::new().with_subjects(&[subject]);
            assert_eq!(
                next_version(&git, false),
                (SemanticVersion::new(1, 0, 0), BumpType::Major),
                "subject: {}",
                subject
            );
        }
    }

    #[test]
    fn test_analyze_with_tags() {
        let git = MockGitClient::new()
            .with_tags(["1.0.0", "1.2.0", "0.6.0"])
            .with_subjects(&["chore: Awesome chore", "fix: Awesome bug fix"]);
        assert_eq!(next_version(&git, false).0, SemanticVersion::new(1, 3, 0));
    }

    #[test]
    fn test_analyze_skips_tags_that_cannot_be_bumped() {
        let git = MockGitClient::new()
            .with_tags(["18446744073709551615.0.0", "2.0.0"])
            .with_subjects(&["feat!: x"]);
        assert_eq!(next_version(&git, false).0, SemanticVersion::new(3, 0, 0));
    }

    #[test]
    fn test_analyze_requests_commits_since_tag_name() {
        let git = MockGitClient::new()
            .with_tags(["v1.0.0", "v1.2.0", "junk"])
            .with_subjects(&["feat: x"]);
        analyzer(false).analyze(&git, &FixedClock::epoch()).unwrap();
        assert_eq!(
            git.requests(),
            vec![LogRange::SinceTag(Some("v1.2.0".to_string()))]
        );
    }

    #[test]
    fn test_analyze_no_commits_fails_with_message() {
        let git = MockGitClient::new();
        let err = analyzer(false)
            .analyze(&git, &FixedClock::epoch())
            .unwrap_err();
        assert!(matches!(err, ReleaseError::NoFormattedCommits(_)));
        assert_eq!(err.to_string(), "No formatted commits");
    }

    #[test]
    fn test_analyze_only_unparseable_commits_fails() {
        let git = MockGitClient::new()
            .with_raw_entry("not a log entry")
            .with_subjects(&["wip", "commit author: Smokes", "Merge stuff"]);
        let err = ReleaseAnalyzer::new(AnalyzerOptions {
            no_formatted_commits_message: "Use conventional commits!".to_string(),
            ..AnalyzerOptions::default()
        })
        .analyze(&git, &FixedClock::epoch())
        .unwrap_err();
        assert_eq!(err.to_string(), "Use conventional commits!");
    }

    #[test]
    fn test_analyze_branch_gate_without_branch_commits() {
        let git = MockGitClient::new().with_subjects(&["feat: already on main"]);
        let options = AnalyzerOptions {
            target_branch: Some("main".to_string()),
            ..AnalyzerOptions::default()
        };
        let err = ReleaseAnalyzer::new(options)
            .analyze(&git, &FixedClock::epoch())
            .unwrap_err();
        assert!(matches!(err, ReleaseError::NoFormattedCommits(_)));
        assert_eq!(git.requests(), vec![LogRange::Branch("main".to_string())]);
    }

    #[test]
    fn test_analyze_branch_gate_passes_then_uses_full_history() {
        let git = MockGitClient::new()
            .with_subjects(&["chore: Add README.md", "feat: My awesome feature"])
            .with_branch_commit(CommitRecord::new("abc123", "feat: My awesome feature", None));
        let options = AnalyzerOptions {
            target_branch: Some("main".to_string()),
            hide_commit_hashes: true,
            ..AnalyzerOptions::default()
        };
        let notes = ReleaseAnalyzer::new(options)
            .analyze(&git, &FixedClock::epoch())
            .unwrap();

        assert_eq!(notes.version, SemanticVersion::new(0, 1, 0));
        assert_eq!(notes.commits.len(), 2);
        assert_eq!(
            notes.markdown(),
            "## [0.1.0] - 1970-01-01\n\n### Features\n* My awesome feature\n\n### Chores\n* Add README.md"
        );
    }

    #[test]
    fn test_analyze_stamps_clock_date() {
        use chrono::{NaiveDate, TimeZone, Utc};

        let git = MockGitClient::new().with_subjects(&["feat: x"]);
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 4, 19, 8, 0, 0).unwrap());
        let notes = analyzer(false).analyze(&git, &clock).unwrap();
        assert_eq!(notes.date, NaiveDate::from_ymd_opt(2024, 4, 19).unwrap());
    }
}
