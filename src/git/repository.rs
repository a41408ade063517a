use crate::domain::{CommitRecord, FIELD_SEPARATOR};
use crate::error::Result;
use crate::git::{GitClient, LogRange};
use git2::{Commit, ErrorCode, Oid, Repository as Git2Repo};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads tags and history through libgit2
///
/// Holds the resolved `.git` directory and opens the repository per call, so the
/// client is `Send + Sync` without sharing a `git2::Repository` across threads.
#[derive(Debug, Clone)]
pub struct Git2Client {
    git_dir: PathBuf,
}

impl Git2Client {
    /// Discover the git repository containing `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Ok(Git2Client {
            git_dir: repo.path().to_path_buf(),
        })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: &Git2Repo) -> Self {
        Git2Client {
            git_dir: repo.path().to_path_buf(),
        }
    }

    fn repository(&self) -> Result<Git2Repo> {
        Ok(Git2Repo::open(&self.git_dir)?)
    }
}

/// Resolve a ref name to the commit it ultimately points at
fn resolve_commit(repo: &Git2Repo, refname: &str) -> Result<Oid> {
    let object = repo.revparse_single(refname)?;
    Ok(object.peel_to_commit()?.id())
}

fn format_entry(commit: &Commit<'_>) -> Result<String> {
    let short_id = commit.as_object().short_id()?;
    let hash = short_id
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| commit.id().to_string());

    let record = CommitRecord::new(
        hash,
        commit.summary().unwrap_or_default(),
        Some(commit.body().unwrap_or_default().to_string()),
    );
    Ok(record.to_log_entry(FIELD_SEPARATOR))
}

impl GitClient for Git2Client {
    fn list_tags(&self) -> Result<Vec<String>> {
        let repo = self.repository()?;
        let tags = repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn log(&self, range: &LogRange) -> Result<Vec<String>> {
        let repo = self.repository()?;

        // A repository without commits has no history to report.
        match repo.head() {
            Ok(_) => {}
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                debug!("HEAD is unborn, no commits to list");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        }

        let mut revwalk = repo.revwalk()?;
        match range {
            LogRange::SinceTag(tag) => {
                revwalk.push_head()?;
                if let Some(tag) = tag {
                    revwalk.hide(resolve_commit(&repo, &format!("refs/tags/{}", tag))?)?;
                }
            }
            LogRange::Branch(target) => {
                // HEAD may be detached and then belongs to no ref.
                revwalk.push_head()?;
                for reference in repo.references()? {
                    if let Ok(commit) = reference?.peel_to_commit() {
                        revwalk.push(commit.id())?;
                    }
                }
                revwalk.hide(resolve_commit(&repo, target)?)?;
            }
        }
        revwalk.set_sorting(git2::Sort::TIME)?;

        let mut entries = Vec::new();
        for oid_result in revwalk {
            let commit = repo.find_commit(oid_result?)?;

            if commit.parent_count() > 1 {
                continue;
            }

            entries.push(format_entry(&commit)?);
        }

        debug!(range = %range, count = entries.len(), "listed commits");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_outside_repository_does_not_panic() {
        let temp_dir = TempDir::new().unwrap();
        // A temp dir may live under a repository on some machines; only assert
        // that opening never panics.
        let _ = Git2Client::open(temp_dir.path());
    }

    #[test]
    fn test_empty_repository_has_no_commits() {
        let temp_dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(temp_dir.path()).unwrap();
        let client = Git2Client::from_git2(&repo);

        assert!(client.list_tags().unwrap().is_empty());
        assert!(client.log(&LogRange::SinceTag(None)).unwrap().is_empty());
        assert!(client
            .log(&LogRange::Branch("main".to_string()))
            .unwrap()
            .is_empty());
    }
}
