//! Git repository operations

use std::path::Path;

use anyhow::{Context, Result};
use git2::{Repository, Sort};

use super::commit::{CommitRecord, CommitSource};

/// Git repository wrapper
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Open the repository containing the given path, searching parent directories
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::discover(path)
            .with_context(|| format!("Not in a git repository: {}", path.display()))?;

        Ok(Self { repo })
    }

    /// Get repository path (the `.git` directory)
    pub fn path(&self) -> &Path {
        self.repo.path()
    }

    /// Get workdir path
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Get the repository root: the workdir, or the git directory for bare repositories
    pub fn root(&self) -> &Path {
        self.workdir().unwrap_or_else(|| self.path())
    }

    /// Get every commit reachable from any reference or HEAD, newest first
    pub fn get_all_commits(&self) -> Result<Vec<CommitRecord>> {
        let mut walker = self.repo.revwalk().context("Failed to create revwalk")?;
        walker
            .set_sorting(Sort::TIME)
            .context("Failed to set revwalk sorting")?;

        let references = self
            .repo
            .references()
            .context("Failed to list references")?;

        for reference in references {
            let reference = reference.context("Failed to read reference")?;
            match reference.peel_to_commit() {
                Ok(commit) => walker
                    .push(commit.id())
                    .context("Failed to push reference commit")?,
                Err(e) => tracing::debug!(
                    "Skipping reference {:?} that does not point at a commit: {e}",
                    reference.name()
                ),
            }
        }

        // Detached HEAD is not covered by any reference.
        if let Ok(head) = self.repo.head() {
            if let Ok(commit) = head.peel_to_commit() {
                walker
                    .push(commit.id())
                    .context("Failed to push HEAD commit")?;
            }
        }

        let mut commits = Vec::new();
        for oid in walker {
            let oid = oid.context("Failed to get commit OID from walker")?;
            let commit = self
                .repo
                .find_commit(oid)
                .context("Failed to find commit")?;

            match CommitRecord::from_git_commit(&commit) {
                Some(record) => commits.push(record),
                None => tracing::debug!("Skipping commit {oid} with non UTF-8 message"),
            }
        }

        tracing::debug!("Read {} commits from {}", commits.len(), self.root().display());
        Ok(commits)
    }
}

impl CommitSource for GitRepository {
    fn commits(&self) -> Result<Vec<CommitRecord>> {
        self.get_all_commits()
    }
}
