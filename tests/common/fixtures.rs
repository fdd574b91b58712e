//! Test fixtures and builders

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::git::{create_branch_with_commit, create_test_commit, push_to_bare_remote, setup_git_repo};

/// A repository created inside a workspace directory owned by the test
#[allow(dead_code)]
pub struct TestRepo {
    pub path: PathBuf,
    /// Short ids of local-only branch tips, keyed by branch name
    pub local_branches: Vec<(String, String)>,
}

impl TestRepo {
    /// Get the path to the repository
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create or overwrite a file in the working tree
    pub fn create_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let file_path = self.path.join(name);
        std::fs::write(&file_path, content)?;
        Ok(file_path)
    }
}

/// Builder for creating test repositories
///
/// By default the repository has one commit that is pushed to a bare remote,
/// so it reports nothing until branches or changes are added.
pub struct TestRepoBuilder {
    relative_path: PathBuf,
    pushed: bool,
    local_branches: Vec<String>,
    modified_files: usize,
    untracked_files: usize,
}

impl TestRepoBuilder {
    pub fn new(relative_path: impl Into<PathBuf>) -> Self {
        Self {
            relative_path: relative_path.into(),
            pushed: true,
            local_branches: Vec::new(),
            modified_files: 0,
            untracked_files: 0,
        }
    }

    /// Leave the initial branch without any remote
    #[allow(dead_code)]
    pub fn without_remote(mut self) -> Self {
        self.pushed = false;
        self
    }

    /// Add a branch that only exists locally
    pub fn with_local_branch(mut self, name: impl Into<String>) -> Self {
        self.local_branches.push(name.into());
        self
    }

    /// Modify this many tracked files
    pub fn with_modified_files(mut self, count: usize) -> Self {
        self.modified_files = count;
        self
    }

    /// Add this many untracked files
    #[allow(dead_code)]
    pub fn with_untracked_files(mut self, count: usize) -> Self {
        self.untracked_files = count;
        self
    }

    /// Creates the repository below `workspace`; bare remotes go to `workspace/../remotes`
    pub fn build(self, workspace: &Path) -> Result<TestRepo> {
        let path = workspace.join(&self.relative_path);
        std::fs::create_dir_all(&path)?;
        setup_git_repo(&path)?;

        // Initial commit with enough tracked files to modify later
        for i in 0..self.modified_files.max(1) {
            create_test_commit(
                &path,
                &format!("file{i}.txt"),
                &format!("Content {i}"),
                &format!("Add file{i}"),
            )?;
        }

        if self.pushed {
            let remotes_dir = workspace
                .parent()
                .unwrap_or(workspace)
                .join("remotes")
                .join(self.relative_path.to_string_lossy().replace('/', "_"));
            push_to_bare_remote(&path, &remotes_dir)?;
        }

        let mut local_branches = Vec::new();
        for branch in &self.local_branches {
            let commit = create_branch_with_commit(&path, branch)?;
            local_branches.push((branch.clone(), commit));
        }

        let repo = TestRepo {
            path,
            local_branches,
        };

        for i in 0..self.modified_files {
            repo.create_file(&format!("file{i}.txt"), "changed")?;
        }
        for i in 0..self.untracked_files {
            repo.create_file(&format!("untracked{i}.txt"), "new")?;
        }

        Ok(repo)
    }
}
