//! Common test utilities and helpers
#![allow(dead_code, unused_imports)]

pub mod fixtures;
pub mod git;

pub use self::fixtures::{TestRepo, TestRepoBuilder};
pub use self::git::{create_multiple_repos, is_git_available, setup_git_repo};

use std::path::PathBuf;
use tempfile::TempDir;

/// A temp directory with a `workspace/` to scan and room for bare remotes beside it
pub struct TestWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("workspace");
        std::fs::create_dir(&root).expect("Failed to create workspace directory");
        Self { temp_dir, root }
    }

    pub fn add(&self, builder: TestRepoBuilder) -> TestRepo {
        builder.build(&self.root).expect("Failed to create test repo")
    }
}
