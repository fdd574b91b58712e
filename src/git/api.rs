//! Public API for git queries.
//!
//! This module provides the stable public API for querying a repository:
//! - Local branches that were never pushed
//! - Uncommitted change counts
//! - Typed errors distinguishing a missing git from git reporting an error
//!
//! ## Example: Inspecting one repository
//!
//! ```rust,no_run
//! use local_changes::git::{GitCli, RepositoryQuery};
//! use std::path::Path;
//!
//! async fn check(path: &Path) {
//!     let git = GitCli::new();
//!     if let Ok(branches) = git.unpushed_branches(path).await {
//!         for (branch, commit) in branches.iter() {
//!             println!("{branch} at {commit} was never pushed");
//!         }
//!     }
//! }
//! ```

// Query adapter
pub use super::operations::{run_git, GitCli, RepositoryQuery};

// Errors
pub use super::error::QueryError;

// Output parsing
pub use super::parse::{count_status_lines, parse_unpushed_branches, UnpushedBranches};
