//! # local-changes
//!
//! `local-changes` finds work that only exists on this machine: local branches
//! that were never pushed to any remote, and uncommitted changes, across every
//! git repository below a directory. It powers the `local-changes` CLI tool.
//!
//! ## Core Features
//!
//! - **Streaming Discovery**: Repositories are queried while the directory walk is still running.
//! - **Bounded Concurrency**: A fixed number of repositories are queried at once; the walk
//!   pauses when the worker falls behind.
//! - **Read-only**: Only `git log` and `git status` are run. Nothing is fetched or written.
//!
//! ## Example
//!
//! ```rust,no_run
//! use local_changes::core::find_repos_from_path;
//!
//! fn main() -> anyhow::Result<()> {
//!     for repo in find_repos_from_path(".")? {
//!         println!("{}", repo.display());
//!     }
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod core;
pub mod git;
pub mod report;
