//! Public API for the core module.
//!
//! This module provides the stable public API for core functionality including:
//! - Repository discovery
//! - The scanner/worker pipeline and its hand-off queue
//! - Result records
//! - Configuration utilities
//!
//! Internal implementation details are not exposed through this API.

// Discovery
pub use super::discovery::{find_repos_from_path, is_repository_root, scan, visit, ScanError, Visit};

// Pipeline
pub use super::pipeline::{aggregate, inspect_repository, run};
pub use super::queue::{repo_queue, QueueClosed, RepoReceiver, RepoSender};
pub use super::results::{QueryFailure, ResultCollection, ResultRecord};

// Configuration
pub use super::config::{get_query_concurrency, ScanConfig};
pub use super::config::{GIT_OPERATION_TIMEOUT_SECS, QUEUE_CAPACITY, SKIP_DIRECTORIES};

// Progress display
pub use super::progress::create_scan_progress;
