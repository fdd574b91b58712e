//! Configuration constants and settings

use std::path::PathBuf;
use std::time::Duration;

// Concurrency Configuration
//
// Querying a repository spawns two short-lived git processes. The work is mostly
// process startup and disk reads, so a few more jobs than cores keeps the CPU busy
// without thrashing the disk on large workspaces.

/// Upper bound for the default number of repositories queried at once
pub const QUERY_CONCURRENT_CAP: usize = 12;

/// Determines how many repositories are queried concurrently
///
/// Priority order:
/// 1. --sequential flag → 1
/// 2. --jobs N flag → N
/// 3. Smart default → min(CPU_CORES + 2, 12)
pub fn get_query_concurrency(jobs: Option<usize>, sequential: bool) -> usize {
    if sequential {
        return 1;
    }

    if let Some(n) = jobs {
        return n.max(1); // Ensure at least 1
    }

    let cpu_count = num_cpus::get();
    (cpu_count + 2).min(QUERY_CONCURRENT_CAP)
}

/// Number of threads used by the directory walker
pub fn get_walk_threads() -> usize {
    num_cpus::get().clamp(1, MAX_WALK_THREADS)
}

// Hand-off queue between the scanner and the aggregation worker.
// The scanner blocks once this many discovered repositories are waiting.
pub const QUEUE_CAPACITY: usize = 10;

// Timeout for a single git invocation
pub const GIT_OPERATION_TIMEOUT_SECS: u64 = 180;

// Walker threads are capped; beyond this the disk is the bottleneck
pub const MAX_WALK_THREADS: usize = 8;

// Name of the directory (or gitdir file) that marks a repository root
pub const GIT_MARKER: &str = ".git";

// Prefix of a .git file pointing at the real git directory (worktrees, submodules)
pub const GITDIR_PREFIX: &str = "gitdir:";

// Directories to skip during repository search
pub const SKIP_DIRECTORIES: &[&str] = &["node_modules"];

// UI Constants
pub const SCANNING_MESSAGE: &str = "🔍 Scanning for git repositories...";
pub const NOTHING_TO_REPORT_MESSAGE: &str = "✅ No unpushed branches or uncommitted changes found.";
pub const PROGRESS_TEMPLATE: &str = "{spinner} {prefix:.bold} {wide_msg}";
pub const PROGRESS_TICK_MS: u64 = 120;

/// Settings for one scan of a directory tree
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root directory to walk
    pub root: PathBuf,
    /// Directory names whose subtrees are never searched
    pub skip_dirs: Vec<String>,
    /// Capacity of the hand-off queue between scanner and worker
    pub queue_capacity: usize,
    /// Maximum number of repositories queried at the same time
    pub jobs: usize,
    /// Timeout applied to every git invocation
    pub git_timeout: Duration,
    /// Follow symbolic links while walking
    pub follow_links: bool,
    /// Walker threads
    pub threads: usize,
}

impl ScanConfig {
    /// Creates a configuration with default settings for the given root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            skip_dirs: SKIP_DIRECTORIES.iter().map(|s| (*s).to_string()).collect(),
            queue_capacity: QUEUE_CAPACITY,
            jobs: get_query_concurrency(None, false),
            git_timeout: Duration::from_secs(GIT_OPERATION_TIMEOUT_SECS),
            follow_links: false,
            threads: get_walk_threads(),
        }
    }

    /// Adds extra directory names to the skip list, ignoring duplicates
    pub fn with_extra_skips<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.skip_dirs.contains(&name) {
                self.skip_dirs.push(name);
            }
        }
        self
    }

    /// Returns true if a directory with this name must not be searched
    pub fn is_skipped(&self, name: &str) -> bool {
        self.skip_dirs.iter().any(|skip| skip == name)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
