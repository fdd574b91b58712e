//! Repository discovery
//!
//! The scanner walks a directory tree and decides, per directory, whether to
//! descend into it, prune it, or emit it as a repository root and prune it.
//! Discovered roots are pushed into the hand-off queue as soon as they are found
//! so the aggregation worker can start querying while the walk continues.

use dashmap::DashMap;
use ignore::{WalkBuilder, WalkState};
use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use thiserror::Error;

use super::config::{ScanConfig, GITDIR_PREFIX, GIT_MARKER};
use super::queue::{QueueClosed, RepoSender};

/// A scan that could not complete. Fatal to the whole run.
#[derive(Debug, Error)]
pub enum ScanError {
    /// An entry of the tree could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The scan was interrupted before the tree was fully visited
    #[error("scan cancelled")]
    Cancelled,

    /// The scanner thread panicked or was aborted
    #[error("scanner stopped unexpectedly: {0}")]
    Aborted(#[from] tokio::task::JoinError),
}

/// What the walker does with one directory entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visit {
    /// Search the directory's children
    Descend,
    /// Skip the directory and everything below it
    Prune,
    /// Report the directory as a repository root, then skip everything below it
    Emit(PathBuf),
}

impl Visit {
    fn walk_state(&self) -> WalkState {
        match self {
            Visit::Descend => WalkState::Continue,
            Visit::Prune | Visit::Emit(_) => WalkState::Skip,
        }
    }
}

/// Decides how to handle a directory entry found at `depth` below the scan root
///
/// The skip list is checked before the repository marker, so a repository inside
/// a skipped directory is never seen. The scan root itself is never skipped.
pub fn visit(config: &ScanConfig, path: &Path, depth: usize, is_dir: bool) -> io::Result<Visit> {
    if !is_dir {
        return Ok(Visit::Descend);
    }

    if depth > 0 {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if config.is_skipped(name) {
            return Ok(Visit::Prune);
        }
    }

    if is_repository_root(path)? {
        return Ok(Visit::Emit(path.to_path_buf()));
    }

    Ok(Visit::Descend)
}

/// Returns true if `dir` holds a `.git` directory, or a `.git` file pointing at one
pub fn is_repository_root(dir: &Path) -> io::Result<bool> {
    let marker = dir.join(GIT_MARKER);
    match fs::symlink_metadata(&marker) {
        Ok(meta) if meta.is_dir() => Ok(true),
        Ok(meta) if meta.is_file() => Ok(is_git_file(&marker)),
        Ok(_) => Ok(false),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Check if a .git file (for submodules/worktrees) contains gitdir reference
/// Only reads the first 5 lines for efficiency
fn is_git_file(path: &Path) -> bool {
    match fs::File::open(path) {
        Ok(file) => BufReader::new(file)
            .lines()
            .take(5)
            .map_while(Result::ok)
            .any(|line| line.trim_start().starts_with(GITDIR_PREFIX)),
        Err(_) => false,
    }
}

/// Walks `config.root` and pushes every repository root into `sender`
///
/// Returns the number of repositories emitted. The queue is closed when this
/// function returns, whether the walk completed, failed or was cancelled. If the
/// consumer hangs up early the walk stops and returns the count so far.
pub fn scan(config: &ScanConfig, sender: RepoSender, cancel: &AtomicBool) -> Result<usize, ScanError> {
    let result = walk(config, cancel, |repo| sender.send_blocking(repo));
    sender.close();
    result
}

/// Recursively searches for git repositories from a specific path
///
/// Runs the same traversal as [`scan`] without a consumer and returns the
/// discovered roots sorted by path.
pub fn find_repos_from_path(search_path: impl AsRef<Path>) -> Result<Vec<PathBuf>, ScanError> {
    let config = ScanConfig::new(search_path.as_ref());
    let cancel = AtomicBool::new(false);
    let repos = Mutex::new(Vec::new());

    walk(&config, &cancel, |repo| {
        repos
            .lock()
            .expect("Failed to acquire repository list lock")
            .push(repo);
        Ok(())
    })?;

    let mut repos = repos
        .into_inner()
        .expect("Failed to acquire repository list lock");
    repos.sort();
    Ok(repos)
}

fn walk<F>(config: &ScanConfig, cancel: &AtomicBool, emit: F) -> Result<usize, ScanError>
where
    F: Fn(PathBuf) -> Result<(), QueueClosed> + Sync,
{
    // Canonical paths already emitted; followed symlinks can reach a repository twice
    let seen: DashMap<PathBuf, ()> = DashMap::new();
    let emitted = AtomicUsize::new(0);
    let failure: Mutex<Option<ScanError>> = Mutex::new(None);

    let record_failure = |err: ScanError| {
        let mut slot = failure.lock().expect("Failed to acquire scan error lock");
        if slot.is_none() {
            *slot = Some(err);
        }
        WalkState::Quit
    };

    let walker = WalkBuilder::new(&config.root)
        .standard_filters(false) // Walk hidden and ignored directories too
        .follow_links(config.follow_links)
        .threads(config.threads.max(1))
        .build_parallel();

    walker.run(|| {
        let emit = &emit;
        let seen = &seen;
        let emitted = &emitted;
        let record_failure = &record_failure;

        Box::new(move |entry: Result<ignore::DirEntry, ignore::Error>| {
            if cancel.load(Ordering::Relaxed) {
                return record_failure(ScanError::Cancelled);
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = error_path(&err)
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| config.root.clone());
                    return record_failure(ScanError::Traversal {
                        path,
                        source: Box::new(err),
                    });
                }
            };

            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            let decision = match visit(config, entry.path(), entry.depth(), is_dir) {
                Ok(decision) => decision,
                Err(err) => {
                    return record_failure(ScanError::Traversal {
                        path: entry.path().to_path_buf(),
                        source: Box::new(err),
                    });
                }
            };

            if let Visit::Emit(repo) = &decision {
                let key = repo.canonicalize().unwrap_or_else(|_| repo.clone());
                if seen.insert(key, ()).is_none() {
                    tracing::debug!("Found git repository: {}", repo.display());
                    if emit(repo.clone()).is_err() {
                        tracing::debug!("Repository queue closed, stopping scan");
                        return WalkState::Quit;
                    }
                    emitted.fetch_add(1, Ordering::Relaxed);
                }
            }

            decision.walk_state()
        })
    });

    if let Some(err) = failure
        .into_inner()
        .expect("Failed to acquire scan error lock")
    {
        return Err(err);
    }

    Ok(emitted.load(Ordering::Relaxed))
}

/// Finds the path an `ignore` error refers to, if it carries one
fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path),
        ignore::Error::Loop { child, .. } => Some(child),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Partial(errs) => errs.iter().find_map(error_path),
        _ => None,
    }
}
