//! Basic git operations and command execution

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use super::error::QueryError;
use super::parse::{count_status_lines, parse_unpushed_branches, UnpushedBranches};
use crate::core::config::GIT_OPERATION_TIMEOUT_SECS;

// Git command arguments
const GIT_PROGRAM: &str = "git";
// Stops `git status` from refreshing the index, which takes index.lock
const GIT_OPTIONAL_LOCKS_ENV: &str = "GIT_OPTIONAL_LOCKS";
const GIT_UNPUSHED_LOG_ARGS: &[&str] = &[
    "log",
    "--branches",
    "--not",
    "--remotes",
    "--decorate=short",
    "--pretty=format:%h%d",
];
const GIT_STATUS_PORCELAIN_ARGS: &[&str] = &["status", "--porcelain"];

/// Read-only queries the aggregation worker runs against each repository
#[async_trait]
pub trait RepositoryQuery: Send + Sync {
    /// Local branches whose tips are not reachable from any remote-tracking ref
    async fn unpushed_branches(&self, repo: &Path) -> Result<UnpushedBranches, QueryError>;

    /// Number of modified, staged and untracked paths
    async fn uncommitted_changes(&self, repo: &Path) -> Result<usize, QueryError>;
}

/// Queries repositories by running the git command line tool
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
    timeout: Duration,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            program: GIT_PROGRAM.to_string(),
            timeout: Duration::from_secs(GIT_OPERATION_TIMEOUT_SECS),
        }
    }
}

impl GitCli {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a different executable instead of `git` from `PATH`
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Sets the timeout applied to each git invocation
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs a command and returns stdout, turning a non-zero exit into an error
    async fn output(&self, path: &Path, args: &[&str]) -> Result<String, QueryError> {
        let (success, stdout, stderr, code) =
            run_git(&self.program, path, args, self.timeout).await?;

        if success {
            Ok(stdout)
        } else {
            Err(QueryError::Failed {
                repo: path.to_path_buf(),
                command: command_line(&self.program, args),
                code,
                stderr,
            })
        }
    }
}

#[async_trait]
impl RepositoryQuery for GitCli {
    async fn unpushed_branches(&self, repo: &Path) -> Result<UnpushedBranches, QueryError> {
        let stdout = self.output(repo, GIT_UNPUSHED_LOG_ARGS).await?;
        Ok(parse_unpushed_branches(&stdout))
    }

    async fn uncommitted_changes(&self, repo: &Path) -> Result<usize, QueryError> {
        let stdout = self.output(repo, GIT_STATUS_PORCELAIN_ARGS).await?;
        Ok(count_status_lines(&stdout))
    }
}

/// Runs a git command in the specified directory with a timeout
/// Returns (success, stdout, stderr, exit code)
pub async fn run_git(
    program: &str,
    path: &Path,
    args: &[&str],
    timeout: Duration,
) -> Result<(bool, String, String, Option<i32>), QueryError> {
    tracing::trace!("running {} in {}", command_line(program, args), path.display());

    let result = tokio::time::timeout(
        timeout,
        Command::new(program)
            .args(args)
            .current_dir(path)
            .env(GIT_OPTIONAL_LOCKS_ENV, "0")
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output(),
    )
    .await;

    match result {
        Ok(Ok(output)) => Ok((
            output.status.success(),
            String::from_utf8_lossy(&output.stdout).trim().to_string(),
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
            output.status.code(),
        )),
        Ok(Err(e)) => Err(QueryError::Spawn {
            repo: path.to_path_buf(),
            command: command_line(program, args),
            source: e,
        }),
        Err(_) => Err(QueryError::TimedOut {
            repo: path.to_path_buf(),
            command: command_line(program, args),
            secs: timeout.as_secs(),
        }),
    }
}

fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}
