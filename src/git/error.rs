//! Errors raised while querying a single repository

use std::path::PathBuf;
use thiserror::Error;

/// A git query against one repository failed
///
/// Every variant names the repository and the command that was run so the
/// failure can be diagnosed from the log line alone.
#[derive(Debug, Error)]
pub enum QueryError {
    /// git could not be started (missing executable, unreadable directory)
    #[error("could not run `{command}` in {}: {source}", .repo.display())]
    Spawn {
        repo: PathBuf,
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// git ran but reported an error
    #[error("`{command}` failed in {} ({}): {stderr}", .repo.display(), exit_description(.code))]
    Failed {
        repo: PathBuf,
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// git did not finish in time and was killed
    #[error("`{command}` timed out in {} after {secs}s", .repo.display())]
    TimedOut {
        repo: PathBuf,
        command: String,
        secs: u64,
    },
}

impl QueryError {
    /// Repository the failed query was run against
    pub fn repo(&self) -> &std::path::Path {
        match self {
            QueryError::Spawn { repo, .. }
            | QueryError::Failed { repo, .. }
            | QueryError::TimedOut { repo, .. } => repo,
        }
    }

    /// True when git itself could not be invoked, as opposed to git reporting an error
    pub fn is_tool_unavailable(&self) -> bool {
        matches!(self, QueryError::Spawn { .. })
    }
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}
