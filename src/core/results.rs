//! Per-repository results collected by the aggregation worker

use std::path::PathBuf;

use crate::git::UnpushedBranches;

/// Findings for one repository whose queries all succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub repo: PathBuf,
    pub branches: UnpushedBranches,
    pub changes: usize,
}

impl ResultRecord {
    /// A repository with no local-only branches and a clean working tree
    pub fn is_clean(&self) -> bool {
        self.branches.is_empty() && self.changes == 0
    }
}

/// A repository that was dropped because one of its queries failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFailure {
    pub repo: PathBuf,
    pub message: String,
}

/// Records in the order the worker finished them, plus the repositories that failed
#[derive(Debug, Clone, Default)]
pub struct ResultCollection {
    records: Vec<ResultRecord>,
    failures: Vec<QueryFailure>,
}

impl ResultCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_record(&mut self, record: ResultRecord) {
        self.records.push(record);
    }

    pub(crate) fn push_failure(&mut self, failure: QueryFailure) {
        self.failures.push(failure);
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn failures(&self) -> &[QueryFailure] {
        &self.failures
    }

    /// Number of repositories that produced a record
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of repositories the worker processed, successful or not
    pub fn processed(&self) -> usize {
        self.records.len() + self.failures.len()
    }
}
