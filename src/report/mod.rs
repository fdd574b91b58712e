//! Report sink: turns the finished result collection into rows worth showing

pub mod render;

pub use render::{render_json, render_table};

use serde::Serialize;
use std::path::Path;

use crate::core::{ResultCollection, ResultRecord};
use crate::git::UnpushedBranches;

/// One line of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow<'a> {
    pub repo: &'a Path,
    pub unpushed_branches: usize,
    pub changes: usize,
    pub branches: &'a UnpushedBranches,
}

impl<'a> From<&'a ResultRecord> for ReportRow<'a> {
    fn from(record: &'a ResultRecord) -> Self {
        Self {
            repo: &record.repo,
            unpushed_branches: record.branches.len(),
            changes: record.changes,
            branches: &record.branches,
        }
    }
}

/// Rows for every repository with something to report, sorted by path
///
/// Clean repositories (no unpushed branches, no changes) are left out.
pub fn rows(collection: &ResultCollection) -> Vec<ReportRow<'_>> {
    let mut rows: Vec<ReportRow<'_>> = collection
        .records()
        .iter()
        .filter(|record| !record.is_clean())
        .map(ReportRow::from)
        .collect();
    rows.sort_by(|a, b| a.repo.cmp(b.repo));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn collection(records: Vec<(&str, Vec<(&str, &str)>, usize)>) -> ResultCollection {
        let mut collection = ResultCollection::new();
        for (repo, branches, changes) in records {
            collection.push_record(ResultRecord {
                repo: PathBuf::from(repo),
                branches: branches.into_iter().collect(),
                changes,
            });
        }
        collection
    }

    #[test]
    fn test_clean_repositories_are_filtered_out() {
        let collection = collection(vec![
            ("clean", vec![], 0),
            ("dirty", vec![], 3),
            ("ahead", vec![("feature-x", "abc1234")], 0),
        ]);

        let rows = rows(&collection);
        let repos: Vec<_> = rows.iter().map(|r| r.repo).collect();
        assert_eq!(repos, vec![Path::new("ahead"), Path::new("dirty")]);
    }

    #[test]
    fn test_rows_are_sorted_regardless_of_completion_order() {
        let collection = collection(vec![("zeta", vec![], 1), ("alpha", vec![], 1), ("mid", vec![], 1)]);

        let repos: Vec<_> = rows(&collection).iter().map(|r| r.repo.to_path_buf()).collect();
        assert_eq!(
            repos,
            vec![PathBuf::from("alpha"), PathBuf::from("mid"), PathBuf::from("zeta")]
        );
    }

    #[test]
    fn test_row_counts_distinct_branches() {
        let collection = collection(vec![("proj", vec![("a", "1111111"), ("b", "2222222")], 4)]);
        let rows = rows(&collection);
        assert_eq!(rows[0].unpushed_branches, 2);
        assert_eq!(rows[0].changes, 4);
    }
}
