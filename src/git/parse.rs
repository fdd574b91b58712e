//! Parsers for git's textual output
//!
//! Kept free of process handling so the line and field splitting can be
//! tested against captured output.

use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

const HEAD_REF: &str = "HEAD";
const HEAD_POINTER_PREFIX: &str = "HEAD -> ";
const TAG_PREFIX: &str = "tag: ";

/// Local branches with no counterpart on any remote, keyed by branch name
///
/// The value is the abbreviated id of the branch tip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UnpushedBranches(BTreeMap<String, String>);

impl UnpushedBranches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `branch` at `commit` unless the branch is already known.
    /// Returns false when an earlier entry was kept.
    pub fn insert(&mut self, branch: impl Into<String>, commit: impl Into<String>) -> bool {
        match self.0.entry(branch.into()) {
            Entry::Vacant(entry) => {
                entry.insert(commit.into());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn commit(&self, branch: &str) -> Option<&str> {
        self.0.get(branch).map(String::as_str)
    }

    /// Iterates `(branch, commit)` pairs in branch-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(b, c)| (b.as_str(), c.as_str()))
    }
}

impl<B: Into<String>, C: Into<String>> FromIterator<(B, C)> for UnpushedBranches {
    fn from_iter<T: IntoIterator<Item = (B, C)>>(iter: T) -> Self {
        let mut branches = Self::new();
        for (branch, commit) in iter {
            branches.insert(branch, commit);
        }
        branches
    }
}

/// Parses `git log --branches --not --remotes --pretty=format:%h%d`
///
/// Each line is a short commit id, followed by ` (ref, ref, ...)` when the
/// commit is the tip of one or more refs. Lines without a parenthesized
/// annotation are intermediate commits and are ignored.
pub fn parse_unpushed_branches(output: &str) -> UnpushedBranches {
    let mut branches = UnpushedBranches::new();

    for line in output.lines() {
        let line = line.trim();
        let Some((commit, annotation)) = line.split_once(char::is_whitespace) else {
            continue;
        };

        let Some(refs) = annotation
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
        else {
            continue;
        };

        for name in refs.split(',').filter_map(local_branch_name) {
            if !branches.insert(name, commit) {
                tracing::debug!(
                    "branch {} seen again at {}, keeping {}",
                    name,
                    commit,
                    branches.commit(name).unwrap_or_default()
                );
            }
        }
    }

    branches
}

/// Extracts the branch name from one decoration entry, if it names a local branch
fn local_branch_name(decoration: &str) -> Option<&str> {
    let decoration = decoration.trim();
    let name = decoration
        .strip_prefix(HEAD_POINTER_PREFIX)
        .unwrap_or(decoration);

    if name.is_empty() || name == HEAD_REF || name.starts_with(TAG_PREFIX) {
        return None;
    }
    Some(name)
}

/// Counts entries in `git status --porcelain` output
pub fn count_status_lines(output: &str) -> usize {
    output.lines().filter(|line| !line.trim().is_empty()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_local_branch() {
        let branches = parse_unpushed_branches("abc1234 (feature-x)");
        assert_eq!(branches.len(), 1);
        assert_eq!(branches.commit("feature-x"), Some("abc1234"));
    }

    #[test]
    fn test_intermediate_commits_are_ignored() {
        let output = "abc1234 (feature-x)\n1111111\n2222222\n";
        let branches = parse_unpushed_branches(output);
        assert_eq!(branches.len(), 1);
    }

    #[test]
    fn test_head_pointer_and_tags_are_handled() {
        let output = "abc1234 (HEAD -> main, tag: v1.0, topic)\ndef5678 (HEAD)";
        let branches = parse_unpushed_branches(output);
        let names: Vec<_> = branches.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["main", "topic"]);
        assert_eq!(branches.commit("main"), Some("abc1234"));
        assert_eq!(branches.commit("topic"), Some("abc1234"));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let output = "aaaaaaa (dup)\nbbbbbbb (dup)";
        let branches = parse_unpushed_branches(output);
        assert_eq!(branches.len(), 1);
        assert_eq!(branches.commit("dup"), Some("aaaaaaa"));
    }

    #[test]
    fn test_branch_names_with_slashes() {
        let branches = parse_unpushed_branches("0a1b2c3 (user/wip-refactor)");
        assert_eq!(branches.commit("user/wip-refactor"), Some("0a1b2c3"));
    }

    #[test]
    fn test_unparenthesized_annotation_is_ignored() {
        let branches = parse_unpushed_branches("abc1234 feature-x");
        assert!(branches.is_empty());
    }

    #[test]
    fn test_empty_output() {
        assert!(parse_unpushed_branches("").is_empty());
        assert!(parse_unpushed_branches("\n\n").is_empty());
    }

    #[test]
    fn test_count_status_lines() {
        assert_eq!(count_status_lines(""), 0);
        assert_eq!(count_status_lines(" M src/lib.rs\n?? notes.txt\n"), 2);
        assert_eq!(count_status_lines("A  staged.rs\n\n   \n"), 1);
    }

    #[test]
    fn test_collect_keeps_first_commit() {
        let branches: UnpushedBranches = vec![("a", "1"), ("a", "2"), ("b", "3")]
            .into_iter()
            .collect();
        assert_eq!(branches.len(), 2);
        assert_eq!(branches.commit("a"), Some("1"));
    }
}
