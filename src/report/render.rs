//! Table and JSON rendering of report rows

use super::ReportRow;
use crate::core::config::NOTHING_TO_REPORT_MESSAGE;

const REPO_HEADER: &str = "Repo";
const BRANCHES_HEADER: &str = "Branches";
const CHANGES_HEADER: &str = "Changes";
const COLUMN_SEPARATOR: &str = " | ";

/// Renders rows as an aligned `Repo | Branches | Changes` table
///
/// With `show_branches`, each row is followed by its branches as `name (commit)`.
pub fn render_table(rows: &[ReportRow<'_>], show_branches: bool) -> String {
    if rows.is_empty() {
        return format!("{NOTHING_TO_REPORT_MESSAGE}\n");
    }

    let repos: Vec<String> = rows.iter().map(|r| r.repo.display().to_string()).collect();
    let repo_width = repos
        .iter()
        .map(|r| r.chars().count())
        .chain(std::iter::once(REPO_HEADER.len()))
        .max()
        .unwrap_or(0);
    let branches_width = BRANCHES_HEADER.len();

    let mut out = String::new();
    out.push_str(&format!(
        "{REPO_HEADER:<repo_width$}{COLUMN_SEPARATOR}{BRANCHES_HEADER:<branches_width$}{COLUMN_SEPARATOR}{CHANGES_HEADER}\n"
    ));

    for (row, repo) in rows.iter().zip(&repos) {
        out.push_str(&format!(
            "{repo:<repo_width$}{COLUMN_SEPARATOR}{:<branches_width$}{COLUMN_SEPARATOR}{}\n",
            row.unpushed_branches, row.changes
        ));

        if show_branches {
            let count = row.branches.len();
            for (i, (branch, commit)) in row.branches.iter().enumerate() {
                let tree_char = if i == count - 1 { "└─" } else { "├─" };
                out.push_str(&format!("   {tree_char} {branch} ({commit})\n"));
            }
        }
    }

    out
}

/// Renders rows as a pretty-printed JSON array
pub fn render_json(rows: &[ReportRow<'_>]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rows)
}
