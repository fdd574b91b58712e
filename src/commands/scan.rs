//! Scan command implementation
//!
//! This module handles the only command of the tool: validate the root
//! directory, run the scanner/worker pipeline, and print the report.

use anyhow::{anyhow, bail, Context, Result};
use indicatif::ProgressBar;
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::core::{create_scan_progress, get_query_concurrency, run, ScanConfig};
use crate::git::{GitCli, RepositoryQuery};
use crate::report::{render_json, render_table, rows};

/// Options for one invocation of the scan command
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub dir: PathBuf,
    pub extra_skips: Vec<String>,
    pub jobs: Option<usize>,
    pub sequential: bool,
    pub timeout_secs: u64,
    pub follow_links: bool,
    pub show_branches: bool,
    pub json: bool,
    pub show_progress: bool,
}

impl ScanOptions {
    /// Builds the pipeline configuration from command line options
    pub fn scan_config(&self) -> ScanConfig {
        let mut config = ScanConfig::new(&self.dir).with_extra_skips(self.extra_skips.clone());
        config.jobs = get_query_concurrency(self.jobs, self.sequential);
        config.git_timeout = Duration::from_secs(self.timeout_secs.max(1));
        config.follow_links = self.follow_links;
        config
    }
}

/// Handles the scan command, printing the report to stdout
pub async fn handle_scan_command(options: ScanOptions) -> Result<()> {
    let progress = create_scan_progress(options.show_progress && !options.json)?;
    let interrupt = async {
        // If the handler cannot be installed, the scan simply runs to completion
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    let report = scan_until_interrupted(&options, &progress, interrupt).await?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(report.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Runs the scan with the git adapter unless `interrupt` completes first
///
/// The spinner is cleared on both paths.
pub async fn scan_until_interrupted<I>(
    options: &ScanOptions,
    progress: &ProgressBar,
    interrupt: I,
) -> Result<String>
where
    I: Future<Output = ()>,
{
    let config = options.scan_config();
    let git = GitCli::new().with_timeout(config.git_timeout);
    let cancel = Arc::new(AtomicBool::new(false));

    let outcome = tokio::select! {
        biased;
        _ = interrupt => {
            // Stop the walker thread; dropping the pipeline kills running git processes
            cancel.store(true, Ordering::Relaxed);
            Err(anyhow!("Interrupted"))
        }
        report = scan_and_render(options, &config, &git, progress, Arc::clone(&cancel)) => report,
    };

    progress.finish_and_clear();
    outcome
}

/// Runs the pipeline with the given adapter and returns the rendered report
///
/// Nothing is rendered when the scan fails: a partial report would hide
/// repositories that were never reached.
pub async fn scan_and_render<Q>(
    options: &ScanOptions,
    config: &ScanConfig,
    adapter: &Q,
    progress: &ProgressBar,
    cancel: Arc<AtomicBool>,
) -> Result<String>
where
    Q: RepositoryQuery + ?Sized,
{
    if !options.dir.is_dir() {
        bail!("Directory does not exist: {}", options.dir.display());
    }

    tracing::debug!(
        "Scanning {} with {} concurrent queries, skipping {:?}",
        config.root.display(),
        config.jobs,
        config.skip_dirs
    );

    let result = run(config, adapter, progress, cancel).await;
    progress.finish_and_clear();

    let collection =
        result.with_context(|| format!("Error walking directory {}", options.dir.display()))?;

    if !collection.failures().is_empty() {
        tracing::warn!(
            "{} of {} repositories could not be inspected",
            collection.failures().len(),
            collection.processed()
        );
    }

    let rows = rows(&collection);
    tracing::info!(
        "{} repositories inspected, {} with unpushed work",
        collection.len(),
        rows.len()
    );

    if options.json {
        let mut json = render_json(&rows).context("Failed to serialize report")?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(render_table(&rows, options.show_branches))
    }
}
