//! Discovery and querying pipeline
//!
//! The scanner runs on a blocking thread and feeds repository roots into a
//! bounded queue. The aggregation worker consumes them on the calling task,
//! keeps up to `jobs` repositories in flight, and is the only writer of the
//! result collection. A scan failure ends the run immediately and drops
//! everything collected so far.

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use super::config::ScanConfig;
use super::discovery::{scan, ScanError};
use super::queue::{repo_queue, RepoReceiver};
use super::results::{QueryFailure, ResultCollection, ResultRecord};
use crate::git::{QueryError, RepositoryQuery};

/// Runs both queries for one repository
///
/// The record is only built when both succeed.
pub async fn inspect_repository<Q>(adapter: &Q, repo: PathBuf) -> Result<ResultRecord, QueryError>
where
    Q: RepositoryQuery + ?Sized,
{
    let branches = adapter.unpushed_branches(&repo).await?;
    let changes = adapter.uncommitted_changes(&repo).await?;
    Ok(ResultRecord {
        repo,
        branches,
        changes,
    })
}

/// Consumes the queue until it is closed and drained, querying each repository
///
/// A failed query is logged and recorded as a failure; the repository gets no
/// record and the run continues.
pub async fn aggregate<Q>(
    mut queue: RepoReceiver,
    adapter: &Q,
    jobs: usize,
    progress: &ProgressBar,
) -> ResultCollection
where
    Q: RepositoryQuery + ?Sized,
{
    let jobs = jobs.max(1);
    let mut collection = ResultCollection::new();
    let mut in_flight: FuturesUnordered<BoxFuture<'_, Result<ResultRecord, QueryError>>> =
        FuturesUnordered::new();
    let mut queue_open = true;

    loop {
        tokio::select! {
            next = queue.recv(), if queue_open && in_flight.len() < jobs => match next {
                Some(repo) => {
                    tracing::debug!("Processing git repository: {}", repo.display());
                    in_flight.push(inspect_repository(adapter, repo).boxed());
                }
                None => queue_open = false,
            },
            Some(outcome) = in_flight.next(), if !in_flight.is_empty() => {
                match outcome {
                    Ok(record) => {
                        progress.set_message(record.repo.display().to_string());
                        collection.push_record(record);
                    }
                    Err(err) => {
                        tracing::warn!("Skipping repository: {err}");
                        collection.push_failure(QueryFailure {
                            repo: err.repo().to_path_buf(),
                            message: err.to_string(),
                        });
                    }
                }
                progress.inc(1);
            },
            else => break,
        }
    }

    collection
}

/// Scans `config.root` and queries every repository found
///
/// Returns the collection only if the whole tree was scanned. On a scan error the
/// worker is dropped together with any git processes still running.
pub async fn run<Q>(
    config: &ScanConfig,
    adapter: &Q,
    progress: &ProgressBar,
    cancel: Arc<AtomicBool>,
) -> Result<ResultCollection, ScanError>
where
    Q: RepositoryQuery + ?Sized,
{
    let (sender, receiver) = repo_queue(config.queue_capacity);

    let scan_config = config.clone();
    let mut scanner = tokio::task::spawn_blocking(move || scan(&scan_config, sender, &cancel));

    let worker = aggregate(receiver, adapter, config.jobs, progress);
    tokio::pin!(worker);

    let (discovered, collection) = tokio::select! {
        scanned = &mut scanner => {
            let discovered = scanned??;
            (discovered, (&mut worker).await)
        }
        collection = &mut worker => {
            // The queue only closes once the scanner has returned
            (scanner.await??, collection)
        }
    };

    tracing::debug!(
        "Scanned {discovered} repositories, {} failed",
        collection.failures().len()
    );
    Ok(collection)
}
