//! Bounded hand-off queue between the directory scanner and the aggregation worker
//!
//! The queue holds at most `capacity` repository roots. The scanner side blocks
//! its thread while the queue is full; the worker side parks its task while the
//! queue is empty. The queue is closed when the [`RepoSender`] is dropped, which
//! the scanner does exactly once when the traversal ends, successfully or not.
//! After closing, the receiver yields the remaining items and then `None`.

use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::mpsc;

/// The receiving side has gone away; no further items will be consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("repository queue closed by the consumer")]
pub struct QueueClosed;

/// Producer half, owned by the scanner
#[derive(Debug)]
pub struct RepoSender {
    tx: mpsc::Sender<PathBuf>,
}

/// Consumer half, owned by the aggregation worker
#[derive(Debug)]
pub struct RepoReceiver {
    rx: mpsc::Receiver<PathBuf>,
}

/// Creates a queue holding at most `capacity` repository roots
pub fn repo_queue(capacity: usize) -> (RepoSender, RepoReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (RepoSender { tx }, RepoReceiver { rx })
}

impl RepoSender {
    /// Pushes a repository root, blocking the current thread while the queue is full.
    ///
    /// Must not be called from inside an async task; the scanner runs on a blocking thread.
    pub fn send_blocking(&self, repo: PathBuf) -> Result<(), QueueClosed> {
        self.tx.blocking_send(repo).map_err(|_| QueueClosed)
    }

    /// Pushes a repository root, waiting asynchronously while the queue is full
    pub async fn send(&self, repo: PathBuf) -> Result<(), QueueClosed> {
        self.tx.send(repo).await.map_err(|_| QueueClosed)
    }

    /// Signals end-of-stream. Equivalent to dropping the sender.
    pub fn close(self) {
        drop(self);
    }
}

impl RepoReceiver {
    /// Waits for the next repository root; `None` once the queue is closed and drained
    pub async fn recv(&mut self) -> Option<PathBuf> {
        self.rx.recv().await
    }
}
