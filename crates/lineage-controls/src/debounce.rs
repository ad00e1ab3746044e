//! Debounced value commits
//!
//! Provides [`Debouncer`], which coalesces bursts of values so only the last
//! value of a burst reaches the shared state:
//!
//! ```text
//! push(1.0) ─50ms─ push(1.2) ─50ms─ push(1.5) ──150ms quiet──▶ commit(1.5)
//! ```
//!
//! Values are never reordered; a newer value always replaces the pending one.

use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Debouncer for viewport zoom levels
pub type ZoomDebouncer = Debouncer<f64>;

/// Coalesces rapid updates into a single trailing commit
///
/// Owns a background task. Dropping the debouncer stops the task and
/// discards any value still waiting for its quiet window.
#[derive(Debug)]
pub struct Debouncer<T> {
    sender: mpsc::UnboundedSender<T>,
    committed: watch::Receiver<T>,
    task: JoinHandle<()>,
}

impl<T> Debouncer<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawn the debounce task on the current runtime
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime.
    #[must_use]
    pub fn spawn(initial: T, quiet: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (commit_tx, committed) = watch::channel(initial);
        let task = tokio::spawn(run(receiver, commit_tx, quiet));
        Self {
            sender,
            committed,
            task,
        }
    }

    /// Offer a new value
    ///
    /// Returns `false` when the task is no longer running.
    pub fn push(&self, value: T) -> bool {
        self.sender.send(value).is_ok()
    }

    /// Last committed value
    #[must_use]
    pub fn committed(&self) -> T {
        self.committed.borrow().clone()
    }

    /// Receiver notified on every commit
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.committed.clone()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<T>(mut receiver: mpsc::UnboundedReceiver<T>, commit: watch::Sender<T>, quiet: Duration)
where
    T: Clone + Send + Sync + 'static,
{
    let mut pending: Option<T> = None;

    loop {
        let Some(value) = pending.take() else {
            match receiver.recv().await {
                Some(value) => pending = Some(value),
                None => break,
            }
            continue;
        };

        tokio::select! {
            next = receiver.recv() => match next {
                // Newer value restarts the window.
                Some(next) => pending = Some(next),
                None => break,
            },
            () = tokio::time::sleep(quiet) => {
                commit.send_replace(value);
                tracing::trace!("Committed debounced value");
            }
        }
    }

    tracing::debug!("Debounce task stopped");
}
