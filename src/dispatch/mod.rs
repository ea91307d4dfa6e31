//! Bounded-concurrency dispatch of upload tasks
//!
//! Data flow:
//! 1. Tasks are seeded into a [`WorkQueue`] sized to the task count, which is
//!    then closed.
//! 2. The [`Aggregator`] is spawned first so workers never block on a result
//!    channel nobody reads.
//! 3. N workers pull from the queue, upload, and send one [`ResultMessage`]
//!    per task into a bounded result channel.
//! 4. The [`JoinBarrier`] waits for all N workers, then drops the last result
//!    sender. The aggregator sees the channel close, finalizes the
//!    [`RunSummary`] and returns it through its join handle.
//!
//! Results arrive in completion order, not submission order. Progress counts
//! reflect that order.

mod aggregator;
mod barrier;
mod queue;
mod status;
mod worker;

pub use aggregator::Aggregator;
pub use barrier::JoinBarrier;
pub use queue::WorkQueue;
pub use status::{RunStatus, RunSummary};

use crate::report::Reporter;
use crate::tasks::Task;
use crate::upload::{UploadError, Uploader};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::info;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no tasks to dispatch")]
    NoTasks,

    #[error("worker count must be at least 1")]
    ZeroConcurrency,

    #[error("aggregator failed: {0}")]
    Aggregator(String),
}

/// Outcome of one task, produced by the worker that handled it
#[derive(Debug)]
pub struct ResultMessage {
    pub task: Task,
    pub outcome: Result<(), UploadError>,
}

/// Runs a fixed-size worker pool over a finite task list
pub struct Dispatcher<U: ?Sized> {
    uploader: Arc<U>,
    concurrency: usize,
}

impl<U> Dispatcher<U>
where
    U: Uploader + ?Sized + 'static,
{
    pub fn new(uploader: Arc<U>, concurrency: usize) -> Self {
        Self {
            uploader,
            concurrency,
        }
    }

    /// Upload every task once and report each outcome to `reporter`
    ///
    /// Task failures never abort the run; they are counted in the returned
    /// summary. Errors are returned only for violated preconditions.
    pub async fn run<R: Reporter>(
        &self,
        tasks: Vec<Task>,
        reporter: R,
    ) -> Result<RunSummary, DispatchError> {
        if tasks.is_empty() {
            return Err(DispatchError::NoTasks);
        }
        if self.concurrency == 0 {
            return Err(DispatchError::ZeroConcurrency);
        }

        let queue = WorkQueue::seed(tasks);
        let total = queue.total();

        let (results_tx, results_rx) = mpsc::channel(self.concurrency);
        let aggregator = tokio::spawn(Aggregator::new(total, reporter).drain(results_rx));

        info!(total, workers = self.concurrency, "Dispatching uploads");
        let barrier = JoinBarrier::spawn(
            self.concurrency,
            &queue,
            Arc::clone(&self.uploader),
            results_tx,
        );
        drop(queue);

        let handled = barrier.wait().await;
        let summary = aggregator
            .await
            .map_err(|e| DispatchError::Aggregator(e.to_string()))?;

        info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed(),
            handled,
            "Dispatch finished"
        );
        Ok(summary)
    }
}
