use super::queue::WorkQueue;
use super::{ResultMessage, worker};
use crate::upload::Uploader;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error};

/// Counted join over the worker pool
///
/// Holds the original result sender. It is dropped only after every worker
/// has exited, so the result channel closes after the last send and never
/// before it.
pub struct JoinBarrier {
    workers: JoinSet<usize>,
    expected: usize,
    results: mpsc::Sender<ResultMessage>,
}

impl JoinBarrier {
    /// Start `count` workers pulling from `queue`
    pub fn spawn<U>(
        count: usize,
        queue: &WorkQueue,
        uploader: Arc<U>,
        results: mpsc::Sender<ResultMessage>,
    ) -> Self
    where
        U: Uploader + ?Sized + 'static,
    {
        let mut workers = JoinSet::new();
        for worker_id in 0..count {
            workers.spawn(worker::run(
                worker_id,
                queue.receiver(),
                Arc::clone(&uploader),
                results.clone(),
            ));
        }
        debug!(count, "Spawned workers");

        Self {
            workers,
            expected: count,
            results,
        }
    }

    /// Wait for all workers, then close the result channel. Returns how many
    /// tasks the workers handled between them.
    pub async fn wait(mut self) -> usize {
        let mut handled = 0;
        let mut joined = 0;

        while let Some(result) = self.workers.join_next().await {
            joined += 1;
            match result {
                Ok(count) => handled += count,
                Err(e) => error!(error = %e, "Worker terminated abnormally"),
            }
        }
        debug_assert_eq!(joined, self.expected);

        // Last sender; the aggregator sees the channel close after this
        drop(self.results);
        debug!(workers = joined, handled, "All workers exited, result channel closed");
        handled
    }
}
