use crate::tasks::Task;
use tracing::debug;

/// Work queue filled once with every task, then closed
///
/// The channel is sized to the task count, so seeding never waits. Workers
/// see the closed-and-empty channel as "no more work".
pub struct WorkQueue {
    rx: flume::Receiver<Task>,
    total: usize,
}

impl WorkQueue {
    pub fn seed(tasks: Vec<Task>) -> Self {
        let total = tasks.len();
        let (tx, rx) = flume::bounded(total.max(1));

        for task in tasks {
            // Capacity covers every task and `rx` is alive, so this cannot fail
            let sent = tx.try_send(task);
            debug_assert!(sent.is_ok());
        }
        // Closes the queue; nothing can be enqueued after this point
        drop(tx);

        debug!(total, "Work queue seeded");
        Self { rx, total }
    }

    /// Number of tasks enqueued at seeding time
    pub fn total(&self) -> usize {
        self.total
    }

    pub(crate) fn receiver(&self) -> flume::Receiver<Task> {
        self.rx.clone()
    }
}
