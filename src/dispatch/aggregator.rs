use super::ResultMessage;
use super::status::{RunStatus, RunSummary};
use crate::report::Reporter;
use tokio::sync::mpsc;
use tracing::{error, info};

/// Single consumer of the result channel
///
/// Drains messages until the channel closes, then finalizes. `drain`
/// consumes the aggregator, so a finished one cannot be fed again.
pub struct Aggregator<R> {
    status: RunStatus,
    reporter: R,
}

impl<R: Reporter> Aggregator<R> {
    pub fn new(total: usize, reporter: R) -> Self {
        Self {
            status: RunStatus::new(total),
            reporter,
        }
    }

    pub fn record(&mut self, message: ResultMessage) {
        let total = self.status.total();
        match message.outcome {
            Ok(()) => {
                let done = self.status.record_success();
                self.reporter.uploaded(&message.task, done, total);
            }
            Err(e) => {
                info!(task = %message.task, error = %e, kind = ?e.kind(), "Task failed");
                self.status.record_failure(e.kind());
                self.reporter.failed(&message.task, &e);
            }
        }
    }

    pub async fn drain(mut self, mut results: mpsc::Receiver<ResultMessage>) -> RunSummary {
        while let Some(message) = results.recv().await {
            self.record(message);
        }
        self.finish()
    }

    pub fn finish(self) -> RunSummary {
        let summary = self.status.finalize();
        if summary.missing > 0 {
            error!(
                missing = summary.missing,
                total = summary.total,
                "Some tasks produced no result"
            );
        }
        summary
    }
}
