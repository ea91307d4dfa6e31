use super::ResultMessage;
use crate::tasks::Task;
use crate::upload::{UploadError, Uploader};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Pull tasks until the queue is closed and empty. Returns how many tasks
/// this worker handled.
///
/// Every task gets exactly one upload attempt and one result message, even
/// when the upload fails or panics.
pub(crate) async fn run<U>(
    worker_id: usize,
    tasks: flume::Receiver<Task>,
    uploader: Arc<U>,
    results: mpsc::Sender<ResultMessage>,
) -> usize
where
    U: Uploader + ?Sized,
{
    let mut handled = 0;

    while let Ok(task) = tasks.recv_async().await {
        let outcome = match AssertUnwindSafe(uploader.upload(&task)).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                debug!(worker_id, task = %task, panic = %message, "Upload panicked");
                Err(UploadError::Panicked(message))
            }
        };
        match &outcome {
            Ok(()) => debug!(worker_id, task = %task, "Upload succeeded"),
            Err(e) => debug!(worker_id, task = %task, error = %e, "Upload failed"),
        }

        if results.send(ResultMessage { task, outcome }).await.is_err() {
            // Only happens if the aggregator is gone
            warn!(worker_id, "Result channel closed, worker stopping");
            break;
        }
        handled += 1;
    }

    debug!(worker_id, handled, "Worker finished");
    handled
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
