use std::future::Future;

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::controller::event_loop::TaskResult;

/// Run a host call on the runtime and post its completion to the event loop.
///
/// A closed channel means the controller was torn down; the result is dropped.
pub fn spawn_host_call<F>(task_tx: &UnboundedSender<TaskResult>, task: &'static str, call: F)
where
    F: Future<Output = TaskResult> + Send + 'static,
{
    let task_tx = task_tx.clone();

    tokio::spawn(async move {
        let result = call.await;

        if task_tx.send(result).is_err() {
            debug!(task, "Controller unmounted, discarding host result");
        }
    });
}
