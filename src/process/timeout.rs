/*!
 * Operation Timeouts
 * Race a blocking process call against a deadline on a helper thread
 */

use super::types::{ProcessError, ProcessResult};
use flume::RecvTimeoutError;
use std::time::Duration;
use tracing::warn;

/// Run `operation` on a helper thread and wait at most `timeout` for it
///
/// Platform calls cannot be cancelled: on expiry this returns
/// [`ProcessError::Timeout`] and the helper thread keeps running until the
/// call finishes, then discards its result.
pub fn run_with_timeout<T, F>(timeout: Duration, operation: F) -> ProcessResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = flume::bounded(1);

    std::thread::Builder::new()
        .name("hostproc-timeout".to_string())
        .spawn(move || {
            // Receiver may be gone after a timeout
            let _ = tx.send(operation());
        })
        .map_err(|e| ProcessError::Os(format!("cannot start worker thread: {}", e)))?;

    match rx.recv_timeout(timeout) {
        Ok(value) => Ok(value),
        Err(RecvTimeoutError::Timeout) => {
            let millis = timeout.as_millis() as u64;
            warn!(timeout_ms = millis, "Process operation timed out");
            Err(ProcessError::Timeout(millis))
        }
        Err(RecvTimeoutError::Disconnected) => Err(ProcessError::Os(
            "worker thread exited without a result".to_string(),
        )),
    }
}
