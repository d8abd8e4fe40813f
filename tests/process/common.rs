/*!
 * Shared helpers for process tests
 */

use hostproc::{Pid, ProcessError, ProcessTable};
use std::time::{Duration, Instant};

/// A command that keeps running for about ten seconds
pub fn long_running_command() -> &'static str {
    if cfg!(windows) {
        "ping -n 11 127.0.0.1 > NUL"
    } else {
        "sleep 10"
    }
}

/// An identifier that no live process should hold
pub const UNUSED_PID: Pid = u32::MAX - 1;

/// Poll `terminate` until the identifier stops resolving and return that error
///
/// For a process that exits on its own, such as `exit 0`.
pub fn wait_for_exit(table: &ProcessTable, pid: Pid) -> Option<ProcessError> {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if let Err(e) = table.terminate(pid) {
            return Some(e);
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    None
}
