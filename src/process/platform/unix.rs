/*!
 * Unix Helpers
 * Forced termination through SIGKILL, shared by Linux and macOS
 */

use crate::core::limits::{KILL_POLL_INTERVAL, KILL_SETTLE_TIMEOUT};
use crate::core::types::Pid;
use crate::process::types::{ProcessError, ProcessResult};
use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid as NixPid;
use std::time::Instant;
use tracing::debug;

/// Send SIGKILL to `pid` and wait for it to disappear
///
/// Identifiers above `i32::MAX` are rejected: as a negative `pid_t` they
/// would address a process group. `is_defunct` reports processes that have
/// exited but not been reaped; those still accept signals, so they are
/// treated as already gone.
///
/// Returns once `pid` no longer resolves (or is defunct), or after
/// [`KILL_SETTLE_TIMEOUT`] if its parent has not reaped it by then.
pub(super) fn kill_process<F>(pid: Pid, is_defunct: F) -> ProcessResult<()>
where
    F: Fn(Pid) -> bool,
{
    let raw = i32::try_from(pid)
        .ok()
        .filter(|&raw| raw > 0)
        .ok_or(ProcessError::InvalidPid(pid))?;
    let target = NixPid::from_raw(raw);

    if is_defunct(pid) {
        debug!(pid, "Target already exited, awaiting reap");
        return Err(ProcessError::NotFound(pid));
    }

    kill(target, Signal::SIGKILL).map_err(|errno| {
        debug!(pid, errno = %errno, "kill(SIGKILL) failed");
        errno_to_error(pid, errno)
    })?;

    wait_until_gone(pid, target, &is_defunct);
    Ok(())
}

/// Poll with the null signal until the kernel reports `ESRCH`
fn wait_until_gone<F>(pid: Pid, target: NixPid, is_defunct: &F) -> bool
where
    F: Fn(Pid) -> bool,
{
    let deadline = Instant::now() + KILL_SETTLE_TIMEOUT;
    loop {
        match kill(target, None::<Signal>) {
            Err(Errno::ESRCH) => return true,
            _ if is_defunct(pid) => return true,
            _ => {}
        }

        if Instant::now() >= deadline {
            debug!(pid, "Killed process not yet reaped by its parent");
            return false;
        }
        std::thread::sleep(KILL_POLL_INTERVAL);
    }
}

pub(super) fn errno_to_error(pid: Pid, errno: Errno) -> ProcessError {
    match errno {
        Errno::ESRCH => ProcessError::NotFound(pid),
        Errno::EPERM | Errno::EACCES => ProcessError::PermissionDenied(pid),
        other => ProcessError::Os(other.desc().to_string()),
    }
}
