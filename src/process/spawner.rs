/*!
 * Process Spawner
 * Shell-indirected launch shared by all platforms
 */

use super::types::{ProcessError, ProcessResult};
use crate::core::types::Pid;
use std::process::{Child, Command, Stdio};
use tracing::{debug, info, warn};

/// Build the interpreter invocation for `command`
#[cfg(unix)]
pub(crate) fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new(crate::core::limits::UNIX_SHELL);
    cmd.arg("-c").arg(command);
    cmd
}

/// Build the interpreter invocation for `command`
#[cfg(windows)]
pub(crate) fn shell_command(command: &str) -> Command {
    use std::os::windows::process::CommandExt;

    let mut cmd = Command::new(crate::core::limits::WINDOWS_SHELL);
    // cmd.exe does its own parsing; hand it the line untouched
    cmd.arg("/C").raw_arg(command);
    cmd
}

#[cfg(not(any(unix, windows)))]
pub(crate) fn shell_command(command: &str) -> Command {
    Command::new(command)
}

/// Launch `command` and return its OS identifier without waiting for it
///
/// The child inherits stdout and stderr, so anything it prints reaches the
/// parent's console. Stdin is detached.
pub(crate) fn spawn_detached(command: &str) -> ProcessResult<Pid> {
    let child = shell_command(command)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| ProcessError::SpawnFailed(format!("{}: {}", command, e)))?;

    let pid = child.id();
    info!(pid, command, "Spawned OS process");

    release(child);
    Ok(pid)
}

/// Hand the child to a detached reaper thread
///
/// The caller never sees the exit status, but the zombie entry is collected as
/// soon as the child exits so its identifier stops resolving. One small-stack
/// thread lives per running child. `waitpid(-1)` must not be used here: it
/// would also collect children the host program spawned itself.
#[cfg(unix)]
fn release(mut child: Child) {
    let pid = child.id();
    let reaper = std::thread::Builder::new()
        .name(format!("reaper-{}", pid))
        .stack_size(crate::core::limits::REAPER_STACK_SIZE)
        .spawn(move || match child.wait() {
            Ok(status) => debug!(pid, code = ?status.code(), "Reaped child process"),
            Err(e) => debug!(pid, error = %e, "Child already reaped"),
        });

    if let Err(e) = reaper {
        warn!(pid, error = %e, "Could not start reaper thread; child will linger until exit");
    }
}

/// Dropping the handle is enough; the process object goes away with the last handle
#[cfg(not(unix))]
fn release(child: Child) {
    drop(child);
}
