/*!
 * Limits and Constants
 *
 * Defaults and thresholds shared by the process and event subsystems.
 */

use std::time::Duration;

// =============================================================================
// PROCESS ENUMERATION
// =============================================================================

/// Default capacity for a process listing when none is configured
pub const DEFAULT_LIST_CAPACITY: usize = 512;

/// Root of the Linux process virtual filesystem
pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// Operations slower than this are reported as slow in traces
pub const SLOW_OPERATION_THRESHOLD: Duration = Duration::from_millis(100);

// =============================================================================
// PROCESS SPAWNING
// =============================================================================

/// Command interpreter used for shell indirection on Unix
#[cfg(unix)]
pub const UNIX_SHELL: &str = "/bin/sh";

/// Command interpreter used for shell indirection on Windows
#[cfg(windows)]
pub const WINDOWS_SHELL: &str = "cmd.exe";

/// Exit code passed to TerminateProcess
#[cfg(windows)]
pub const FORCED_EXIT_CODE: u32 = 1;

/// How long terminate waits for a killed process to disappear
pub const KILL_SETTLE_TIMEOUT: Duration = Duration::from_secs(2);

/// Poll interval while waiting for a killed process to disappear
#[cfg(unix)]
pub const KILL_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Stack size for the per-child reaper thread; it only blocks in wait()
#[cfg(unix)]
pub const REAPER_STACK_SIZE: usize = 128 * 1024;

/// Default deadline for `run_with_timeout` callers that take it from config
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

// =============================================================================
// EVENT QUEUE
// =============================================================================

/// Default event queue capacity
pub const DEFAULT_EVENT_CAPACITY: usize = 256;
