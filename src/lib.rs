/*!
 * hostproc
 * Cross-platform process lifecycle and introspection
 *
 * One record shape and one failure contract over three native process
 * models: Toolhelp snapshots (Windows), the /proc filesystem (Linux) and the
 * kernel process table (macOS).
 */

pub mod config;
pub mod core;
pub mod events;
pub mod monitoring;
pub mod process;

// Re-exports
pub use crate::core::{MemoryBytes, Pid, ProcessName};
pub use config::HostprocConfig;
pub use events::{Event, EventError, EventKind, EventQueue};
pub use monitoring::init_tracing;
pub use process::{
    ProcessError, ProcessPlatform, ProcessRecord, ProcessResult, ProcessStatus, ProcessTable,
    Uptime, UptimeSource,
};

/// Launch `command` through the platform shell. See [`ProcessTable::spawn`].
pub fn spawn(command: &str) -> ProcessResult<ProcessRecord> {
    ProcessTable::new().spawn(command)
}

/// Forcibly end `pid`. See [`ProcessTable::terminate`].
pub fn terminate(pid: Pid) -> ProcessResult<()> {
    ProcessTable::new().terminate(pid)
}

/// Snapshot at most `max_count` running processes. See [`ProcessTable::list`].
pub fn list(max_count: usize) -> Vec<ProcessRecord> {
    ProcessTable::new().list(max_count)
}

/// Fill `dest` with process records, returning the count written
pub fn list_into(dest: &mut [ProcessRecord]) -> usize {
    ProcessTable::new().list_into(dest)
}

/// Resident memory of `pid` in bytes, or 0 when unknown
pub fn memory_of(pid: Pid) -> MemoryBytes {
    ProcessTable::new().memory_of(pid)
}

/// Seconds since boot; check [`Uptime::source`] for the wall-clock fallback
pub fn uptime() -> Uptime {
    ProcessTable::new().uptime()
}

/// Give up the rest of the current scheduling quantum
pub fn yield_now() {
    ProcessTable::new().yield_now()
}
