/*!
 * Process Types
 * Records, status, uptime and errors shared by every platform
 */

use crate::core::types::{MemoryBytes, Pid};
use crate::core::ProcessName;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Process errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ProcessError {
    #[error("Invalid command: {0}")]
    #[diagnostic(
        code(process::invalid_command),
        help("Pass a non-empty command line without NUL bytes.")
    )]
    InvalidCommand(String),

    #[error("Invalid process identifier: {0}")]
    #[diagnostic(
        code(process::invalid_pid),
        help("Identifier 0 and values outside the platform's PID range never name a process.")
    )]
    InvalidPid(Pid),

    #[error("Process {0} not found")]
    #[diagnostic(
        code(process::not_found),
        help("The process may have exited, or the identifier was never valid.")
    )]
    NotFound(Pid),

    #[error("Permission denied for process {0}")]
    #[diagnostic(
        code(process::permission_denied),
        help("The caller's privilege level does not allow this operation on the target.")
    )]
    PermissionDenied(Pid),

    #[error("Refusing to terminate the calling process ({0})")]
    #[diagnostic(
        code(process::self_termination),
        help("A process cannot force-terminate itself through this interface. Exit normally instead.")
    )]
    SelfTermination(Pid),

    #[error("Spawn failed: {0}")]
    #[diagnostic(
        code(process::spawn_failed),
        help("Check that the command interpreter exists and system resources are available.")
    )]
    SpawnFailed(String),

    #[error("Operation failed: {0}")]
    #[diagnostic(code(process::os_error))]
    Os(String),

    #[error("Operation not supported on this platform: {0}")]
    #[diagnostic(code(process::unsupported))]
    Unsupported(String),

    #[error("Operation timed out after {0} ms")]
    #[diagnostic(
        code(process::timeout),
        help("The underlying platform call may still be running to completion.")
    )]
    Timeout(u64),
}

/// Platform-independent process status
///
/// A process is never reported as exited: records are not tracked after
/// the call that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ProcessStatus {
    #[default]
    Unknown = 0,
    Running = 1,
}

/// Uniform description of one OS process
///
/// `memory_usage == 0` means "unknown"; a process with genuinely zero resident
/// memory reads the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessRecord {
    pub pid: Pid,
    pub display_name: Option<ProcessName>,
    pub memory_usage: MemoryBytes,
    pub status: ProcessStatus,
}

impl ProcessRecord {
    /// A record for a process observed as running
    pub fn running(pid: Pid, display_name: impl Into<ProcessName>, memory_usage: MemoryBytes) -> Self {
        Self {
            pid,
            display_name: Some(display_name.into()),
            memory_usage,
            status: ProcessStatus::Running,
        }
    }

    /// Display name, or `""` when none was recorded
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or("")
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.status == ProcessStatus::Running
    }
}

impl fmt::Display for ProcessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>7}  {:>12}  {}", self.pid, self.memory_usage, self.name())
    }
}

/// Where an uptime reading came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UptimeSource {
    /// Monotonic clock that counts from boot: a true uptime
    BootClock,
    /// Wall-clock seconds since the Unix epoch. Not an uptime; used only
    /// when no boot clock is available.
    WallClock,
}

/// System uptime reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Uptime {
    pub seconds: u64,
    pub source: UptimeSource,
}

impl Uptime {
    pub fn since_boot(seconds: u64) -> Self {
        Self {
            seconds,
            source: UptimeSource::BootClock,
        }
    }

    /// Degraded reading from the wall clock
    pub fn wall_clock() -> Self {
        let seconds = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            seconds,
            source: UptimeSource::WallClock,
        }
    }

    #[inline]
    pub fn is_true_uptime(&self) -> bool {
        self.source == UptimeSource::BootClock
    }
}
