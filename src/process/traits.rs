/*!
 * Process Traits
 * The per-platform seam behind every process operation
 */

use super::types::{ProcessRecord, ProcessResult, Uptime};
use crate::core::types::{MemoryBytes, Pid};

/// One native process model
///
/// Each supported OS supplies one implementation; the build selects it as
/// [`NativePlatform`](super::platform::NativePlatform). Implementations hold no
/// mutable state and release every OS handle they open before returning.
///
/// The methods here do not validate their inputs. Callers go through
/// [`ProcessTable`](super::ProcessTable), which rejects empty commands,
/// identifier 0 and self-termination first.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessPlatform: Send + Sync {
    /// Short platform label for logs
    fn name(&self) -> &'static str;

    /// Snapshot at most `max_count` visible processes
    ///
    /// Order is whatever the OS yields. Never returns identifier 0.
    fn enumerate(&self, max_count: usize) -> Vec<ProcessRecord>;

    /// Resident memory of `pid` in bytes, or 0 when it cannot be determined
    fn probe_memory(&self, pid: Pid) -> MemoryBytes;

    /// Launch `command` through the platform shell without waiting for it
    fn spawn(&self, command: &str) -> ProcessResult<ProcessRecord>;

    /// Forcibly end `pid`
    fn terminate(&self, pid: Pid) -> ProcessResult<()>;

    /// Seconds since boot, or the wall clock when no boot clock exists
    fn uptime(&self) -> Uptime;

    /// Give up the rest of the current scheduling quantum
    fn yield_now(&self) {
        std::thread::yield_now();
    }
}
