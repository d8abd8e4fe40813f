/*!
 * Fallback Platform
 * Degraded model for targets without a supported process API
 */

use crate::core::types::{MemoryBytes, Pid};
use crate::process::traits::ProcessPlatform;
use crate::process::types::{ProcessError, ProcessRecord, ProcessResult, Uptime};

/// Sees no processes and cannot start or stop any
///
/// Uptime comes from the wall clock and is flagged as such.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackPlatform;

impl ProcessPlatform for FallbackPlatform {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn enumerate(&self, _max_count: usize) -> Vec<ProcessRecord> {
        Vec::new()
    }

    fn probe_memory(&self, _pid: Pid) -> MemoryBytes {
        0
    }

    fn spawn(&self, _command: &str) -> ProcessResult<ProcessRecord> {
        Err(ProcessError::Unsupported("spawn".to_string()))
    }

    fn terminate(&self, _pid: Pid) -> ProcessResult<()> {
        Err(ProcessError::Unsupported("terminate".to_string()))
    }

    fn uptime(&self) -> Uptime {
        Uptime::wall_clock()
    }
}
