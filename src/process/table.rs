/*!
 * Process Table
 * Validated, traced entry point over the native process model
 */

use super::platform::{self, NativePlatform};
use super::timeout::run_with_timeout;
use super::traits::ProcessPlatform;
use super::types::{ProcessRecord, ProcessResult, Uptime};
use super::validation::{validate_command, validate_kill_target};
use crate::core::types::{MemoryBytes, Pid};
use crate::monitoring::span_operation;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Spawn, terminate, list and probe processes through one platform model
///
/// Input that can never succeed (an empty command, identifier 0, the caller's
/// own identifier, zero capacity) is rejected here before any OS call. Every
/// call is self-contained; the table holds no mutable state.
#[derive(Debug, Clone, Default)]
pub struct ProcessTable<P = NativePlatform> {
    platform: P,
}

impl ProcessTable<NativePlatform> {
    pub fn new() -> Self {
        Self::with_platform(platform::native())
    }
}

impl<P: ProcessPlatform> ProcessTable<P> {
    pub fn with_platform(platform: P) -> Self {
        debug!(platform = platform.name(), "Process table ready");
        Self { platform }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Launch `command` through the platform shell
    ///
    /// The returned record names the command, carries the new identifier and
    /// a best-effort memory reading (often 0 this early), and is `Running`.
    /// The child is not waited for.
    pub fn spawn(&self, command: &str) -> ProcessResult<ProcessRecord> {
        let span = span_operation("process_spawn");
        let _guard = span.enter();

        let result = validate_command(command).and_then(|_| self.platform.spawn(command));
        match &result {
            Ok(record) => {
                span.record_pid(record.pid);
                span.record_result(true);
            }
            Err(e) => {
                warn!(command, error = %e, "Spawn failed");
                span.record_error(&e.to_string());
            }
        }
        result
    }

    /// Forcibly end `pid`
    ///
    /// Fails for identifier 0, for the calling process itself, for identifiers
    /// that no longer resolve, and when privileges are insufficient. A second
    /// call on an identifier that has already gone fails.
    pub fn terminate(&self, pid: Pid) -> ProcessResult<()> {
        let span = span_operation("process_terminate");
        let _guard = span.enter();
        span.record_pid(pid);

        let result = validate_kill_target(pid).and_then(|_| self.platform.terminate(pid));
        match &result {
            Ok(()) => {
                info!(pid, "Terminated process");
                span.record_result(true);
            }
            Err(e) => {
                warn!(pid, error = %e, "Terminate failed");
                span.record_error(&e.to_string());
            }
        }
        result
    }

    /// Snapshot at most `max_count` processes
    ///
    /// No order is imposed. A process that exits mid-snapshot shows up with a
    /// memory reading of 0 rather than failing the batch.
    pub fn list(&self, max_count: usize) -> Vec<ProcessRecord> {
        if max_count == 0 {
            return Vec::new();
        }

        let span = span_operation("process_list");
        let _guard = span.enter();

        let mut records = self.platform.enumerate(max_count);
        records.retain(|record| record.pid != 0);
        records.truncate(max_count);

        span.record_items_processed(records.len());
        span.record_result(true);
        records
    }

    /// Fill `dest` with up to `dest.len()` records and return how many were written
    ///
    /// Slots past the returned count are left untouched.
    pub fn list_into(&self, dest: &mut [ProcessRecord]) -> usize {
        if dest.is_empty() {
            return 0;
        }

        let records = self.list(dest.len());
        let written = records.len();
        for (slot, record) in dest.iter_mut().zip(records) {
            *slot = record;
        }
        written
    }

    /// Resident memory of `pid` in bytes; 0 when unknown
    pub fn memory_of(&self, pid: Pid) -> MemoryBytes {
        if pid == 0 {
            return 0;
        }
        self.platform.probe_memory(pid)
    }

    pub fn uptime(&self) -> Uptime {
        self.platform.uptime()
    }

    pub fn yield_now(&self) {
        self.platform.yield_now();
    }
}

impl<P: ProcessPlatform + Clone + 'static> ProcessTable<P> {
    /// [`list`](Self::list) raced against `timeout` on a helper thread
    pub fn list_within(&self, max_count: usize, timeout: Duration) -> ProcessResult<Vec<ProcessRecord>> {
        let table = self.clone();
        run_with_timeout(timeout, move || table.list(max_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::traits::MockProcessPlatform;
    use crate::process::types::{ProcessError, ProcessStatus};
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;

    fn table(mock: MockProcessPlatform) -> ProcessTable<MockProcessPlatform> {
        let mut mock = mock;
        mock.expect_name().return_const("mock");
        ProcessTable::with_platform(mock)
    }

    #[test]
    fn test_zero_capacity_skips_platform() {
        let mut mock = MockProcessPlatform::new();
        mock.expect_enumerate().never();
        let table = table(mock);

        assert!(table.list(0).is_empty());
        assert_eq!(table.list_into(&mut []), 0);
    }

    #[test]
    fn test_list_drops_pid_zero_and_bounds_output() {
        let mut mock = MockProcessPlatform::new();
        mock.expect_enumerate().with(eq(2)).times(1).returning(|_| {
            vec![
                ProcessRecord::running(0, "idle", 0),
                ProcessRecord::running(10, "a", 1),
                ProcessRecord::running(11, "b", 2),
                ProcessRecord::running(12, "c", 3),
            ]
        });
        let table = table(mock);

        let records = table.list(2);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].pid, 10);
        assert_eq!(records[1].pid, 11);
    }

    #[test]
    fn test_list_into_fills_prefix() {
        let mut mock = MockProcessPlatform::new();
        mock.expect_enumerate()
            .with(eq(4))
            .returning(|_| vec![ProcessRecord::running(3, "x", 0)]);
        let table = table(mock);

        let mut dest = vec![ProcessRecord::default(); 4];
        assert_eq!(table.list_into(&mut dest), 1);
        assert_eq!(dest[0].pid, 3);
        assert_eq!(dest[1], ProcessRecord::default());
    }

    #[test]
    fn test_terminate_rejects_zero_and_self() {
        let mut mock = MockProcessPlatform::new();
        mock.expect_terminate().never();
        let table = table(mock);

        assert_eq!(table.terminate(0), Err(ProcessError::InvalidPid(0)));
        let me = std::process::id();
        assert_eq!(table.terminate(me), Err(ProcessError::SelfTermination(me)));
    }

    #[test]
    fn test_terminate_delegates() {
        let mut mock = MockProcessPlatform::new();
        mock.expect_terminate()
            .with(eq(4321))
            .times(2)
            .returning({
                let mut calls = 0;
                move |pid| {
                    calls += 1;
                    if calls == 1 {
                        Ok(())
                    } else {
                        Err(ProcessError::NotFound(pid))
                    }
                }
            });
        let table = table(mock);

        assert_eq!(table.terminate(4321), Ok(()));
        assert_eq!(table.terminate(4321), Err(ProcessError::NotFound(4321)));
    }

    #[test]
    fn test_spawn_validation() {
        let mut mock = MockProcessPlatform::new();
        mock.expect_spawn().never();
        let table = table(mock);

        assert!(matches!(table.spawn(""), Err(ProcessError::InvalidCommand(_))));
    }

    #[test]
    fn test_spawn_passes_record_through() {
        let mut mock = MockProcessPlatform::new();
        mock.expect_spawn()
            .with(eq("echo hello"))
            .returning(|cmd| Ok(ProcessRecord::running(900, cmd, 0)));
        let table = table(mock);

        let record = table.spawn("echo hello").unwrap();
        assert_eq!(record.pid, 900);
        assert_eq!(record.name(), "echo hello");
        assert_eq!(record.status, ProcessStatus::Running);
    }

    #[test]
    fn test_memory_of_zero_skips_platform() {
        let mut mock = MockProcessPlatform::new();
        mock.expect_probe_memory().with(eq(5)).returning(|_| 8192);
        let table = table(mock);

        assert_eq!(table.memory_of(0), 0);
        assert_eq!(table.memory_of(5), 8192);
    }

    #[test]
    fn test_uptime_passes_through() {
        let mut mock = MockProcessPlatform::new();
        mock.expect_uptime().returning(|| Uptime::since_boot(120));
        let table = table(mock);

        assert_eq!(table.uptime().seconds, 120);
    }
}
