/*!
 * Spawn and Terminate Tests
 * Real child processes launched through the platform shell
 */

use super::common::{long_running_command, wait_for_exit, UNUSED_PID};
use hostproc::{ProcessError, ProcessStatus, ProcessTable};
use pretty_assertions::assert_eq;
use serial_test::serial;

#[test]
#[serial]
fn test_spawn_echo() {
    let table = ProcessTable::new();
    let record = table.spawn("echo hello").unwrap();

    assert!(record.pid > 0);
    assert!(record.name().contains("echo hello"));
    assert_eq!(record.status, ProcessStatus::Running);
}

#[test]
#[serial]
fn test_spawn_uses_shell() {
    // Pipes and sequencing only work through an interpreter
    let record = hostproc::spawn("echo one | sort; echo two").unwrap();
    assert!(record.pid > 0);
}

#[test]
fn test_spawn_empty_command_fails() {
    assert!(matches!(
        hostproc::spawn(""),
        Err(ProcessError::InvalidCommand(_))
    ));
    assert!(matches!(
        hostproc::spawn("  "),
        Err(ProcessError::InvalidCommand(_))
    ));
}

#[test]
#[serial]
fn test_terminate_once_then_fails() {
    let table = ProcessTable::new();

    for _ in 0..10 {
        let record = table.spawn(long_running_command()).unwrap();

        assert_eq!(table.terminate(record.pid), Ok(()));
        assert_eq!(
            table.terminate(record.pid),
            Err(ProcessError::NotFound(record.pid))
        );
    }
}

#[test]
#[serial]
fn test_memory_of_exited_process_is_zero() {
    let table = ProcessTable::new();
    let record = table.spawn(if cfg!(windows) { "exit /b 0" } else { "exit 0" }).unwrap();

    assert_eq!(
        wait_for_exit(&table, record.pid),
        Some(ProcessError::NotFound(record.pid))
    );
    assert_eq!(table.memory_of(record.pid), 0);
}

#[test]
fn test_terminate_zero_fails() {
    assert_eq!(hostproc::terminate(0), Err(ProcessError::InvalidPid(0)));
}

#[test]
fn test_terminate_self_fails() {
    let me = std::process::id();
    assert_eq!(
        hostproc::terminate(me),
        Err(ProcessError::SelfTermination(me))
    );
}

#[test]
fn test_terminate_unknown_pid_fails() {
    assert!(hostproc::terminate(UNUSED_PID).is_err());
}

#[cfg(unix)]
#[test]
fn test_terminate_init_denied_or_missing() {
    // PID 1 belongs to another user (or another namespace) in any sane test run
    if nix::unistd::Uid::effective().is_root() {
        return;
    }
    assert!(matches!(
        hostproc::terminate(1),
        Err(ProcessError::PermissionDenied(1)) | Err(ProcessError::NotFound(1))
    ));
}

#[test]
fn test_memory_of_unknown_pid_is_zero() {
    assert_eq!(hostproc::memory_of(UNUSED_PID), 0);
    assert_eq!(hostproc::memory_of(0), 0);
}

#[cfg(any(target_os = "linux", target_os = "macos", windows))]
#[test]
fn test_memory_of_self_is_known() {
    assert!(hostproc::memory_of(std::process::id()) > 0);
}
