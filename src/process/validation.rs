/*!
 * Process Input Validation
 * Checks applied before any platform call is made
 */

use super::types::{ProcessError, ProcessResult};
use crate::core::types::Pid;

/// Validate a command line handed to the shell
pub(crate) fn validate_command(command: &str) -> ProcessResult<()> {
    if command.trim().is_empty() {
        return Err(ProcessError::InvalidCommand(
            "Command cannot be empty".to_string(),
        ));
    }

    // The interpreter receives the command as a C string
    if command.contains('\0') {
        return Err(ProcessError::InvalidCommand(
            "Command contains a NUL byte".to_string(),
        ));
    }

    Ok(())
}

/// Validate the target of a forced termination
///
/// Identifier 0 is rejected everywhere (on Unix it would signal the caller's
/// whole process group), and so is the caller's own identifier.
pub(crate) fn validate_kill_target(pid: Pid) -> ProcessResult<()> {
    if pid == 0 {
        return Err(ProcessError::InvalidPid(pid));
    }

    if pid == std::process::id() {
        return Err(ProcessError::SelfTermination(pid));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_command_rejected() {
        assert!(matches!(
            validate_command(""),
            Err(ProcessError::InvalidCommand(_))
        ));
        assert!(matches!(
            validate_command("   \t"),
            Err(ProcessError::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_nul_rejected() {
        assert!(validate_command("echo a\0b").is_err());
    }

    #[test]
    fn test_shell_syntax_allowed() {
        assert!(validate_command("echo hello | tr a-z A-Z; sleep 0").is_ok());
    }

    #[test]
    fn test_kill_target() {
        assert_eq!(validate_kill_target(0), Err(ProcessError::InvalidPid(0)));
        let me = std::process::id();
        assert_eq!(validate_kill_target(me), Err(ProcessError::SelfTermination(me)));
        assert!(validate_kill_target(1).is_ok() || me == 1);
    }
}
