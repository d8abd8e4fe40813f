/*!
 * Windows Platform
 * Process model backed by Toolhelp snapshots and the process memory counters
 */

use crate::core::limits::{FORCED_EXIT_CODE, KILL_SETTLE_TIMEOUT};
use crate::core::types::{MemoryBytes, Pid};
use crate::core::ProcessName;
use crate::process::spawner;
use crate::process::traits::ProcessPlatform;
use crate::process::types::{ProcessError, ProcessRecord, ProcessResult, Uptime};
use std::mem;
use tracing::{trace, warn};
use winapi::shared::minwindef::{DWORD, FALSE};
use winapi::shared::winerror::{ERROR_ACCESS_DENIED, ERROR_INVALID_PARAMETER};
use winapi::um::errhandlingapi::GetLastError;
use winapi::um::handleapi::{CloseHandle, INVALID_HANDLE_VALUE};
use winapi::um::processthreadsapi::{OpenProcess, TerminateProcess};
use winapi::um::psapi::{GetProcessMemoryInfo, PROCESS_MEMORY_COUNTERS};
use winapi::um::synchapi::WaitForSingleObject;
use winapi::um::sysinfoapi::GetTickCount64;
use winapi::um::tlhelp32::{
    CreateToolhelp32Snapshot, Process32FirstW, Process32NextW, PROCESSENTRY32W, TH32CS_SNAPPROCESS,
};
use winapi::um::winbase::WAIT_OBJECT_0;
use winapi::um::winnt::{
    HANDLE, PROCESS_QUERY_INFORMATION, PROCESS_TERMINATE, PROCESS_VM_READ, SYNCHRONIZE,
};

/// RAII wrapper closing a kernel handle on drop
struct OwnedHandle(HANDLE);

impl OwnedHandle {
    /// Open `pid` with `access`, reporting the failure code
    fn open_process(access: DWORD, pid: Pid) -> Result<Self, DWORD> {
        let handle = unsafe { OpenProcess(access, FALSE, pid) };
        if handle.is_null() {
            Err(unsafe { GetLastError() })
        } else {
            Ok(Self(handle))
        }
    }

    fn snapshot() -> Option<Self> {
        let handle = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) };
        (handle != INVALID_HANDLE_VALUE).then_some(Self(handle))
    }
}

impl Drop for OwnedHandle {
    fn drop(&mut self) {
        unsafe {
            CloseHandle(self.0);
        }
    }
}

/// Toolhelp-backed process model
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsPlatform;

impl WindowsPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessPlatform for WindowsPlatform {
    fn name(&self) -> &'static str {
        "windows-toolhelp"
    }

    fn enumerate(&self, max_count: usize) -> Vec<ProcessRecord> {
        if max_count == 0 {
            return Vec::new();
        }

        let Some(snapshot) = OwnedHandle::snapshot() else {
            warn!(code = unsafe { GetLastError() }, "CreateToolhelp32Snapshot failed");
            return Vec::new();
        };

        let mut records = Vec::new();
        let mut entry: PROCESSENTRY32W = unsafe { mem::zeroed() };
        entry.dwSize = mem::size_of::<PROCESSENTRY32W>() as DWORD;

        let mut more = unsafe { Process32FirstW(snapshot.0, &mut entry) } != 0;
        while more && records.len() < max_count {
            // The idle process reports identifier 0
            if entry.th32ProcessID != 0 {
                let pid = entry.th32ProcessID;
                let name = wide_name(&entry.szExeFile);
                records.push(ProcessRecord::running(pid, name, self.probe_memory(pid)));
            }
            more = unsafe { Process32NextW(snapshot.0, &mut entry) } != 0;
        }

        records
    }

    fn probe_memory(&self, pid: Pid) -> MemoryBytes {
        let handle = match OwnedHandle::open_process(PROCESS_QUERY_INFORMATION | PROCESS_VM_READ, pid) {
            Ok(handle) => handle,
            Err(code) => {
                trace!(pid, code, "OpenProcess for memory query failed");
                return 0;
            }
        };

        let mut counters: PROCESS_MEMORY_COUNTERS = unsafe { mem::zeroed() };
        let size = mem::size_of::<PROCESS_MEMORY_COUNTERS>() as DWORD;
        if unsafe { GetProcessMemoryInfo(handle.0, &mut counters, size) } != 0 {
            counters.WorkingSetSize as MemoryBytes
        } else {
            0
        }
    }

    fn spawn(&self, command: &str) -> ProcessResult<ProcessRecord> {
        let pid = spawner::spawn_detached(command)?;
        Ok(ProcessRecord::running(pid, command, self.probe_memory(pid)))
    }

    /// TerminateProcess, then wait for the process object to signal
    fn terminate(&self, pid: Pid) -> ProcessResult<()> {
        let handle = OwnedHandle::open_process(PROCESS_TERMINATE | SYNCHRONIZE, pid)
            .map_err(|code| code_to_error(pid, code))?;

        if unsafe { TerminateProcess(handle.0, FORCED_EXIT_CODE) } == 0 {
            return Err(code_to_error(pid, unsafe { GetLastError() }));
        }

        let wait_ms = KILL_SETTLE_TIMEOUT.as_millis() as DWORD;
        if unsafe { WaitForSingleObject(handle.0, wait_ms) } != WAIT_OBJECT_0 {
            trace!(pid, "Terminated process has not exited yet");
        }
        Ok(())
    }

    /// Milliseconds since boot from GetTickCount64
    fn uptime(&self) -> Uptime {
        Uptime::since_boot(unsafe { GetTickCount64() } / 1000)
    }
}

/// Decode a NUL-terminated UTF-16 image name
fn wide_name(raw: &[u16]) -> ProcessName {
    let end = raw.iter().position(|&c| c == 0).unwrap_or(raw.len());
    ProcessName::from(String::from_utf16_lossy(&raw[..end]))
}

fn code_to_error(pid: Pid, code: DWORD) -> ProcessError {
    match code {
        ERROR_INVALID_PARAMETER => ProcessError::NotFound(pid),
        ERROR_ACCESS_DENIED => ProcessError::PermissionDenied(pid),
        other => ProcessError::Os(format!("Win32 error {}", other)),
    }
}
