/*!
 * macOS Platform
 * Process model backed by the kernel process table (sysctl) and libproc
 */

use super::unix;
use crate::core::types::{MemoryBytes, Pid};
use crate::core::ProcessName;
use crate::process::spawner;
use crate::process::traits::ProcessPlatform;
use crate::process::types::{ProcessRecord, ProcessResult, Uptime};
use libc::{c_int, c_void};
use std::{mem, ptr};
use tracing::{trace, warn};

/// sysctl-backed process model
#[derive(Debug, Clone, Copy, Default)]
pub struct MacosPlatform;

impl MacosPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessPlatform for MacosPlatform {
    fn name(&self) -> &'static str {
        "macos-sysctl"
    }

    fn enumerate(&self, max_count: usize) -> Vec<ProcessRecord> {
        if max_count == 0 {
            return Vec::new();
        }

        kernel_process_table()
            .iter()
            .filter_map(|info| {
                let pid = Pid::try_from(info.kp_proc.p_pid).ok().filter(|&pid| pid > 0)?;
                let comm: Vec<u8> = info.kp_proc.p_comm.iter().map(|&c| c as u8).collect();
                Some((pid, ProcessName::from_os_bytes(&comm)))
            })
            .take(max_count)
            .map(|(pid, name)| ProcessRecord::running(pid, name, self.probe_memory(pid)))
            .collect()
    }

    fn probe_memory(&self, pid: Pid) -> MemoryBytes {
        let Ok(raw) = c_int::try_from(pid) else {
            return 0;
        };
        if raw <= 0 {
            return 0;
        }

        // SAFETY: proc_taskinfo is plain data; proc_pidinfo writes at most `size` bytes
        let mut info: libc::proc_taskinfo = unsafe { mem::zeroed() };
        let size = mem::size_of::<libc::proc_taskinfo>() as c_int;
        let written = unsafe {
            libc::proc_pidinfo(
                raw,
                libc::PROC_PIDTASKINFO,
                0,
                &mut info as *mut _ as *mut c_void,
                size,
            )
        };

        if written == size {
            info.pti_resident_size as MemoryBytes
        } else {
            trace!(pid, written, "proc_pidinfo(PROC_PIDTASKINFO) failed");
            0
        }
    }

    fn spawn(&self, command: &str) -> ProcessResult<ProcessRecord> {
        let pid = spawner::spawn_detached(command)?;
        Ok(ProcessRecord::running(pid, command, self.probe_memory(pid)))
    }

    fn terminate(&self, pid: Pid) -> ProcessResult<()> {
        unix::kill_process(pid, is_defunct)
    }

    /// kern.boottime subtracted from now, else the wall clock
    fn uptime(&self) -> Uptime {
        let mut mib = [libc::CTL_KERN, libc::KERN_BOOTTIME];
        // SAFETY: timeval is plain data and `size` matches it
        let mut boot: libc::timeval = unsafe { mem::zeroed() };
        let mut size = mem::size_of::<libc::timeval>();
        let rc = unsafe {
            libc::sysctl(
                mib.as_mut_ptr(),
                mib.len() as u32,
                &mut boot as *mut _ as *mut c_void,
                &mut size,
                ptr::null_mut(),
                0,
            )
        };

        let now = Uptime::wall_clock().seconds;
        match u64::try_from(boot.tv_sec) {
            Ok(boot_secs) if rc == 0 && boot_secs > 0 && boot_secs <= now => {
                Uptime::since_boot(now - boot_secs)
            }
            _ => {
                warn!("kern.boottime unavailable, reporting wall-clock time as uptime");
                Uptime::wall_clock()
            }
        }
    }
}

/// `pbi_status` of a process that has exited but not been reaped
const SZOMB: u32 = 5;

/// Whether `pid` is a zombie, per `proc_pidinfo(PROC_PIDTBSDINFO)`
fn is_defunct(pid: Pid) -> bool {
    let Ok(raw) = c_int::try_from(pid) else {
        return false;
    };

    // SAFETY: proc_bsdinfo is plain data; proc_pidinfo writes at most `size` bytes
    let mut info: libc::proc_bsdinfo = unsafe { mem::zeroed() };
    let size = mem::size_of::<libc::proc_bsdinfo>() as c_int;
    let written = unsafe {
        libc::proc_pidinfo(
            raw,
            libc::PROC_PIDTBSDINFO,
            0,
            &mut info as *mut _ as *mut c_void,
            size,
        )
    };
    written == size && info.pbi_status == SZOMB
}

/// One `sysctl(KERN_PROC_ALL)` query of the whole process table
///
/// The table can grow between the size probe and the copy, so the buffer gets
/// some headroom. Any failure yields an empty table.
fn kernel_process_table() -> Vec<libc::kinfo_proc> {
    let mut mib = [libc::CTL_KERN, libc::KERN_PROC, libc::KERN_PROC_ALL, 0];
    let entry_size = mem::size_of::<libc::kinfo_proc>();

    let mut size: libc::size_t = 0;
    let rc = unsafe {
        libc::sysctl(
            mib.as_mut_ptr(),
            mib.len() as u32,
            ptr::null_mut(),
            &mut size,
            ptr::null_mut(),
            0,
        )
    };
    if rc < 0 {
        warn!(error = %std::io::Error::last_os_error(), "sysctl(KERN_PROC_ALL) size probe failed");
        return Vec::new();
    }

    let estimate = size / entry_size;
    let mut table: Vec<libc::kinfo_proc> = Vec::with_capacity(estimate + estimate / 8 + 16);
    let mut size = table.capacity() * entry_size;
    let rc = unsafe {
        libc::sysctl(
            mib.as_mut_ptr(),
            mib.len() as u32,
            table.as_mut_ptr() as *mut c_void,
            &mut size,
            ptr::null_mut(),
            0,
        )
    };
    if rc < 0 {
        warn!(error = %std::io::Error::last_os_error(), "sysctl(KERN_PROC_ALL) copy failed");
        return Vec::new();
    }

    // SAFETY: the kernel initialized `size` bytes of whole kinfo_proc entries
    unsafe { table.set_len(size / entry_size) };
    table
}
