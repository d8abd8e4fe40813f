/*!
 * Linux Platform
 * Process model backed by the /proc virtual filesystem
 */

use super::unix;
use crate::core::limits::{DEFAULT_LIST_CAPACITY, DEFAULT_PROC_ROOT};
use crate::core::types::{MemoryBytes, Pid};
use crate::core::ProcessName;
use crate::process::spawner;
use crate::process::traits::ProcessPlatform;
use crate::process::types::{ProcessRecord, ProcessResult, Uptime};
use nix::time::{clock_gettime, ClockId};
use nix::unistd::{sysconf, SysconfVar};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{trace, warn};

/// procfs-backed process model
///
/// Enumeration walks the numeric entries of the proc root, reading each
/// image name from `<pid>/comm` and memory from the first `<pid>/statm`
/// field (program size in pages).
#[derive(Debug, Clone)]
pub struct LinuxPlatform {
    proc_root: PathBuf,
    page_size: MemoryBytes,
}

impl LinuxPlatform {
    pub fn new() -> Self {
        Self::with_proc_root(DEFAULT_PROC_ROOT)
    }

    /// Use a different procfs mount (a container's, or a fixture tree)
    pub fn with_proc_root(proc_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
            page_size: page_size(),
        }
    }

    pub fn proc_root(&self) -> &Path {
        &self.proc_root
    }

    /// Image name from `comm`, or the directory name if that is unreadable
    fn read_name(&self, dir: &Path, fallback: &str) -> ProcessName {
        match fs::read(dir.join("comm")) {
            Ok(raw) if !raw.is_empty() => ProcessName::from_os_bytes(&raw),
            Ok(_) => ProcessName::from(fallback),
            Err(e) => {
                trace!(dir = %dir.display(), error = %e, "comm unreadable");
                ProcessName::from(fallback)
            }
        }
    }

    /// Whether `pid` has exited and is waiting to be reaped
    fn is_defunct(&self, pid: Pid) -> bool {
        let path = self.proc_root.join(pid.to_string()).join("stat");
        fs::read_to_string(path)
            .ok()
            .and_then(|contents| parse_stat_state(&contents))
            .is_some_and(|state| matches!(state, 'Z' | 'X'))
    }
}

impl Default for LinuxPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessPlatform for LinuxPlatform {
    fn name(&self) -> &'static str {
        "linux-procfs"
    }

    fn enumerate(&self, max_count: usize) -> Vec<ProcessRecord> {
        if max_count == 0 {
            return Vec::new();
        }

        let entries = match fs::read_dir(&self.proc_root) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(root = %self.proc_root.display(), error = %e, "Cannot open proc root");
                return Vec::new();
            }
        };

        let mut records = Vec::with_capacity(max_count.min(DEFAULT_LIST_CAPACITY));
        for entry in entries {
            if records.len() >= max_count {
                break;
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    trace!(error = %e, "Skipping unreadable proc entry");
                    continue;
                }
            };

            let file_name = entry.file_name();
            let Some(dir_name) = file_name.to_str() else {
                continue;
            };
            let Some(pid) = parse_pid(dir_name) else {
                continue;
            };

            let name = self.read_name(&entry.path(), dir_name);
            records.push(ProcessRecord::running(pid, name, self.probe_memory(pid)));
        }

        records
    }

    fn probe_memory(&self, pid: Pid) -> MemoryBytes {
        if pid == 0 {
            return 0;
        }

        let path = self.proc_root.join(pid.to_string()).join("statm");
        match fs::read_to_string(&path) {
            Ok(contents) => parse_statm_pages(&contents)
                .map(|pages| pages.saturating_mul(self.page_size))
                .unwrap_or(0),
            Err(e) => {
                trace!(pid, error = %e, "statm unreadable");
                0
            }
        }
    }

    fn spawn(&self, command: &str) -> ProcessResult<ProcessRecord> {
        let pid = spawner::spawn_detached(command)?;
        Ok(ProcessRecord::running(pid, command, self.probe_memory(pid)))
    }

    fn terminate(&self, pid: Pid) -> ProcessResult<()> {
        unix::kill_process(pid, |pid| self.is_defunct(pid))
    }

    /// CLOCK_BOOTTIME, then `<proc root>/uptime`, then the wall clock
    fn uptime(&self) -> Uptime {
        match clock_gettime(ClockId::CLOCK_BOOTTIME) {
            Ok(ts) => return Uptime::since_boot(u64::try_from(ts.tv_sec()).unwrap_or(0)),
            Err(errno) => trace!(errno = %errno, "CLOCK_BOOTTIME unavailable"),
        }

        let proc_uptime = fs::read_to_string(self.proc_root.join("uptime"))
            .ok()
            .and_then(|contents| parse_proc_uptime(&contents));
        if let Some(seconds) = proc_uptime {
            return Uptime::since_boot(seconds);
        }

        warn!("No boot clock available, reporting wall-clock time as uptime");
        Uptime::wall_clock()
    }
}

/// System page size, or 0 (which turns every memory reading into "unknown")
fn page_size() -> MemoryBytes {
    match sysconf(SysconfVar::PAGE_SIZE) {
        Ok(Some(size)) if size > 0 => size as MemoryBytes,
        _ => 0,
    }
}

/// Parse a proc directory name; only all-digit, non-zero names qualify
pub(crate) fn parse_pid(name: &str) -> Option<Pid> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse::<Pid>().ok().filter(|&pid| pid > 0)
}

/// Page count from the first field of statm
fn parse_statm_pages(contents: &str) -> Option<usize> {
    contents
        .split_ascii_whitespace()
        .next()?
        .parse::<usize>()
        .ok()
        .filter(|&pages| pages > 0)
}

/// State letter from `<pid>/stat`
///
/// The command name sits in parentheses and may itself contain `)` or
/// spaces, so the state is read after the last `)`.
fn parse_stat_state(contents: &str) -> Option<char> {
    let close = contents.rfind(')')?;
    contents[close + 1..].split_ascii_whitespace().next()?.chars().next()
}

/// Whole seconds from the first field of /proc/uptime
fn parse_proc_uptime(contents: &str) -> Option<u64> {
    let seconds: f64 = contents.split_ascii_whitespace().next()?.parse().ok()?;
    (seconds.is_finite() && seconds >= 0.0).then(|| seconds as u64)
}
