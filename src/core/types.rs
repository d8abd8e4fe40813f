/*!
 * Core Types
 * Common types used across the crate
 */

/// OS process identifier
///
/// Zero never names a real process in any record this crate produces.
pub type Pid = u32;

/// Resident memory in bytes. `0` doubles as "unknown".
pub type MemoryBytes = usize;
