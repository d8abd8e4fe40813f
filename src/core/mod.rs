/*!
 * Core Module
 * Shared types, limits, and owned-name storage
 */

pub mod limits;
pub mod name;
pub mod types;

pub use name::ProcessName;
pub use types::{MemoryBytes, Pid};
