/*!
 * Process Module
 * Spawning, enumeration, memory probing, termination and uptime
 */

pub mod platform;
pub mod table;
pub mod timeout;
pub mod traits;
pub mod types;

mod spawner;
mod validation;

// Re-export for convenience
pub use platform::{native, FallbackPlatform, NativePlatform};
pub use table::ProcessTable;
pub use timeout::run_with_timeout;
pub use traits::ProcessPlatform;
pub use types::{ProcessError, ProcessRecord, ProcessResult, ProcessStatus, Uptime, UptimeSource};
