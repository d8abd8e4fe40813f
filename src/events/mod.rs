/*!
 * Events Module
 * Fixed-capacity in-memory event queue
 */

pub mod queue;
pub mod types;

pub use queue::EventQueue;
pub use types::{Event, EventError, EventKind, EventResult};
