/*!
 * Event Types
 */

use bytes::Bytes;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Event queue operation result
pub type EventResult<T> = Result<T, EventError>;

/// Event queue errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum EventError {
    #[error("Event queue full (capacity {0})")]
    #[diagnostic(
        code(events::queue_full),
        help("Poll pending events before posting more, or create the queue with a larger capacity.")
    )]
    QueueFull(usize),

    #[error("Event queue disconnected")]
    #[diagnostic(code(events::disconnected))]
    Disconnected,
}

/// Event category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    #[default]
    None,
    Io,
    Timer,
    Signal,
    Custom,
}

/// One queued event
///
/// The payload is copied when the event is posted, so the poster's buffer can
/// be reused immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    pub kind: EventKind,
    pub payload: Bytes,
}

impl Event {
    pub fn new(id: impl Into<String>, kind: EventKind, payload: &[u8]) -> Self {
        Self {
            id: id.into(),
            kind,
            payload: Bytes::copy_from_slice(payload),
        }
    }

    /// A custom event, the kind user code posts
    pub fn custom(id: impl Into<String>, payload: &[u8]) -> Self {
        Self::new(id, EventKind::Custom, payload)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.payload.len()
    }
}
