/*!
 * Event Queue
 * Bounded FIFO with explicit full signaling
 */

use super::types::{Event, EventError, EventKind, EventResult};
use crate::core::limits::DEFAULT_EVENT_CAPACITY;
use flume::{Receiver, RecvTimeoutError, Sender, TrySendError};
use std::time::Duration;
use tracing::{debug, trace};

/// Fixed-capacity event queue
///
/// Posting to a full queue fails with [`EventError::QueueFull`]; nothing is
/// overwritten. Clones share the same queue, so producers and consumers can
/// live on different threads.
#[derive(Debug, Clone)]
pub struct EventQueue {
    tx: Sender<Event>,
    rx: Receiver<Event>,
    capacity: usize,
}

impl EventQueue {
    /// Create a queue holding at most `capacity` events (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, rx) = flume::bounded(capacity);
        debug!(capacity, "Event queue initialized");
        Self { tx, rx, capacity }
    }

    /// Copy `payload` into a new event and enqueue it
    pub fn post(&self, id: &str, kind: EventKind, payload: &[u8]) -> EventResult<()> {
        self.push(Event::new(id, kind, payload))
    }

    /// Enqueue an already-built event
    pub fn push(&self, event: Event) -> EventResult<()> {
        match self.tx.try_send(event) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(event)) => {
                trace!(id = %event.id, capacity = self.capacity, "Event dropped, queue full");
                Err(EventError::QueueFull(self.capacity))
            }
            Err(TrySendError::Disconnected(_)) => Err(EventError::Disconnected),
        }
    }

    /// Take the oldest event without blocking
    pub fn poll(&self) -> Option<Event> {
        self.rx.try_recv().ok()
    }

    /// Take the oldest event, blocking up to `timeout`
    ///
    /// A zero timeout behaves like [`poll`](Self::poll).
    pub fn wait(&self, timeout: Duration) -> Option<Event> {
        if timeout.is_zero() {
            return self.poll();
        }

        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Discard every pending event, returning how many were dropped
    pub fn drain(&self) -> usize {
        let dropped = self.rx.drain().count();
        if dropped > 0 {
            debug!(dropped, "Event queue drained");
        }
        dropped
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.rx.is_full()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}
