//! Outbound stanza capture.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::{timeout_at, Instant};

use parlor_protocol::Stanza;

/// Unbounded FIFO buffer for stanzas on their way out of a service.
///
/// Producers push from any task; consumers drain with a bounded wait.
/// Clones share the same buffer. Once closed, pushes are rejected, so a
/// torn-down harness can no longer deliver.
#[derive(Debug, Clone, Default)]
pub struct CaptureQueue {
    shared: Arc<Shared>,
}

#[derive(Debug, Default)]
struct Shared {
    state: Mutex<State>,
    arrived: Notify,
}

#[derive(Debug, Default)]
struct State {
    items: VecDeque<Stanza>,
    closed: bool,
}

impl CaptureQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stanza. Returns false (and drops the stanza) once the queue
    /// is closed.
    pub fn push(&self, stanza: Stanza) -> bool {
        {
            let mut state = self.lock_state();
            if state.closed {
                return false;
            }
            state.items.push_back(stanza);
        }
        self.shared.arrived.notify_one();
        true
    }

    /// Wait up to `wait` for the next stanza, FIFO.
    ///
    /// Returns `None` only once the full wait has elapsed, never before; a
    /// stanza arriving mid-wait is returned as soon as it lands. The wait
    /// cannot be aborted early.
    pub async fn poll(&self, wait: Duration) -> Option<Stanza> {
        let deadline = Instant::now() + wait;
        loop {
            if let Some(stanza) = self.try_take() {
                return Some(stanza);
            }
            if timeout_at(deadline, self.shared.arrived.notified())
                .await
                .is_err()
            {
                // Deadline hit; one last look for a push that raced it.
                return self.try_take();
            }
        }
    }

    /// The next stanza if one is already buffered.
    pub fn try_take(&self) -> Option<Stanza> {
        self.lock_state().items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.lock_state().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_state().items.is_empty()
    }

    /// Drop everything buffered. Pending waits keep waiting.
    pub fn clear(&self) {
        self.lock_state().items.clear();
    }

    /// Reject all future pushes. Buffered stanzas stay drainable.
    pub fn close(&self) {
        self.lock_state().closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.lock_state().closed
    }

    fn lock_state(&self) -> MutexGuard<'_, State> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
