//! Cooperative cancellation for callers waiting on the coordinator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use super::coordinator::{Monitor, Ticket, WaitQueue};

/// Handle used to withdraw a blocked `rotate` or `show`.
///
/// Clones share the same flag. Cancelling only affects callers that are still
/// waiting for admission; an operation that has already been admitted runs to
/// completion and returns `Ok`.
///
/// ```
/// use concube_core::{CancelToken, Cube, Face};
///
/// let cube = Cube::new(3).unwrap();
/// let token = CancelToken::new();
/// cube.rotate_with(Face::Top, 0, &token).unwrap();
///
/// token.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    waiters: Mutex<Vec<Registration>>,
}

#[derive(Debug)]
struct Registration {
    ticket: Ticket,
    monitor: Weak<Monitor>,
    queue: WaitQueue,
}

impl CancelToken {
    /// Creates a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels every wait currently or subsequently made with this token.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        let waiters = std::mem::take(&mut *self.inner.waiters.lock());
        for registration in waiters {
            if let Some(monitor) = registration.monitor.upgrade() {
                monitor.wake(registration.queue);
            }
        }
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Called with the coordinator lock held, before the first wait.
    pub(crate) fn register(&self, ticket: Ticket, monitor: &Arc<Monitor>, queue: WaitQueue) {
        self.inner.waiters.lock().push(Registration {
            ticket,
            monitor: Arc::downgrade(monitor),
            queue,
        });
    }

    pub(crate) fn unregister(&self, ticket: Ticket, monitor: &Arc<Monitor>) {
        let target = Arc::downgrade(monitor);
        self.inner
            .waiters
            .lock()
            .retain(|r| !(r.ticket == ticket && r.monitor.ptr_eq(&target)));
    }
}
