//! Publish/subscribe plumbing for change notifications
//!
//! Every "X changed" notification in this crate flows through an
//! [`EventBus`]. Subscribing returns an [`ObserverHandle`] that the
//! subscriber must pass back to [`EventBus::unsubscribe`] during teardown;
//! there is no implicit cleanup.

use std::sync::{Arc, RwLock};

/// Handle identifying one subscription on one bus
///
/// Handles are never reused within a bus, so unsubscribing twice with the
/// same handle is a harmless no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverHandle(u64);

type Callback<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Registrations<E> {
    next_id: u64,
    entries: Vec<(u64, Callback<E>)>,
}

/// A bus carrying notifications of type `E` to registered observers
///
/// Observers are invoked synchronously on the emitting thread, in
/// registration order. The registration list is snapshotted before
/// delivery, so a callback may subscribe or unsubscribe without
/// deadlocking the bus; such changes take effect from the next emit.
pub struct EventBus<E> {
    inner: RwLock<Registrations<E>>,
}

impl<E> EventBus<E> {
    /// Create a bus with no observers
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Registrations {
                next_id: 0,
                entries: Vec::new(),
            }),
        }
    }

    /// Register an observer, returning the handle needed to unregister it
    pub fn subscribe<F>(&self, observer: F) -> ObserverHandle
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let mut inner = self.inner.write().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.push((id, Arc::new(observer)));
        ObserverHandle(id)
    }

    /// Remove a previously registered observer
    ///
    /// Returns `true` if the handle was registered, `false` if it was
    /// unknown (already removed).
    pub fn unsubscribe(&self, handle: ObserverHandle) -> bool {
        let mut inner = self.inner.write().unwrap();
        let before = inner.entries.len();
        inner.entries.retain(|(id, _)| *id != handle.0);
        inner.entries.len() != before
    }

    /// Deliver an event to every registered observer
    pub fn emit(&self, event: &E) {
        let observers: Vec<Callback<E>> = {
            let inner = self.inner.read().unwrap();
            inner.entries.iter().map(|(_, cb)| cb.clone()).collect()
        };
        for observer in observers {
            observer(event);
        }
    }

    /// Number of registered observers
    pub fn observer_count(&self) -> usize {
        self.inner.read().unwrap().entries.len()
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}
