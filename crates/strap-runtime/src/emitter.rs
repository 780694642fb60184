//! Outbound widget notifications
//!
//! Replaces ancestor-walking event dispatch with an explicit channel the host
//! subscribes to.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct Emitter<E> {
    listeners: Arc<RwLock<Vec<(SubscriptionId, Listener<E>)>>>,
    next_id: Arc<AtomicU64>,
}

impl<E> Emitter<E> {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Register a listener, called for every emitted event
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Deliver an event to every listener, returning how many were called.
    ///
    /// Listeners are snapshotted first and no lock is held while they run, so a
    /// listener may subscribe, unsubscribe or drive the emitting widget again.
    pub fn emit(&self, event: &E) -> usize {
        let snapshot: Vec<Listener<E>> = self
            .listeners
            .read()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in &snapshot {
            listener(event);
        }

        snapshot.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }
}

impl<E> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Emitter<E> {
    fn clone(&self) -> Self {
        Self {
            listeners: Arc::clone(&self.listeners),
            next_id: Arc::clone(&self.next_id),
        }
    }
}
