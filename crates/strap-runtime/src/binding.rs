//! Two-way model bindings
//!
//! The host owns the model storage. Widgets read and write it through a
//! get/set pair and never keep a private copy.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::emitter::{Emitter, SubscriptionId};

pub trait ModelBinding<T>: Send + Sync {
    fn get(&self) -> Option<T>;

    /// Store a new value. Watchers must fire even if it equals the old one.
    fn set(&self, value: T);
}

/// Host-side model storage with change watchers
pub struct SharedModel<T> {
    value: Arc<RwLock<Option<T>>>,
    watchers: Emitter<T>,
}

impl<T> SharedModel<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            value: Arc::new(RwLock::new(None)),
            watchers: Emitter::new(),
        }
    }

    pub fn with_value(value: T) -> Self {
        let model = Self::new();
        *model.value.write() = Some(value);
        model
    }

    /// Call `watcher` with the new value on every `set`
    pub fn watch<F>(&self, watcher: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.watchers.subscribe(watcher)
    }

    pub fn unwatch(&self, id: SubscriptionId) -> bool {
        self.watchers.unsubscribe(id)
    }

    /// Reset to unset without notifying watchers
    pub fn clear(&self) {
        *self.value.write() = None;
    }
}

impl<T> ModelBinding<T> for SharedModel<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn get(&self) -> Option<T> {
        self.value.read().clone()
    }

    fn set(&self, value: T) {
        *self.value.write() = Some(value.clone());
        self.watchers.emit(&value);
    }
}

impl<T> Default for SharedModel<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SharedModel<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            watchers: self.watchers.clone(),
        }
    }
}
