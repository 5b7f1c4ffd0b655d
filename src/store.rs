//! Observable state container
//!
//! A `Store` holds one value and notifies subscribers whenever it is replaced.
//! Only the crate can write to a store; consumers read the current value or
//! subscribe to changes.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    value: T,
    next_id: u64,
    subscribers: BTreeMap<u64, Callback<T>>,
}

/// A value that can be observed for changes
///
/// Cloning a `Store` yields another handle to the same value.
pub struct Store<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = lock(&self.inner);
        f.debug_struct("Store")
            .field("value", &inner.value)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T: Clone> Store<T> {
    /// Creates a store holding `initial`
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value: initial,
                next_id: 0,
                subscribers: BTreeMap::new(),
            })),
        }
    }

    /// Returns a copy of the current value
    pub fn get_current(&self) -> T {
        lock(&self.inner).value.clone()
    }

    /// Registers a callback for value changes
    ///
    /// The callback is invoked immediately with the current value, then once per
    /// `set`. It stays registered until the returned `Subscription` is
    /// unsubscribed or dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
        T: Send + 'static,
    {
        let callback: Callback<T> = Arc::new(callback);
        let (id, current) = {
            let mut inner = lock(&self.inner);
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.insert(id, Arc::clone(&callback));
            (id, inner.value.clone())
        };

        callback(&current);

        let weak = Arc::downgrade(&self.inner);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    lock(&inner).subscribers.remove(&id);
                }
            })),
        }
    }

    /// Replaces the value and notifies every subscriber
    ///
    /// Subscribers are called outside the store lock so they may read the store.
    pub(crate) fn set(&self, value: T) {
        let callbacks: Vec<_> = {
            let mut inner = lock(&self.inner);
            inner.value = value.clone();
            inner.subscribers.values().cloned().collect()
        };
        for callback in callbacks {
            callback(&value);
        }
    }
}

/// Handle returned by [`Store::subscribe`]
///
/// Dropping it detaches the callback.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Detaches the callback from its store
    pub fn unsubscribe(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.detach.is_some())
            .finish()
    }
}
