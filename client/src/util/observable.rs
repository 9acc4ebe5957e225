//! Shared observable value cell with RAII subscriptions.
//!
//! DESIGN
//! ======
//! UI state that is owned by one part of the app and read by many (theme,
//! current location) lives in an `Observable`. Readers subscribe with a
//! typed handler and hold the returned `Subscription` for as long as they
//! are mounted; dropping it is the only way to stop notifications.
//!
//! Handlers run synchronously on the thread that calls `set`, in
//! subscription order, with no lock held. A handler may call `set` on the
//! same cell; when that happens the outer notification stops early because
//! every subscriber has already seen the newer value.
//!
//! Writers take turns: a `set` from another thread waits until the current
//! store-and-deliver pass finishes, so every subscriber sees values in the
//! order they were stored. A handler must not block on another thread that
//! writes the same cell.

#[cfg(test)]
#[path = "observable_test.rs"]
mod observable_test;

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError, RwLock, Weak};
use std::thread::{self, ThreadId};

type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Entry<T> {
    id: u64,
    active: Arc<AtomicBool>,
    handler: Handler<T>,
}

struct Subscribers<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

/// Exclusive right to store a value and deliver it.
#[derive(Default)]
struct Writer {
    owner: Mutex<Option<ThreadId>>,
    released: Condvar,
}

impl Writer {
    /// Wait until no other thread holds the turn. Returns `None` when the
    /// calling thread already holds it (a `set` from inside a handler).
    fn acquire(&self) -> Option<Turn<'_>> {
        let me = thread::current().id();
        let mut owner = self.owner.lock().unwrap_or_else(PoisonError::into_inner);
        if *owner == Some(me) {
            return None;
        }
        while owner.is_some() {
            owner = self.released.wait(owner).unwrap_or_else(PoisonError::into_inner);
        }
        *owner = Some(me);
        Some(Turn { writer: self })
    }
}

struct Turn<'a> {
    writer: &'a Writer,
}

impl Drop for Turn<'_> {
    fn drop(&mut self) {
        *self.writer.owner.lock().unwrap_or_else(PoisonError::into_inner) = None;
        self.writer.released.notify_all();
    }
}

struct Inner<T> {
    value: RwLock<T>,
    version: AtomicU64,
    writer: Writer,
    subscribers: Mutex<Subscribers<T>>,
}

impl<T> Inner<T> {
    fn remove(&self, id: u64) {
        let mut subs = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        subs.entries.retain(|e| e.id != id);
    }
}

/// A shared value cell. Clones refer to the same cell.
pub struct Observable<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.inner.value.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Observable").field("value", &*value).finish_non_exhaustive()
    }
}

impl<T> Observable<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                value: RwLock::new(value),
                version: AtomicU64::new(0),
                writer: Writer::default(),
                subscribers: Mutex::new(Subscribers { next_id: 0, entries: Vec::new() }),
            }),
        }
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.value.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Store `value` and notify subscribers. Returns `false` without
    /// notifying when the value is unchanged.
    pub fn set(&self, value: T) -> bool {
        let _turn = self.inner.writer.acquire();
        let version = {
            let mut guard = self.inner.value.write().unwrap_or_else(PoisonError::into_inner);
            if *guard == value {
                return false;
            }
            *guard = value.clone();
            self.inner.version.fetch_add(1, Ordering::AcqRel) + 1
        };

        let snapshot: Vec<(Arc<AtomicBool>, Handler<T>)> = {
            let subs = self.inner.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
            subs.entries.iter().map(|e| (Arc::clone(&e.active), Arc::clone(&e.handler))).collect()
        };

        for (active, handler) in snapshot {
            // A handler stored a newer value; it has already been delivered.
            if self.inner.version.load(Ordering::Acquire) != version {
                break;
            }
            if active.load(Ordering::Acquire) {
                handler(&value);
            }
        }
        true
    }

    /// Register `handler` for future changes. The handler is not called with
    /// the current value; read it with [`Observable::get`] first.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let active = Arc::new(AtomicBool::new(true));
        let id = {
            let mut subs = self.inner.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
            let id = subs.next_id;
            subs.next_id += 1;
            subs.entries.push(Entry { id, active: Arc::clone(&active), handler: Arc::new(handler) });
            id
        };

        let cell: Weak<Inner<T>> = Arc::downgrade(&self.inner);
        Subscription {
            release: Some(Box::new(move || {
                active.store(false, Ordering::Release);
                if let Some(inner) = cell.upgrade() {
                    inner.remove(id);
                }
            })),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().unwrap_or_else(PoisonError::into_inner).entries.len()
    }
}

impl<T> Default for Observable<T>
where
    T: Clone + PartialEq + Send + Sync + Default + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Handle for one registered handler. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Stop notifications now. Equivalent to dropping the handle.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("active", &self.release.is_some()).finish()
    }
}
