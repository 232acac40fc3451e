//! Scoped event subscriptions with explicit teardown.
//!
//! [`Listeners`] is a small registry of handlers for one event type. Each
//! call to [`Listeners::subscribe`] hands back a [`Subscription`] guard; the
//! handler stays registered exactly as long as the guard lives. Dropping
//! the guard (or calling [`Subscription::unsubscribe`]) runs its teardown.
//!
//! Handlers are plain closures, so whatever they capture is frozen at
//! subscription time. Owners that capture changing state re-subscribe when
//! that state changes, replacing the old guard.
//!
//! ```rust
//! use launch_browser::subscription::Listeners;
//!
//! let listeners: Listeners<u32, &'static str> = Listeners::new();
//! let guard = listeners.subscribe(|n: &u32| (*n > 10).then_some("big"));
//!
//! assert_eq!(listeners.dispatch(&42), vec!["big"]);
//! assert!(listeners.dispatch(&1).is_empty());
//!
//! drop(guard);
//! assert!(listeners.is_empty());
//! ```

use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};

type Handler<E, A> = Box<dyn Fn(&E) -> Option<A> + Send + Sync>;

struct Registry<E, A> {
    next_id: u64,
    handlers: Vec<(u64, Handler<E, A>)>,
}

/// Registry of handlers reacting to events of type `E` with actions of type `A`.
pub struct Listeners<E, A> {
    registry: Arc<Mutex<Registry<E, A>>>,
}

impl<E: 'static, A: 'static> Listeners<E, A> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }

    /// Registers `handler` until the returned guard is dropped.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&E) -> Option<A> + Send + Sync + 'static,
    {
        let id = {
            let mut registry = self.registry.lock();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.handlers.push((id, Box::new(handler)));
            id
        };

        let registry: Weak<Mutex<Registry<E, A>>> = Arc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.lock().handlers.retain(|(handler_id, _)| *handler_id != id);
            }
        })
    }

    /// Feeds `event` to every handler, in subscription order, collecting
    /// the actions they produce. Handlers must not subscribe from inside.
    pub fn dispatch(&self, event: &E) -> Vec<A> {
        self.registry
            .lock()
            .handlers
            .iter()
            .filter_map(|(_, handler)| handler(event))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.registry.lock().handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: 'static, A: 'static> Default for Listeners<E, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, A> fmt::Debug for Listeners<E, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("handlers", &self.registry.lock().handlers.len())
            .finish()
    }
}

/// Guard for a registered handler. Runs its teardown exactly once.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new<F>(teardown: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// Releases the subscription now.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.teardown.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_dispatch_in_subscription_order() {
        let listeners: Listeners<i32, i32> = Listeners::new();
        let _a = listeners.subscribe(|n| Some(n + 1));
        let _b = listeners.subscribe(|n| Some(n * 10));
        let _c = listeners.subscribe(|_| None);

        assert_eq!(listeners.dispatch(&3), vec![4, 30]);
        assert_eq!(listeners.len(), 3);
    }

    #[test]
    fn test_drop_removes_only_its_handler() {
        let listeners: Listeners<(), &str> = Listeners::new();
        let first = listeners.subscribe(|_| Some("first"));
        let _second = listeners.subscribe(|_| Some("second"));

        drop(first);
        assert_eq!(listeners.dispatch(&()), vec!["second"]);
    }

    #[test]
    fn test_unsubscribe_runs_teardown_once() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let sub = Subscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        sub.unsubscribe();
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_guard_outliving_registry() {
        let listeners: Listeners<(), ()> = Listeners::new();
        let guard = listeners.subscribe(|_| Some(()));
        drop(listeners);
        drop(guard);
    }

    #[test]
    fn test_handler_sees_captured_snapshot() {
        let listeners: Listeners<(), bool> = Listeners::new();
        let mut flag = false;
        let captured = flag;
        let old = listeners.subscribe(move |_| Some(captured));

        flag = true;
        assert_eq!(listeners.dispatch(&()), vec![false]);

        drop(old);
        let _new = listeners.subscribe(move |_| Some(flag));
        assert_eq!(listeners.dispatch(&()), vec![true]);
    }
}
