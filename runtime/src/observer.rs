//! Ordered observer list.
//!
//! Observers receive the full new state (never a diff), synchronously and in
//! the order they subscribed.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Boxed observer callback.
pub type Observer<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// Handle returned by [`Subscribers::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Observer list with registration-order notification.
pub struct Subscribers<S> {
    next_id: AtomicU64,
    observers: Mutex<Vec<(SubscriptionId, Observer<S>)>>,
}

impl<S> Subscribers<S> {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Append an observer.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(observer)));
        id
    }

    /// Remove an observer, keeping the relative order of the rest.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    /// Call every observer with `state`.
    ///
    /// The list is copied before the first call, so observers may subscribe
    /// or unsubscribe while being notified; such changes apply from the next
    /// notification.
    pub fn notify(&self, state: &S) {
        let observers: Vec<Observer<S>> = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        for observer in observers {
            observer(state);
        }
    }

    /// Number of observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether there are no observers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S> Default for Subscribers<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for Subscribers<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, Subscribers<u32>) {
        (Arc::new(Mutex::new(Vec::new())), Subscribers::new())
    }

    #[test]
    fn test_notify_in_registration_order() {
        let (log, subscribers) = recorder();
        for name in ["first", "second", "third"] {
            let log = Arc::clone(&log);
            subscribers.subscribe(move |value: &u32| {
                log.lock().unwrap().push(format!("{name}:{value}"));
            });
        }

        subscribers.notify(&7);

        assert_eq!(
            *log.lock().unwrap(),
            vec!["first:7", "second:7", "third:7"]
        );
    }

    #[test]
    fn test_unsubscribe_keeps_order() {
        let (log, subscribers) = recorder();
        let ids: Vec<_> = ["a", "b", "c"]
            .into_iter()
            .map(|name| {
                let log = Arc::clone(&log);
                subscribers.subscribe(move |_: &u32| log.lock().unwrap().push(name.to_string()))
            })
            .collect();

        assert!(subscribers.unsubscribe(ids[1]));
        assert!(!subscribers.unsubscribe(ids[1]));
        subscribers.notify(&0);

        assert_eq!(*log.lock().unwrap(), vec!["a", "c"]);
        assert_eq!(subscribers.len(), 2);
    }

    #[test]
    fn test_subscribe_during_notify_applies_next_time() {
        let subscribers = Arc::new(Subscribers::<u32>::new());
        let calls = Arc::new(Mutex::new(0_u32));

        let inner = Arc::clone(&subscribers);
        let counter = Arc::clone(&calls);
        subscribers.subscribe(move |_| {
            let counter = Arc::clone(&counter);
            inner.subscribe(move |_| *counter.lock().unwrap() += 1);
        });

        subscribers.notify(&1);
        assert_eq!(*calls.lock().unwrap(), 0);

        subscribers.notify(&2);
        assert_eq!(*calls.lock().unwrap(), 1);
    }
}
