//! # Todo Sync Runtime
//!
//! Runtime implementation for todo-sync stores.
//!
//! This crate provides the [`Store`] that coordinates reducer execution,
//! storage effects and observer notification.
//!
//! ## Core Components
//!
//! - **Store**: Owns state, runs the reducer, applies effects
//! - **Subscribers**: Ordered observer list notified after every action
//!
//! ## Example
//!
//! ```
//! use todo_sync_core::{effect::Effect, reducer::Reducer, SmallVec};
//! use todo_sync_runtime::Store;
//! use std::sync::{Arc, Mutex};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: u32,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = u32;
//!
//!     fn reduce(&self, state: &mut CounterState, by: u32) -> SmallVec<[Effect; 4]> {
//!         state.count += by;
//!         SmallVec::new()
//!     }
//! }
//!
//! let store = Store::new(CounterState::default(), CounterReducer);
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! store.subscribe(move |state: &CounterState| {
//!     sink.lock().unwrap().push(state.count);
//! });
//!
//! store.send(2);
//! store.send(3);
//!
//! assert_eq!(store.state(|s| s.count), 5);
//! assert_eq!(*seen.lock().unwrap(), vec![2, 5]);
//! ```

pub mod observer;

pub use observer::{Subscribers, SubscriptionId};
pub use store::Store;

/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::observer::{Subscribers, SubscriptionId};
    use std::sync::{Arc, Mutex, PoisonError, RwLock};
    use todo_sync_core::effect::Effect;
    use todo_sync_core::reducer::Reducer;
    use todo_sync_core::storage::{KeyValueStorage, NullStorage};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind an `RwLock`)
    /// 2. Reducer (state transitions)
    /// 3. Storage (target of [`Effect::Persist`] / [`Effect::Erase`])
    /// 4. Observers (notified with the full new state)
    ///
    /// # Notification Contract
    ///
    /// `send` is synchronous. By the time it returns the reducer has run,
    /// every effect has been applied, and every observer has been called in
    /// registration order with a snapshot of the new state. The state lock
    /// is released before observers run, so an observer may read this store
    /// or send actions to another one.
    ///
    /// Concurrent `send`s are serialized as a whole: the effects and
    /// notifications of one action finish before the next action is
    /// reduced. An observer must not send to the store that notified it.
    pub struct Store<R>
    where
        R: Reducer,
    {
        state: RwLock<R::State>,
        dispatch: Mutex<()>,
        reducer: R,
        storage: Arc<dyn KeyValueStorage>,
        subscribers: Subscribers<R::State>,
    }

    impl<R> Store<R>
    where
        R: Reducer,
        R::State: Clone,
    {
        /// Create a store whose effects go nowhere
        ///
        /// Suitable for reducers that never emit storage effects.
        #[must_use]
        pub fn new(initial_state: R::State, reducer: R) -> Self {
            Self::with_storage(initial_state, reducer, Arc::new(NullStorage))
        }

        /// Create a store that applies effects to `storage`
        #[must_use]
        pub fn with_storage(
            initial_state: R::State,
            reducer: R,
            storage: Arc<dyn KeyValueStorage>,
        ) -> Self {
            Self {
                state: RwLock::new(initial_state),
                dispatch: Mutex::new(()),
                reducer,
                storage,
                subscribers: Subscribers::new(),
            }
        }

        /// Send an action to the store
        ///
        /// Blocks while another thread is inside `send` on this store.
        ///
        /// 1. Runs the reducer while holding the write lock
        /// 2. Applies the returned effects in order
        /// 3. Notifies observers in registration order
        ///
        /// Storage failures are logged and do not interrupt the sequence.
        pub fn send(&self, action: R::Action) {
            let _dispatch = self.dispatch.lock().unwrap_or_else(PoisonError::into_inner);

            let (effects, snapshot) = {
                let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
                let effects = self.reducer.reduce(&mut state, action);
                (effects, state.clone())
            };

            for effect in effects {
                self.execute(effect);
            }

            self.subscribers.notify(&snapshot);
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let count = store.state(|s| s.todos.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&R::State) -> T,
        {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            f(&state)
        }

        /// Clone of the current state
        #[must_use]
        pub fn snapshot(&self) -> R::State {
            self.state(Clone::clone)
        }

        /// Register an observer; it is called after every subsequent `send`
        pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
        where
            F: Fn(&R::State) + Send + Sync + 'static,
        {
            self.subscribers.subscribe(observer)
        }

        /// Remove an observer. Returns `false` if it was not registered.
        pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
            self.subscribers.unsubscribe(id)
        }

        /// Number of registered observers
        #[must_use]
        pub fn subscriber_count(&self) -> usize {
            self.subscribers.len()
        }

        /// The storage effects are applied to
        #[must_use]
        pub fn storage(&self) -> &Arc<dyn KeyValueStorage> {
            &self.storage
        }

        fn execute(&self, effect: Effect) {
            let result = match &effect {
                Effect::None => return,
                Effect::Persist { key, value } => self.storage.set(key, value),
                Effect::Erase { key } => self.storage.remove(key),
            };

            if let Err(error) = result {
                tracing::warn!(
                    key = effect.key().unwrap_or_default(),
                    error = %error,
                    "Storage effect failed, continuing in memory"
                );
            }
        }
    }

    impl<R> std::fmt::Debug for Store<R>
    where
        R: Reducer,
        R::State: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            f.debug_struct("Store")
                .field("state", &*state)
                .field("subscribers", &self.subscribers.len())
                .finish_non_exhaustive()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use todo_sync_core::effect::Effect;
    use todo_sync_core::reducer::Reducer;
    use todo_sync_core::storage::{KeyValueStorage, MemoryStorage};
    use todo_sync_core::{smallvec, SmallVec};

    #[derive(Clone, Debug, Default)]
    struct NoteState {
        note: Option<String>,
    }

    enum NoteAction {
        Write(String),
        Wipe,
    }

    struct NoteReducer;

    impl Reducer for NoteReducer {
        type State = NoteState;
        type Action = NoteAction;

        fn reduce(&self, state: &mut NoteState, action: NoteAction) -> SmallVec<[Effect; 4]> {
            match action {
                NoteAction::Write(note) => {
                    state.note = Some(note.clone());
                    smallvec![Effect::persist("note", note)]
                },
                NoteAction::Wipe => {
                    state.note = None;
                    smallvec![Effect::erase("note"), Effect::None]
                },
            }
        }
    }

    #[test]
    fn test_effects_applied_before_observers_run() {
        let storage = MemoryStorage::new();
        let store = Arc::new(Store::with_storage(
            NoteState::default(),
            NoteReducer,
            Arc::new(storage.clone()),
        ));

        let persisted = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&persisted);
        let reader = storage.clone();
        store.subscribe(move |_state| {
            sink.lock().unwrap().push(reader.get("note").unwrap());
        });

        store.send(NoteAction::Write("hello".to_string()));
        store.send(NoteAction::Wipe);

        assert_eq!(
            *persisted.lock().unwrap(),
            vec![Some("hello".to_string()), None]
        );
    }

    #[test]
    fn test_observer_can_read_store() {
        let store = Arc::new(Store::new(NoteState::default(), NoteReducer));
        let seen = Arc::new(Mutex::new(None));

        let sink = Arc::clone(&seen);
        let inner = Arc::clone(&store);
        store.subscribe(move |_state| {
            *sink.lock().unwrap() = inner.state(|s| s.note.clone());
        });

        store.send(NoteAction::Write("x".to_string()));
        assert_eq!(seen.lock().unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let store = Store::new(NoteState::default(), NoteReducer);
        let before = store.snapshot();
        store.send(NoteAction::Write("x".to_string()));
        assert!(before.note.is_none());
        assert_eq!(store.snapshot().note.as_deref(), Some("x"));
    }
}
