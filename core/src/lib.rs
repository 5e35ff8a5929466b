//! # Todo Sync Core
//!
//! Core traits and types for the todo-sync client.
//!
//! This crate provides the fundamental abstractions shared by the session
//! store, the todo projection and the request pipeline:
//!
//! - **Data model**: [`types::Identity`], [`types::Todo`], [`types::TodoPage`]
//! - **Reducer**: Pure function `(State, Action) → (State, Effects)`
//! - **Effect**: Storage side effect descriptions (not execution)
//! - **Storage**: The persistence adapter behind the session store
//! - **Environment**: Capabilities injected by the host (navigation)
//!
//! ## Example
//!
//! ```
//! use todo_sync_core::effect::Effect;
//! use todo_sync_core::reducer::Reducer;
//! use todo_sync_core::SmallVec;
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: u32,
//! }
//!
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!     ) -> SmallVec<[Effect; 4]> {
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!         }
//!         SmallVec::new()
//!     }
//! }
//!
//! let mut state = CounterState::default();
//! let effects = CounterReducer.reduce(&mut state, CounterAction::Increment);
//! assert_eq!(state.count, 1);
//! assert!(effects.is_empty());
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

pub mod storage;
pub mod types;

/// Reducer module - The core trait for state transitions
///
/// Reducers are pure functions: `(State, Action) → (State, Effects)`.
/// They never perform I/O themselves; anything that must touch the outside
/// world is returned as an [`Effect`](crate::effect::Effect) and executed by
/// the runtime.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The action type this reducer processes
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// Reduce an action into state changes and effects
        ///
        /// Implementations must:
        /// 1. Update state in place
        /// 2. Return effect descriptions to be executed afterwards
        ///
        /// The runtime applies all effects before any observer sees the
        /// new state.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
        ) -> SmallVec<[Effect; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe writes to the persistence adapter. They are values,
/// returned from reducers and executed by the `Store` runtime in order.
pub mod effect {
    /// Effect type - describes a side effect to be executed
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Effect {
        /// No-op effect
        None,

        /// Write `value` under `key` in the persistence adapter
        Persist {
            /// Storage key
            key: String,
            /// Raw value to store
            value: String,
        },

        /// Remove `key` from the persistence adapter
        Erase {
            /// Storage key
            key: String,
        },
    }

    impl Effect {
        /// Build a [`Effect::Persist`]
        #[must_use]
        pub fn persist(key: impl Into<String>, value: impl Into<String>) -> Self {
            Self::Persist {
                key: key.into(),
                value: value.into(),
            }
        }

        /// Build a [`Effect::Erase`]
        #[must_use]
        pub fn erase(key: impl Into<String>) -> Self {
            Self::Erase { key: key.into() }
        }

        /// Storage key touched by this effect, if any
        #[must_use]
        pub fn key(&self) -> Option<&str> {
            match self {
                Self::None => None,
                Self::Persist { key, .. } | Self::Erase { key } => Some(key),
            }
        }
    }
}

/// Environment module - Capabilities injected by the host
///
/// The presentation layer is an external collaborator. The only thing the
/// core ever asks of it is to move the user to an unauthenticated entry
/// point, so that is the only trait here.
pub mod environment {
    /// Navigation capability used to leave an authenticated screen
    ///
    /// # Examples
    ///
    /// ```
    /// use todo_sync_core::environment::Navigator;
    /// use std::sync::Mutex;
    ///
    /// struct Recorder(Mutex<Vec<String>>);
    ///
    /// impl Navigator for Recorder {
    ///     fn navigate(&self, route: &str) {
    ///         if let Ok(mut routes) = self.0.lock() {
    ///             routes.push(route.to_string());
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Navigator: Send + Sync {
        /// Ask the presentation layer to show `route`
        fn navigate(&self, route: &str);
    }

    /// Navigator that ignores every request
    ///
    /// Used when no presentation layer is attached (tests, headless tools).
    #[derive(Debug, Clone, Copy, Default)]
    pub struct NoopNavigator;

    impl Navigator for NoopNavigator {
        fn navigate(&self, _route: &str) {}
    }
}
