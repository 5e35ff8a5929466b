//! # Todo Sync Testing
//!
//! Testing utilities and helpers for todo-sync.
//!
//! This crate provides:
//! - Mock implementations of environment and storage traits
//! - Fixtures for the data model
//! - Property-based testing strategies
//! - [`ReducerTest`], a given/when/then harness for reducers
//!
//! ## Example
//!
//! ```ignore
//! use todo_sync_testing::{fixtures, mocks::RecordingNavigator};
//!
//! let navigator = RecordingNavigator::new();
//! let todo = fixtures::todo(5, "buy milk");
//! ```


pub use reducer_test::{assertions, ReducerTest};

use chrono::{DateTime, Utc};

/// Mock implementations of environment and storage traits
pub mod mocks {
    use std::sync::{Arc, Mutex, PoisonError};
    use todo_sync_core::environment::Navigator;
    use todo_sync_core::storage::{KeyValueStorage, Result, StorageError};

    /// Navigator that records every requested route
    ///
    /// Clones share the same record.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_sync_testing::mocks::RecordingNavigator;
    /// use todo_sync_core::environment::Navigator;
    ///
    /// let navigator = RecordingNavigator::new();
    /// navigator.navigate("/login");
    /// assert_eq!(navigator.routes(), vec!["/login".to_string()]);
    /// ```
    #[derive(Debug, Clone, Default)]
    pub struct RecordingNavigator {
        routes: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingNavigator {
        /// Create a navigator with an empty record
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Routes requested so far, oldest first
        #[must_use]
        pub fn routes(&self) -> Vec<String> {
            self.routes
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// Number of navigation requests
        #[must_use]
        pub fn count(&self) -> usize {
            self.routes
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len()
        }
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, route: &str) {
            self.routes
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(route.to_string());
        }
    }

    /// Storage whose medium is present but broken
    ///
    /// Every call fails with an I/O error, which lets tests check that
    /// session flows degrade to in-memory operation.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct FailingStorage;

    impl FailingStorage {
        fn error() -> StorageError {
            StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "storage disabled",
            ))
        }
    }

    impl KeyValueStorage for FailingStorage {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(Self::error())
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Self::error())
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(Self::error())
        }
    }
}

/// Fixtures for the data model
pub mod fixtures {
    use super::{DateTime, Utc};
    use todo_sync_core::types::{Identity, Todo, TodoId, TodoStatus, UserId};

    /// Fixed timestamp for deterministic tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn timestamp() -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::seconds(1_735_689_600)
    }

    /// Identity `{id: 1, username: "a", email: "a@b.com"}`
    #[must_use]
    pub fn identity() -> Identity {
        Identity {
            id: UserId(1),
            username: "a".to_string(),
            email: "a@b.com".to_string(),
        }
    }

    /// Pending todo owned by user 1
    #[must_use]
    pub fn todo(id: i64, title: &str) -> Todo {
        Todo {
            id: TodoId(id),
            owner_id: UserId(1),
            title: title.to_string(),
            description: String::new(),
            status: TodoStatus::Pending,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    /// Wire JSON for [`todo`], using the service's `user_id` field name
    #[must_use]
    pub fn todo_json(id: i64, title: &str) -> String {
        format!(
            r#"{{"id":{id},"user_id":1,"title":"{title}","description":"","status":"pending","created_at":"2025-01-01T00:00:00Z","updated_at":"2025-01-01T00:00:00Z"}}"#
        )
    }
}

/// Property-based testing strategies
pub mod properties {
    use super::fixtures;
    use proptest::prelude::*;
    use std::collections::BTreeSet;
    use todo_sync_core::types::{Todo, TodoStatus};

    /// Arbitrary todo with an id in `1..10_000`
    pub fn arb_todo() -> impl Strategy<Value = Todo> {
        (1_i64..10_000, "[a-z ]{1,16}", any::<bool>()).prop_map(|(id, title, done)| {
            let mut todo = fixtures::todo(id, &title);
            if done {
                todo.status = TodoStatus::Completed;
            }
            todo
        })
    }

    /// Arbitrary list of todos with pairwise distinct ids
    pub fn arb_todo_list(max_len: usize) -> impl Strategy<Value = Vec<Todo>> {
        proptest::collection::vec(arb_todo(), 0..=max_len).prop_map(|todos| {
            let mut seen = BTreeSet::new();
            todos
                .into_iter()
                .filter(|todo| seen.insert(todo.id))
                .collect()
        })
    }

    /// Arbitrary non-empty bearer token
    pub fn arb_token() -> impl Strategy<Value = String> {
        "[A-Za-z0-9._-]{1,64}"
    }
}

/// Install a test-friendly tracing subscriber
///
/// Safe to call from many tests; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}
