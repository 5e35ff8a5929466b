//! Client-side projections for todo-sync.
//!
//! # Overview
//!
//! A projection here is an in-memory read model of server-owned data. It
//! performs no I/O: callers run a service operation, then feed the result
//! into the projection, which notifies its observers.
//!
//! ```text
//! Service operation → result → TodoStore::{replace_all, add, replace, remove, clear} → Observers
//! ```
//!
//! Because the projection never waits on the network, its invariants (one
//! entry per id, newest first) hold regardless of request timing.
//!
//! # Example
//!
//! ```
//! use todo_sync_projections::TodoStore;
//! # use todo_sync_core::types::{Todo, TodoId, TodoStatus, UserId};
//! # use todo_sync_core::Utc;
//! # let todo = Todo {
//! #     id: TodoId(5),
//! #     owner_id: UserId(1),
//! #     title: "buy milk".into(),
//! #     description: "2%".into(),
//! #     status: TodoStatus::Pending,
//! #     created_at: Utc::now(),
//! #     updated_at: Utc::now(),
//! # };
//!
//! let todos = TodoStore::new();
//! todos.add(todo);
//! assert_eq!(todos.todos()[0].id, TodoId(5));
//! ```

pub mod store;
pub mod todos;

// Re-export main types for convenience
pub use store::TodoStore;
pub use todos::{TodoAction, TodoListState, TodoReducer};
