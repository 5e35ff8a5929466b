//! Reactive todo list handle.

use crate::{TodoAction, TodoListState, TodoReducer};
use std::sync::Arc;
use todo_sync_core::types::{Todo, TodoId};
use todo_sync_runtime::{Store, SubscriptionId};

/// Reactive, ordered cache of the user's todos.
///
/// Cheap to clone; clones share one list. Every mutation is synchronous and
/// notifies observers with the full new list, even when it changes nothing.
#[derive(Clone)]
pub struct TodoStore {
    inner: Arc<Store<TodoReducer>>,
}

impl TodoStore {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Store::new(TodoListState::default(), TodoReducer::new())),
        }
    }

    /// Replace the whole list, e.g. after a page was fetched.
    pub fn replace_all(&self, todos: Vec<Todo>) {
        tracing::debug!(count = todos.len(), "Replacing todo list");
        self.inner.send(TodoAction::ReplaceAll(todos));
    }

    /// Put a newly created todo at the front.
    pub fn add(&self, todo: Todo) {
        self.inner.send(TodoAction::Add(todo));
    }

    /// Drop the todo with `id`, if held.
    pub fn remove(&self, id: TodoId) {
        self.inner.send(TodoAction::Remove(id));
    }

    /// Substitute the todo with the same id, keeping its position.
    ///
    /// Does nothing if the todo is not held; whether that is an error is for
    /// the caller to decide.
    pub fn replace(&self, todo: Todo) {
        if !self.contains(todo.id) {
            tracing::debug!(id = %todo.id, "Replace skipped, todo not loaded");
        }
        self.inner.send(TodoAction::Replace(todo));
    }

    /// Empty the list.
    pub fn clear(&self) {
        self.inner.send(TodoAction::Clear);
    }

    /// Copy of the current list, in display order.
    #[must_use]
    pub fn todos(&self) -> Vec<Todo> {
        self.inner.state(|s| s.todos.clone())
    }

    /// Copy of the todo with `id`.
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<Todo> {
        self.inner.state(|s| s.get(id).cloned())
    }

    /// Whether a todo with `id` is held.
    #[must_use]
    pub fn contains(&self, id: TodoId) -> bool {
        self.inner.state(|s| s.contains(id))
    }

    /// Number of todos held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.state(TodoListState::len)
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.state(TodoListState::is_empty)
    }

    /// Snapshot of the whole state.
    #[must_use]
    pub fn state(&self) -> TodoListState {
        self.inner.snapshot()
    }

    /// Observe every change.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&TodoListState) + Send + Sync + 'static,
    {
        self.inner.subscribe(observer)
    }

    /// Stop an observer.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.unsubscribe(id)
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TodoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoStore").field("len", &self.len()).finish()
    }
}
