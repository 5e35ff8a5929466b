//! Todo list projection: state, actions and reducer.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use todo_sync_core::types::{Todo, TodoId};
use todo_sync_core::{effect::Effect, reducer::Reducer, SmallVec};

/// Ordered collection of todos, newest first.
///
/// Every id appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoListState {
    /// Todos in display order
    pub todos: Vec<Todo>,
}

impl TodoListState {
    /// Look up a todo by id
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Position of a todo in the list
    #[must_use]
    pub fn position(&self, id: TodoId) -> Option<usize> {
        self.todos.iter().position(|todo| todo.id == id)
    }

    /// Whether a todo with this id is held
    #[must_use]
    pub fn contains(&self, id: TodoId) -> bool {
        self.position(id).is_some()
    }

    /// Number of todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    /// Whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.is_completed()).count()
    }

    /// Number of pending todos
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.len() - self.completed_count()
    }
}

/// Mutations of the todo list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoAction {
    /// A page was loaded; it replaces the whole list.
    ReplaceAll(Vec<Todo>),
    /// A todo was created; it goes to the front.
    Add(Todo),
    /// A todo was deleted.
    Remove(TodoId),
    /// A todo was updated; it keeps its position.
    Replace(Todo),
    /// Forget everything (logout).
    Clear,
}

/// Reducer for the todo list
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for TodoReducer {
    type State = TodoListState;
    type Action = TodoAction;

    fn reduce(&self, state: &mut TodoListState, action: TodoAction) -> SmallVec<[Effect; 4]> {
        match action {
            TodoAction::ReplaceAll(todos) => {
                // Keep the first occurrence of a repeated id.
                let mut seen = HashSet::with_capacity(todos.len());
                state.todos = todos.into_iter().filter(|todo| seen.insert(todo.id)).collect();
            }
            TodoAction::Add(todo) => {
                state.todos.retain(|existing| existing.id != todo.id);
                state.todos.insert(0, todo);
            }
            TodoAction::Remove(id) => {
                state.todos.retain(|todo| todo.id != id);
            }
            TodoAction::Replace(updated) => {
                if let Some(slot) = state.todos.iter_mut().find(|todo| todo.id == updated.id) {
                    *slot = updated;
                }
            }
            TodoAction::Clear => state.todos.clear(),
        }

        SmallVec::new()
    }
}
