//! Request payloads sent to the list service

use serde::{Deserialize, Serialize};
use todo_sync_core::types::{Todo, TodoStatus};

/// Body of `POST /auth/register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Display name
    pub username: String,
    /// Login email
    pub email: String,
    /// Plain-text password
    pub password: String,
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login email
    pub email: String,
    /// Plain-text password
    pub password: String,
}

/// Body of `POST /api/todos` and `PUT /api/todos/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRequest {
    /// Short title
    pub title: String,
    /// Free-form description
    pub description: String,
}

/// Body of `PATCH /api/todos/{id}/status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRequest {
    /// New completion state
    pub status: TodoStatus,
}

/// A todo as returned by create/update, either bare or wrapped.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum TodoEnvelope {
    Wrapped { todo: Todo },
    Bare(Todo),
}

impl From<TodoEnvelope> for Todo {
    fn from(envelope: TodoEnvelope) -> Self {
        match envelope {
            TodoEnvelope::Wrapped { todo } | TodoEnvelope::Bare(todo) => todo,
        }
    }
}
