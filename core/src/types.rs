//! Data model shared with the remote list service.
//!
//! All types are `Clone` and serde-compatible; field names follow the wire
//! contract of the service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the JSON-serialized [`Identity`].
pub const IDENTITY_KEY: &str = "user";

// ═══════════════════════════════════════════════════════════════════════
// ID Types
// ═══════════════════════════════════════════════════════════════════════

/// Server-assigned identifier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-assigned identifier of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub i64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Identity
// ═══════════════════════════════════════════════════════════════════════

/// Profile fields of the authenticated user, cached client-side.
///
/// # Examples
///
/// ```
/// # use todo_sync_core::types::{Identity, UserId};
/// let identity: Identity =
///     serde_json::from_str(r#"{"id":1,"username":"a","email":"a@b.com"}"#).unwrap();
/// assert_eq!(identity.id, UserId(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User ID
    pub id: UserId,
    /// Display name
    pub username: String,
    /// Login email
    pub email: String,
}

/// Payload returned by the credential-exchange endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Opaque bearer token
    pub token: String,
    /// The user the token was issued for
    pub user: Identity,
    /// Human readable confirmation from the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// Todo
// ═══════════════════════════════════════════════════════════════════════

/// Completion state of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    /// Not done yet
    #[default]
    Pending,
    /// Done
    Completed,
}

impl TodoStatus {
    /// The opposite status.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }

    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single list item owned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Todo ID, unique within a [`TodoPage`]
    pub id: TodoId,
    /// Owning user
    #[serde(alias = "user_id")]
    pub owner_id: UserId,
    /// Short title
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Completion state
    #[serde(default)]
    pub status: TodoStatus,
    /// When the todo was created
    pub created_at: DateTime<Utc>,
    /// When the todo was last modified
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Whether the todo is completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == TodoStatus::Completed
    }
}

/// One page of todos.
///
/// The service answers either with an object carrying the items plus
/// pagination fields, or with a bare array (or `null` when empty). All
/// three decode into this type.
///
/// ```
/// # use todo_sync_core::types::TodoPage;
/// let page: TodoPage = serde_json::from_str("null").unwrap();
/// assert!(page.items.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "TodoPageWire")]
pub struct TodoPage {
    /// Todos on this page, newest first
    pub items: Vec<Todo>,
    /// 1-based page number, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Total number of todos, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TodoPageWire {
    Paged {
        #[serde(alias = "todos", alias = "data")]
        items: Vec<Todo>,
        #[serde(default)]
        page: Option<u32>,
        #[serde(default)]
        limit: Option<u32>,
        #[serde(default)]
        total: Option<u64>,
    },
    Bare(Vec<Todo>),
    Empty(()),
}

impl From<TodoPageWire> for TodoPage {
    fn from(wire: TodoPageWire) -> Self {
        match wire {
            TodoPageWire::Paged {
                items,
                page,
                limit,
                total,
            } => Self {
                items,
                page,
                limit,
                total,
            },
            TodoPageWire::Bare(items) => Self {
                items,
                ..Self::default()
            },
            TodoPageWire::Empty(()) => Self::default(),
        }
    }
}
