//! # Todo Sync Session
//!
//! The session store owns the bearer credential and the identity it was
//! issued for, keeps both in the persistence adapter, and exposes the
//! derived "is authenticated" signal.
//!
//! ## Architecture
//!
//! The session is a reducer-driven store:
//!
//! ```text
//! SessionAction → SessionReducer → (SessionState, Effects) → Storage → Observers
//! ```
//!
//! Persisted values are read once at construction. From then on every
//! change goes through [`SessionStore::login`] or [`SessionStore::logout`],
//! which replace the credential wholesale.
//!
//! ## Example
//!
//! ```
//! use todo_sync_auth::SessionStore;
//! use todo_sync_core::storage::MemoryStorage;
//! use todo_sync_core::types::{Identity, UserId};
//! use std::sync::Arc;
//!
//! let session = SessionStore::new(Arc::new(MemoryStorage::new()));
//! session.login(
//!     "T1",
//!     Identity { id: UserId(1), username: "a".into(), email: "a@b.com".into() },
//! );
//!
//! assert_eq!(session.token().as_deref(), Some("T1"));
//! assert!(session.is_authenticated());
//!
//! session.logout();
//! assert!(session.token().is_none());
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod actions;
pub mod reducers;
pub mod state;
pub mod store;

// Re-export main types for convenience
pub use actions::SessionAction;
pub use reducers::SessionReducer;
pub use state::SessionState;
pub use store::SessionStore;
