//! Session state.

use serde::{Deserialize, Serialize};
use todo_sync_core::types::Identity;

/// Current credential and the identity it belongs to.
///
/// Authentication is defined by the token alone. The identity may briefly be
/// absent (a token restored without a readable profile), but an identity is
/// never held without a token.
///
/// # Examples
///
/// ```
/// # use todo_sync_auth::SessionState;
/// let state = SessionState::default();
/// assert!(!state.is_authenticated());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Bearer token, if logged in.
    pub token: Option<String>,

    /// Identity the token was issued for.
    pub identity: Option<Identity>,
}

impl SessionState {
    /// Whether a non-empty token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }
}
