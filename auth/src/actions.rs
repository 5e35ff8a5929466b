//! Session actions.

use serde::{Deserialize, Serialize};
use todo_sync_core::types::Identity;

/// Session action.
///
/// Actions are the only way to change the session. Each one replaces the
/// whole credential, so observers never see a token from one login paired
/// with the identity from another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionAction {
    /// Values read back from the persistence adapter at startup.
    ///
    /// Nothing is written back.
    Restored {
        /// Persisted token.
        token: Option<String>,
        /// Persisted identity.
        identity: Option<Identity>,
    },

    /// A credential exchange succeeded.
    LoggedIn {
        /// New bearer token.
        token: String,
        /// User the token was issued for.
        identity: Identity,
    },

    /// Explicit logout, or the service rejected the credential.
    LoggedOut,
}
