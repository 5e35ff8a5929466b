//! Session store handle.

use crate::{SessionAction, SessionReducer, SessionState};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use todo_sync_core::storage::{KeyValueStorage, NullStorage};
use todo_sync_core::types::{Identity, IDENTITY_KEY, TOKEN_KEY};
use todo_sync_runtime::{Store, SubscriptionId};

/// Process-wide session.
///
/// Cheap to clone; clones share one underlying store. Construct it once at
/// startup (which reads the persisted credential) and hand clones to
/// whatever needs the credential.
///
/// None of the operations fail. When the persistence adapter is missing or
/// broken the session keeps working in memory and the failure is logged.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Store<SessionReducer>>,
}

impl SessionStore {
    /// Create a session over `storage`, restoring any persisted credential.
    ///
    /// A persisted identity that cannot be decoded is ignored; the token
    /// alone still restores the authenticated state.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        let token = read(storage.as_ref(), TOKEN_KEY);
        let identity = read(storage.as_ref(), IDENTITY_KEY).and_then(|json| {
            serde_json::from_str::<Identity>(&json)
                .map_err(|error| {
                    tracing::warn!(error = %error, "Ignoring unreadable persisted identity");
                })
                .ok()
        });

        let store = Store::with_storage(SessionState::default(), SessionReducer::new(), storage);
        store.send(SessionAction::Restored { token, identity });

        let session = Self {
            inner: Arc::new(store),
        };
        tracing::debug!(
            authenticated = session.is_authenticated(),
            "Session restored"
        );
        session
    }

    /// Session without a persistence medium.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(NullStorage))
    }

    /// Currently valid token.
    ///
    /// Reads through to the persistence adapter so that independent
    /// sessions sharing one medium agree on the value. Falls back to the
    /// in-memory copy when no medium is available or the read fails.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        let storage = self.inner.storage();
        if storage.is_available() {
            match storage.get(TOKEN_KEY) {
                Ok(token) => return token.filter(|t| !t.is_empty()),
                Err(error) => {
                    tracing::warn!(error = %error, "Token read failed, using in-memory copy");
                }
            }
        }
        self.inner
            .state(|s| s.token.clone())
            .filter(|t| !t.is_empty())
    }

    /// Adopt a new credential and persist it.
    ///
    /// Token and identity change in a single step: an observer never sees
    /// one updated without the other.
    pub fn login(&self, token: impl Into<String>, identity: Identity) {
        tracing::info!(user_id = %identity.id, "Session started");
        self.inner.send(SessionAction::LoggedIn {
            token: token.into(),
            identity,
        });
    }

    /// Drop the credential and erase the persisted copies.
    ///
    /// Calling it while logged out does nothing harmful.
    pub fn logout(&self) {
        if self.is_authenticated() {
            tracing::info!("Session ended");
        }
        self.inner.send(SessionAction::LoggedOut);
    }

    /// Whether a token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.state(SessionState::is_authenticated)
    }

    /// Identity of the logged-in user.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.inner.state(|s| s.identity.clone())
    }

    /// Snapshot of the whole session.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.inner.snapshot()
    }

    /// Observe every session change.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&SessionState) + Send + Sync + 'static,
    {
        self.inner.subscribe(observer)
    }

    /// Observe the derived authentication signal.
    ///
    /// `observer` is called, within the same notification as the change,
    /// each time the signal flips.
    pub fn subscribe_authenticated<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        let last = AtomicBool::new(self.is_authenticated());
        self.inner.subscribe(move |state| {
            let now = state.is_authenticated();
            if last.swap(now, Ordering::SeqCst) != now {
                observer(now);
            }
        })
    }

    /// Stop an observer.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.unsubscribe(id)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .field("user_id", &self.inner.state(|s| s.identity.as_ref().map(|i| i.id)))
            .finish()
    }
}

fn read(storage: &dyn KeyValueStorage, key: &str) -> Option<String> {
    storage.get(key).unwrap_or_else(|error| {
        tracing::warn!(key, error = %error, "Persisted session unavailable");
        None
    })
}
