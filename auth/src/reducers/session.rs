//! Session reducer.

use crate::{SessionAction, SessionState};
use todo_sync_core::types::{IDENTITY_KEY, TOKEN_KEY};
use todo_sync_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

/// Reducer for the credential lifecycle.
///
/// - `Restored` adopts persisted values without writing them back.
/// - `LoggedIn` sets token and identity together and persists both. An
///   empty token is no credential, so it logs out instead.
/// - `LoggedOut` clears both and erases the persisted copies. Repeating it is
///   harmless.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionReducer;

impl SessionReducer {
    /// Creates a new `SessionReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for SessionReducer {
    type State = SessionState;
    type Action = SessionAction;

    fn reduce(&self, state: &mut SessionState, action: SessionAction) -> SmallVec<[Effect; 4]> {
        match action {
            SessionAction::Restored { token, identity } => {
                let token = token.filter(|t| !t.is_empty());
                // An identity is only meaningful next to a token.
                state.identity = identity.filter(|_| token.is_some());
                state.token = token;
                SmallVec::new()
            }

            SessionAction::LoggedIn { token, .. } if token.is_empty() => {
                self.reduce(state, SessionAction::LoggedOut)
            }

            SessionAction::LoggedIn { token, identity } => {
                let identity_effect = match serde_json::to_string(&identity) {
                    Ok(json) => Effect::persist(IDENTITY_KEY, json),
                    Err(_) => Effect::erase(IDENTITY_KEY),
                };
                let token_effect = Effect::persist(TOKEN_KEY, token.clone());

                state.token = Some(token);
                state.identity = Some(identity);

                smallvec![token_effect, identity_effect]
            }

            SessionAction::LoggedOut => {
                state.token = None;
                state.identity = None;

                smallvec![Effect::erase(TOKEN_KEY), Effect::erase(IDENTITY_KEY)]
            }
        }
    }
}
