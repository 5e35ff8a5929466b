//! Session reducers.
//!
//! Reducers are pure functions: `(State, Action) → (State, Effects)`.

pub mod session;

// Re-export
pub use session::SessionReducer;
