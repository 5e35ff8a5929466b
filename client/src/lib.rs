//! # Todo Sync Client
//!
//! Authenticated request pipeline and service operations for the todo list
//! service, plus [`TodoSync`], which applies their results to the session
//! and todo stores.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use todo_sync_client::{BroadcastNavigator, ClientConfig, TodoSync};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_env()?;
//!     let navigator = BroadcastNavigator::new();
//!     let mut redirects = navigator.subscribe();
//!
//!     let sync = TodoSync::from_config(&config, Arc::new(navigator));
//!     sync.sign_in("a@b.com", "x").await?;
//!     sync.create("buy milk", "2%").await?;
//!
//!     // An expired token ends the session and asks for the login route.
//!     if let Ok(redirect) = redirects.try_recv() {
//!         println!("go to {}", redirect.route);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! [`ApiClient::execute`] is the only place errors are classified; see
//! [`ClientError`]. Everything above it propagates them unchanged.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod navigator;
pub mod requests;
pub mod sync;

// Re-export main types for convenience
pub use client::{is_credential_exchange, ApiClient};
pub use config::ClientConfig;
pub use error::{ClientError, ConfigError, Result};
pub use navigator::{BroadcastNavigator, Redirect};
pub use requests::{LoginRequest, RegisterRequest, StatusRequest, TodoRequest};
pub use sync::TodoSync;
