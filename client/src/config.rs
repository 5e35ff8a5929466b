//! Client configuration.
//!
//! Values are provided by the application (or the environment), not
//! hardcoded in the pipeline.

use crate::error::ConfigError;
use reqwest::Url;
use std::path::PathBuf;

/// Environment variable holding the service origin.
pub const ENV_BASE_URL: &str = "TODO_SYNC_BASE_URL";
/// Environment variable holding the route shown after the session ends.
pub const ENV_LOGIN_ROUTE: &str = "TODO_SYNC_LOGIN_ROUTE";
/// Environment variable holding the page size for list fetches.
pub const ENV_PAGE_SIZE: &str = "TODO_SYNC_PAGE_SIZE";
/// Environment variable holding the session state file.
pub const ENV_STATE_FILE: &str = "TODO_SYNC_STATE_FILE";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin of the list service (e.g. "http://localhost:8080").
    ///
    /// Request paths are appended verbatim.
    pub base_url: String,

    /// Route the presentation layer is sent to when the credential is
    /// rejected.
    ///
    /// Default: `/login`
    pub unauthenticated_route: String,

    /// Number of todos requested per page.
    ///
    /// Default: 20
    pub page_size: u32,

    /// File holding the persisted session. `None` keeps the session in
    /// memory only.
    pub state_file: Option<PathBuf>,
}

impl ClientConfig {
    /// Create configuration for the service at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the route used after the credential is rejected.
    #[must_use]
    pub fn with_unauthenticated_route(mut self, route: impl Into<String>) -> Self {
        self.unauthenticated_route = route.into();
        self
    }

    /// Set the page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Persist the session in `path`.
    #[must_use]
    pub fn with_state_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_file = Some(path.into());
        self
    }

    /// Load configuration from `TODO_SYNC_*` environment variables.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(route) = lookup(ENV_LOGIN_ROUTE) {
            config.unauthenticated_route = route;
        }
        if let Some(page_size) = lookup(ENV_PAGE_SIZE) {
            config.page_size = page_size
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPageSize(page_size.clone()))?;
        }
        if let Some(path) = lookup(ENV_STATE_FILE).filter(|p| !p.is_empty()) {
            config.state_file = Some(PathBuf::from(path));
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns the first invalid value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };
        let url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", url.scheme())));
        }

        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize("0".to_string()));
        }

        if !self.unauthenticated_route.starts_with('/') {
            return Err(ConfigError::InvalidRoute(self.unauthenticated_route.clone()));
        }

        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            unauthenticated_route: "/login".to_string(),
            page_size: 20,
            state_file: None,
        }
    }
}
