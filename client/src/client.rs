//! Authenticated request pipeline.
//!
//! Every call to the list service goes through [`ApiClient::execute`]. It is
//! the one place that attaches the credential and tells transport failures,
//! rejected credentials and application errors apart.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result, GENERIC_ERROR_MESSAGE};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use todo_sync_auth::SessionStore;
use todo_sync_core::environment::{Navigator, NoopNavigator};

/// Path prefix of the credential-exchange endpoints.
///
/// A 401 from these means "wrong password", not "session expired".
pub const CREDENTIAL_EXCHANGE_PREFIX: &str = "/auth/";

/// HTTP client for the list service
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    unauthenticated_route: String,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Create a client for `config.base_url` that reads its credential from
    /// `session`.
    ///
    /// Credential rejections are not routed anywhere until a navigator is
    /// attached with [`ApiClient::with_navigator`].
    #[must_use]
    pub fn new(config: &ClientConfig, session: SessionStore) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            unauthenticated_route: config.unauthenticated_route.clone(),
            session,
            navigator: Arc::new(NoopNavigator),
        }
    }

    /// Send the user to the unauthenticated route through `navigator` when
    /// the credential is rejected.
    #[must_use]
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    /// Use a preconfigured `reqwest` client (timeouts, proxies).
    #[must_use]
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Session the credential is read from.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Origin requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one request and interpret the response.
    ///
    /// `Content-Type: application/json` is always sent unless `headers`
    /// carries its own. Every value in `headers` is sent, including repeated
    /// names. The token, when the session holds one, is sent as
    /// `Authorization: Bearer <token>`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Unauthorized`] for a 401 outside `/auth/`. The
    ///   session has already been cleared and the navigator signalled.
    /// - [`ClientError::Api`] for any other failure status, carrying the
    ///   service's message.
    /// - [`ClientError::MalformedResponse`] if the body is not JSON.
    /// - [`ClientError::Transport`] if the service could not be reached.
    #[tracing::instrument(skip(self, method, body, headers), fields(%method), name = "api_execute")]
    pub async fn execute(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
        headers: Option<HeaderMap>,
    ) -> Result<Value> {
        let headers = self.request_headers(headers)?;
        let mut request = self
            .client
            .request(method, format!("{}{path}", self.base_url))
            .headers(headers);
        if let Some(body) = body {
            let bytes = serde_json::to_vec(body)
                .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;
            request = request.body(bytes);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Response received");

        if status == StatusCode::UNAUTHORIZED && !is_credential_exchange(path) {
            tracing::warn!("Credential rejected, ending session");
            self.session.logout();
            self.navigator.navigate(&self.unauthenticated_route);
            return Err(ClientError::Unauthorized);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let data = parse_body(&bytes)?;

        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(&data),
            });
        }

        Ok(data)
    }

    fn request_headers(&self, extra: Option<HeaderMap>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(extra) = extra {
            if extra.contains_key(CONTENT_TYPE) {
                headers.remove(CONTENT_TYPE);
            }
            for (name, value) in &extra {
                headers.append(name.clone(), value.clone());
            }
        }

        if let Some(token) = self.session.token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("unauthenticated_route", &self.unauthenticated_route)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

/// Whether `path` is a login/registration endpoint.
#[must_use]
pub fn is_credential_exchange(path: &str) -> bool {
    path.starts_with(CREDENTIAL_EXCHANGE_PREFIX)
}

fn parse_body(bytes: &[u8]) -> Result<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|e| ClientError::MalformedResponse(e.to_string()))
}

fn error_message(data: &Value) -> String {
    ["error", "message"]
        .iter()
        .find_map(|field| data.get(field).and_then(Value::as_str))
        .filter(|message| !message.is_empty())
        .unwrap_or(GENERIC_ERROR_MESSAGE)
        .to_string()
}
