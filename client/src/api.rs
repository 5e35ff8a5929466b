//! Service operations.
//!
//! One method per endpoint of the list service. Each builds its payload,
//! goes through [`ApiClient::execute`] and decodes the result. Errors pass
//! through untouched.

use crate::client::ApiClient;
use crate::error::{ClientError, Result};
use crate::requests::{LoginRequest, RegisterRequest, StatusRequest, TodoEnvelope, TodoRequest};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use todo_sync_core::types::{AuthSession, Identity, Todo, TodoId, TodoPage, TodoStatus};

impl ApiClient {
    /// `POST /auth/register`
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`] from the pipeline.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<AuthSession> {
        let body = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.call("/auth/register", Method::POST, Some(&body)).await
    }

    /// `POST /auth/login`
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`] from the pipeline. Wrong credentials
    /// come back as [`ClientError::Api`] with status 401.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.call("/auth/login", Method::POST, Some(&body)).await
    }

    /// `GET /api/profile`
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`] from the pipeline.
    pub async fn profile(&self) -> Result<Identity> {
        self.call::<(), _>("/api/profile", Method::GET, None).await
    }

    /// `GET /api/todos?page=&limit=`
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`] from the pipeline.
    pub async fn todos(&self, page: u32, limit: u32) -> Result<TodoPage> {
        let path = format!("/api/todos?page={page}&limit={limit}");
        self.call::<(), _>(&path, Method::GET, None).await
    }

    /// `GET /api/todos/{id}`
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`] from the pipeline.
    pub async fn todo(&self, id: TodoId) -> Result<Todo> {
        self.call::<(), TodoEnvelope>(&format!("/api/todos/{id}"), Method::GET, None)
            .await
            .map(Todo::from)
    }

    /// `POST /api/todos`
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`] from the pipeline.
    pub async fn create_todo(&self, title: &str, description: &str) -> Result<Todo> {
        let body = TodoRequest {
            title: title.to_string(),
            description: description.to_string(),
        };
        self.call::<_, TodoEnvelope>("/api/todos", Method::POST, Some(&body))
            .await
            .map(Todo::from)
    }

    /// `PUT /api/todos/{id}`
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`] from the pipeline.
    pub async fn update_todo(&self, id: TodoId, title: &str, description: &str) -> Result<Todo> {
        let body = TodoRequest {
            title: title.to_string(),
            description: description.to_string(),
        };
        self.call::<_, TodoEnvelope>(&format!("/api/todos/{id}"), Method::PUT, Some(&body))
            .await
            .map(Todo::from)
    }

    /// `PATCH /api/todos/{id}/status`
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`] from the pipeline.
    pub async fn update_todo_status(&self, id: TodoId, status: TodoStatus) -> Result<Todo> {
        let body = StatusRequest { status };
        self.call::<_, TodoEnvelope>(
            &format!("/api/todos/{id}/status"),
            Method::PATCH,
            Some(&body),
        )
        .await
        .map(Todo::from)
    }

    /// `DELETE /api/todos/{id}`
    ///
    /// Returns the acknowledgement body, `Value::Null` when empty.
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`] from the pipeline.
    pub async fn delete_todo(&self, id: TodoId) -> Result<Value> {
        self.execute(&format!("/api/todos/{id}"), Method::DELETE, None, None)
            .await
    }

    async fn call<B, T>(&self, path: &str, method: Method, body: Option<&B>) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;
        let data = self.execute(path, method, body.as_ref(), None).await?;
        serde_json::from_value(data).map_err(|e| ClientError::MalformedResponse(e.to_string()))
    }
}
