//! Request pipeline against a mock list service.

#![allow(clippy::unwrap_used)]

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde_json::{json, Value};
use std::sync::Arc;
use todo_sync_auth::SessionStore;
use todo_sync_client::{ApiClient, ClientConfig, ClientError};
use todo_sync_core::storage::MemoryStorage;
use todo_sync_testing::{fixtures, init_tracing, mocks::RecordingNavigator};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    server: MockServer,
    session: SessionStore,
    navigator: RecordingNavigator,
    client: ApiClient,
}

async fn harness() -> Harness {
    init_tracing();
    let server = MockServer::start().await;
    let session = SessionStore::new(Arc::new(MemoryStorage::new()));
    let navigator = RecordingNavigator::new();
    let client = ApiClient::new(&ClientConfig::new(server.uri()), session.clone())
        .with_navigator(Arc::new(navigator.clone()));

    Harness {
        server,
        session,
        navigator,
        client,
    }
}

#[tokio::test]
async fn test_attaches_token_and_content_type() {
    let h = harness().await;
    h.session.login("T1", fixtures::identity());

    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .and(header("authorization", "Bearer T1"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "username": "a", "email": "a@b.com"
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let data = h
        .client
        .execute("/api/profile", Method::GET, None, None)
        .await
        .unwrap();

    assert_eq!(data["username"], "a");
}

#[tokio::test]
async fn test_sends_no_authorization_without_session() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "a@b.com", "password": "x"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&h.server)
        .await;

    let body = json!({"email": "a@b.com", "password": "x"});
    h.client
        .execute("/auth/login", Method::POST, Some(&body), None)
        .await
        .unwrap();

    let requests = h.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_extra_headers_override_content_type() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .and(header("content-type", "text/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&h.server)
        .await;

    let mut extra = HeaderMap::new();
    extra.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

    let data = h
        .client
        .execute("/api/todos", Method::GET, None, Some(extra))
        .await
        .unwrap();
    assert_eq!(data, json!([]));
}

#[tokio::test]
async fn test_401_ends_session_and_redirects_once() {
    let h = harness().await;
    h.session.login("T1", fixtures::identity());

    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "token expired"})))
        .expect(1)
        .mount(&h.server)
        .await;

    let result = h
        .client
        .execute("/api/todos?page=1&limit=20", Method::GET, None, None)
        .await;

    assert_eq!(result, Err(ClientError::Unauthorized));
    assert!(!h.session.is_authenticated());
    assert_eq!(h.session.token(), None);
    assert_eq!(h.session.identity(), None);
    assert_eq!(h.navigator.routes(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn test_401_with_non_json_body_still_ends_session() {
    let h = harness().await;
    h.session.login("T1", fixtures::identity());

    Mock::given(method("DELETE"))
        .and(path("/api/todos/3"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&h.server)
        .await;

    let result = h
        .client
        .execute("/api/todos/3", Method::DELETE, None, None)
        .await;

    assert_eq!(result, Err(ClientError::Unauthorized));
    assert!(!h.session.is_authenticated());
    assert_eq!(h.navigator.count(), 1);
}

#[tokio::test]
async fn test_401_while_logged_out_still_redirects() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;

    let result = h
        .client
        .execute("/api/profile", Method::GET, None, None)
        .await;

    assert!(result.unwrap_err().is_unauthorized());
    assert!(!h.session.is_authenticated());
    assert_eq!(h.navigator.count(), 1);
}

#[tokio::test]
async fn test_401_from_auth_path_leaves_session_alone() {
    let h = harness().await;
    h.session.login("T1", fixtures::identity());

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "invalid credentials"})),
        )
        .mount(&h.server)
        .await;

    let body = json!({"email": "a@b.com", "password": "wrong"});
    let result = h
        .client
        .execute("/auth/login", Method::POST, Some(&body), None)
        .await;

    assert_eq!(
        result,
        Err(ClientError::Api {
            status: 401,
            message: "invalid credentials".to_string(),
        })
    );
    assert_eq!(h.session.token().as_deref(), Some("T1"));
    assert_eq!(h.session.identity(), Some(fixtures::identity()));
    assert_eq!(h.navigator.count(), 0);
}

#[tokio::test]
async fn test_application_error_carries_server_message() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/api/todos"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Title is required"})))
        .mount(&h.server)
        .await;

    let body = json!({"title": "", "description": ""});
    let error = h
        .client
        .execute("/api/todos", Method::POST, Some(&body), None)
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(400));
    assert_eq!(error.to_string(), "Title is required");
    assert_eq!(h.navigator.count(), 0);
}

#[tokio::test]
async fn test_application_error_without_message_uses_fallback() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/api/todos/9"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&h.server)
        .await;

    let error = h
        .client
        .execute("/api/todos/9", Method::GET, None, None)
        .await
        .unwrap_err();

    assert_eq!(
        error,
        ClientError::Api {
            status: 500,
            message: "Something went wrong".to_string(),
        }
    );
}

#[tokio::test]
async fn test_malformed_body_is_not_an_application_error() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&h.server)
        .await;

    let error = h
        .client
        .execute("/api/profile", Method::GET, None, None)
        .await
        .unwrap_err();

    assert!(matches!(error, ClientError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_empty_body_is_null() {
    let h = harness().await;

    Mock::given(method("DELETE"))
        .and(path("/api/todos/4"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&h.server)
        .await;

    let data = h
        .client
        .execute("/api/todos/4", Method::DELETE, None, None)
        .await
        .unwrap();

    assert_eq!(data, Value::Null);
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    init_tracing();
    let session = SessionStore::in_memory();
    // Port 9 (discard) is not served in the test environment.
    let client = ApiClient::new(&ClientConfig::new("http://127.0.0.1:9"), session);

    let error = client
        .execute("/api/profile", Method::GET, None, None)
        .await
        .unwrap_err();

    assert!(matches!(error, ClientError::Transport(_)));
}

#[tokio::test]
async fn test_logout_between_calls_affects_later_calls_only() {
    let h = harness().await;
    h.session.login("T1", fixtures::identity());

    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "username": "a", "email": "a@b.com"
        })))
        .mount(&h.server)
        .await;

    h.client
        .execute("/api/profile", Method::GET, None, None)
        .await
        .unwrap();
    h.session.logout();
    h.client
        .execute("/api/profile", Method::GET, None, None)
        .await
        .unwrap();

    let requests = h.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].headers["authorization"], "Bearer T1");
    assert!(!requests[1].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_concurrent_calls_each_read_the_session() {
    let h = harness().await;
    h.session.login("T1", fixtures::identity());

    Mock::given(method("GET"))
        .and(path("/api/todos/1"))
        .and(header("authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(3)
        .mount(&h.server)
        .await;

    let calls = (0..3).map(|_| h.client.execute("/api/todos/1", Method::GET, None, None));
    let results = futures::future::join_all(calls).await;

    assert!(results.iter().all(Result::is_ok));
}
