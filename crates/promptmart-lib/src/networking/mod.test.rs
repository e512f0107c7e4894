use super::*;
use crate::storage::MemoryTokenStore;
use mockito::Server;
use std::sync::atomic::{AtomicBool, Ordering};

fn client_for(server: &Server, tokens: Arc<MemoryTokenStore>) -> ApiClient {
    let config = ApiClientConfig {
        base_url: server.url(),
        timeout_ms: DEFAULT_TIMEOUT_MS,
    };
    ApiClient::new(config, tokens).unwrap()
}

#[test]
fn test_default_config() {
    let config = ApiClientConfig::default();
    assert_eq!(config.base_url, "http://localhost:3000/api");
    assert_eq!(config.timeout_ms, 5000);
}

#[tokio::test]
async fn test_bearer_token_attached_when_stored() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/tools")
        .match_header("authorization", "Bearer secret")
        .with_status(200)
        .with_body(r#"{"tools":[]}"#)
        .create_async()
        .await;

    let tokens = Arc::new(MemoryTokenStore::with_token("secret"));
    let client = client_for(&server, tokens);

    let body = client.get("/tools").await.unwrap();
    assert_eq!(body["tools"], serde_json::json!([]));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_no_auth_header_without_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/tools")
        .match_header("authorization", mockito::Matcher::Missing)
        .with_status(200)
        .with_body(r#"[]"#)
        .create_async()
        .await;

    let tokens = Arc::new(MemoryTokenStore::new());
    let client = client_for(&server, tokens);

    client.get("/tools").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_success_returns_body_directly() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/users/login")
        .with_status(200)
        .with_body(r#"{"token":"abc","user":{"role":"user"}}"#)
        .create_async()
        .await;

    let client = client_for(&server, Arc::new(MemoryTokenStore::new()));
    let body = client
        .post("/users/login", &serde_json::json!({"email": "a@b.c"}))
        .await
        .unwrap();

    // The envelope is unwrapped: callers see the JSON body, not a
    // transport-level wrapper
    assert_eq!(body["token"], "abc");
    assert_eq!(body["user"]["role"], "user");
}

#[tokio::test]
async fn test_401_clears_token_and_fires_hook() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/users/me")
        .with_status(401)
        .with_body(r#"{"message":"token expired"}"#)
        .create_async()
        .await;

    let tokens = Arc::new(MemoryTokenStore::with_token("stale"));
    let expired = Arc::new(AtomicBool::new(false));
    let expired_flag = expired.clone();

    let client = client_for(&server, tokens.clone()).with_session_expired_hook(Arc::new(
        move || {
            expired_flag.store(true, Ordering::SeqCst);
        },
    ));

    let err = client.get("/users/me").await.unwrap_err();

    // The rejection still propagates after the side effects
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.server_message(), Some("token expired"));
    assert_eq!(tokens.load(), None);
    assert!(expired.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_401_without_hook_still_clears_token() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/users/me")
        .with_status(401)
        .with_body(r#"{}"#)
        .create_async()
        .await;

    let tokens = Arc::new(MemoryTokenStore::with_token("stale"));
    let client = client_for(&server, tokens.clone());

    let err = client.get("/users/me").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(tokens.load(), None);
}

#[tokio::test]
async fn test_server_errors_propagate_with_status() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/tools/999")
        .with_status(404)
        .with_body(r#"{"message":"tool not found"}"#)
        .create_async()
        .await;
    server
        .mock("DELETE", "/tools/1")
        .with_status(403)
        .with_body(r#"{}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/prompts")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let tokens = Arc::new(MemoryTokenStore::with_token("t"));
    let client = client_for(&server, tokens.clone());

    let err = client.get("/tools/999").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.server_message(), Some("tool not found"));

    let err = client.delete("/tools/1").await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.server_message(), None);

    // A non-JSON error body still classifies by status
    let err = client.get("/prompts").await.unwrap_err();
    assert_eq!(err.status(), Some(500));

    // Non-401 failures never touch the stored token
    assert_eq!(tokens.load(), Some("t".to_string()));
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    let config = ApiClientConfig {
        // Nothing listens here
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_ms: 1000,
    };
    let client = ApiClient::new(config, Arc::new(MemoryTokenStore::new())).unwrap();

    let err = client.get("/tools").await.unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_malformed_base_url_is_config_error() {
    let config = ApiClientConfig {
        base_url: "not a base url".to_string(),
        timeout_ms: 1000,
    };
    let client = ApiClient::new(config, Arc::new(MemoryTokenStore::new())).unwrap();

    let err = client.get("/tools").await.unwrap_err();
    assert!(matches!(err, ApiError::Config { .. }));
}

#[tokio::test]
async fn test_query_parameters_forwarded() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/tools")
        .match_query(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("category".into(), "nlp".into()),
            mockito::Matcher::UrlEncoded("page".into(), "2".into()),
        ]))
        .with_status(200)
        .with_body(r#"[]"#)
        .create_async()
        .await;

    let client = client_for(&server, Arc::new(MemoryTokenStore::new()));
    client
        .get_with_query(
            "/tools",
            &[("category", "nlp".to_string()), ("page", "2".to_string())],
        )
        .await
        .unwrap();
    mock.assert_async().await;
}
