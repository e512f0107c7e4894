use super::*;
use crate::networking::{ApiClient, ApiClientConfig};
use crate::storage::MemoryTokenStore;
use mockito::Server;
use serde_json::json;

fn store_for(server: &Server, tokens: Arc<MemoryTokenStore>) -> SessionStore {
    let config = ApiClientConfig {
        base_url: server.url(),
        timeout_ms: 5000,
    };
    let client = Arc::new(ApiClient::new(config, tokens.clone()).unwrap());
    SessionStore::new(AuthApi::new(client), tokens)
}

#[tokio::test]
async fn test_login_success_updates_session() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/users/login")
        .with_status(200)
        .with_body(r#"{"token":"abc","user":{"role":"user"}}"#)
        .create_async()
        .await;

    let tokens = Arc::new(MemoryTokenStore::new());
    let store = store_for(&server, tokens.clone());
    assert!(!store.is_logged_in());

    let response = store
        .login(&json!({"email": "a@b.c", "password": "pw"}))
        .await
        .unwrap();

    assert_eq!(response.token, "abc");
    assert!(store.is_logged_in());
    assert!(!store.is_admin());
    assert!(!store.loading());
    assert_eq!(store.error(), None);
    // Token mirrored to durable storage
    assert_eq!(tokens.load(), Some("abc".to_string()));
}

#[tokio::test]
async fn test_login_failure_records_server_message() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/users/login")
        .with_status(400)
        .with_body(r#"{"message":"bad credentials"}"#)
        .create_async()
        .await;

    let tokens = Arc::new(MemoryTokenStore::new());
    let store = store_for(&server, tokens.clone());

    let err = store
        .login(&json!({"email": "a@b.c", "password": "nope"}))
        .await
        .unwrap_err();

    // Recorded for display AND propagated to the caller
    assert_eq!(err.status(), Some(400));
    assert_eq!(store.error(), Some("bad credentials".to_string()));
    assert!(!store.is_logged_in());
    assert!(!store.loading());
    assert_eq!(tokens.load(), None);
}

#[tokio::test]
async fn test_fetch_current_user_failure_uses_fallback_message() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/users/me")
        .with_status(500)
        .with_body(r#"{}"#)
        .create_async()
        .await;

    let store = store_for(&server, Arc::new(MemoryTokenStore::with_token("t")));
    let err = store.fetch_current_user().await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(store.error(), Some(fallback::FETCH_USER.to_string()));
    assert!(!store.loading());
}

#[tokio::test]
async fn test_fetch_current_user_success_sets_user() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/users/me")
        .with_status(200)
        .with_body(r#"{"user":{"role":"admin"}}"#)
        .create_async()
        .await;

    let store = store_for(&server, Arc::new(MemoryTokenStore::with_token("t")));
    store.fetch_current_user().await.unwrap();

    assert!(store.is_admin());
    assert!(store.is_logged_in());
}

#[tokio::test]
async fn test_register_success_logs_in() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/users/register")
        .with_status(201)
        .with_body(r#"{"token":"fresh","user":{"role":"user"}}"#)
        .create_async()
        .await;

    let tokens = Arc::new(MemoryTokenStore::new());
    let store = store_for(&server, tokens.clone());

    store
        .register(&json!({"username": "kai", "password": "pw"}))
        .await
        .unwrap();

    assert!(store.is_logged_in());
    assert_eq!(tokens.load(), Some("fresh".to_string()));
}

#[tokio::test]
async fn test_logout_is_local_and_synchronous() {
    // Server deliberately has no mocks: logout must not hit the network
    let server = Server::new_async().await;
    let tokens = Arc::new(MemoryTokenStore::with_token("abc"));
    let store = store_for(&server, tokens.clone());

    assert!(store.is_logged_in());
    store.logout();

    let state = store.snapshot();
    assert_eq!(state.token, None);
    assert_eq!(state.user, None);
    assert!(!store.is_logged_in());
    assert_eq!(tokens.load(), None);
}

#[tokio::test]
async fn test_change_password_leaves_token_and_user_alone() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/users/login")
        .with_status(200)
        .with_body(r#"{"token":"abc","user":{"role":"user"}}"#)
        .create_async()
        .await;
    server
        .mock("PUT", "/users/password")
        .with_status(200)
        .with_body(r#"{"message":"ok"}"#)
        .create_async()
        .await;

    let tokens = Arc::new(MemoryTokenStore::new());
    let store = store_for(&server, tokens.clone());
    store.login(&json!({"email": "a@b.c", "password": "pw"})).await.unwrap();

    let before = store.snapshot();
    store
        .change_password(&json!({"current": "pw", "new": "pw2"}))
        .await
        .unwrap();
    let after = store.snapshot();

    assert_eq!(before.token, after.token);
    assert_eq!(before.user, after.user);
    assert!(!after.loading);
}

#[tokio::test]
async fn test_change_password_failure_uses_fallback() {
    let mut server = Server::new_async().await;
    server
        .mock("PUT", "/users/password")
        .with_status(400)
        .with_body("nonsense")
        .create_async()
        .await;

    let store = store_for(&server, Arc::new(MemoryTokenStore::with_token("t")));
    store
        .change_password(&json!({"current": "a", "new": "b"}))
        .await
        .unwrap_err();

    assert_eq!(store.error(), Some(fallback::CHANGE_PASSWORD.to_string()));
}

#[tokio::test]
async fn test_new_seeds_token_from_durable_storage() {
    let server = Server::new_async().await;
    let store = store_for(&server, Arc::new(MemoryTokenStore::with_token("persisted")));

    assert!(store.is_logged_in());
    assert_eq!(store.snapshot().token, Some("persisted".to_string()));
}

#[tokio::test]
async fn test_operation_clears_previous_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/users/me")
        .with_status(500)
        .with_body(r#"{}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/users/login")
        .with_status(200)
        .with_body(r#"{"token":"abc","user":{"role":"user"}}"#)
        .create_async()
        .await;

    let store = store_for(&server, Arc::new(MemoryTokenStore::with_token("t")));

    store.fetch_current_user().await.unwrap_err();
    assert!(store.error().is_some());

    store.login(&json!({"email": "a@b.c", "password": "pw"})).await.unwrap();
    assert_eq!(store.error(), None);
}

#[tokio::test]
async fn test_set_token_round_trips_durable_storage() {
    let server = Server::new_async().await;
    let tokens = Arc::new(MemoryTokenStore::new());
    let store = store_for(&server, tokens.clone());

    store.set_token(Some("x"));
    assert_eq!(tokens.load(), Some("x".to_string()));

    store.set_token(None);
    assert_eq!(tokens.load(), None);
}
