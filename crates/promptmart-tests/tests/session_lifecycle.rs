//! E2E tests for the session store against a mock API, including the
//! durable token round trip through a real file-backed store.

use anyhow::Result;
use mockito::Server;
use promptmart_lib::api::AuthApi;
use promptmart_lib::application::config::AppConfig;
use promptmart_lib::networking::ApiClient;
use promptmart_lib::session::SessionStore;
use promptmart_lib::storage::{FileTokenStore, MemoryTokenStore, TokenStore};
use promptmart_tests::{admin_user_body, context_for, user_body};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn e2e_login_then_restart_restores_session() -> Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/users/login")
        .with_status(200)
        .with_body(user_body("abc"))
        .create_async()
        .await;

    let temp_dir = TempDir::new()?;
    let token_path = temp_dir.path().join("token");

    // First "process": log in, token lands on disk
    {
        let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(token_path.clone()));
        let config = AppConfig {
            api_url: server.url(),
            ..AppConfig::default()
        };
        let client = Arc::new(ApiClient::new(config.api_client_config(), tokens.clone())?);
        let store = SessionStore::new(AuthApi::new(client), tokens);

        store
            .login(&json!({"email": "kai@example.com", "password": "pw"}))
            .await?;
        assert!(store.is_logged_in());
        assert!(!store.is_admin());
    }

    // Second "process": a fresh store seeds itself from the same file
    {
        let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(token_path));
        let config = AppConfig {
            api_url: server.url(),
            ..AppConfig::default()
        };
        let client = Arc::new(ApiClient::new(config.api_client_config(), tokens.clone())?);
        let store = SessionStore::new(AuthApi::new(client), tokens.clone());

        assert!(store.is_logged_in());

        store.logout();
        assert!(!store.is_logged_in());
        assert_eq!(tokens.load(), None);
    }

    Ok(())
}

#[tokio::test]
async fn e2e_admin_login_grants_admin_view() -> Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/users/login")
        .with_status(200)
        .with_body(admin_user_body("root-token"))
        .create_async()
        .await;

    let tokens = Arc::new(MemoryTokenStore::new());
    let context = context_for(&server.url(), tokens.clone());

    context
        .session
        .login(&json!({"email": "root@example.com", "password": "pw"}))
        .await?;

    assert!(context.session.is_admin());
    assert_eq!(tokens.load(), Some("root-token".to_string()));
    Ok(())
}

#[tokio::test]
async fn e2e_profile_update_flows_through_session() -> Result<()> {
    let mut server = Server::new_async().await;
    let update = server
        .mock("PUT", "/users/profile")
        .match_header("authorization", "Bearer t")
        .match_body(mockito::Matcher::Json(json!({"bio": "prompt enjoyer"})))
        .with_status(200)
        .with_body(r#"{"user":{"role":"user","bio":"prompt enjoyer"}}"#)
        .create_async()
        .await;

    let context = context_for(&server.url(), Arc::new(MemoryTokenStore::with_token("t")));
    let user = context
        .session
        .update_profile(&json!({"bio": "prompt enjoyer"}))
        .await?;

    assert_eq!(user.field("bio"), Some(&json!("prompt enjoyer")));
    update.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn e2e_failed_login_records_message_and_keeps_logged_out() -> Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/users/login")
        .with_status(401)
        .with_body(r#"{"message":"bad credentials"}"#)
        .create_async()
        .await;

    let tokens = Arc::new(MemoryTokenStore::new());
    let context = context_for(&server.url(), tokens.clone());

    let err = context
        .session
        .login(&json!({"email": "kai@example.com", "password": "wrong"}))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(context.session.error(), Some("bad credentials".to_string()));
    assert!(!context.session.is_logged_in());
    assert!(!context.session.loading());
    assert_eq!(tokens.load(), None);
    Ok(())
}
