use super::*;
use crate::networking::ApiClientConfig;
use crate::storage::MemoryTokenStore;
use mockito::Server;
use serde_json::json;

fn api_for(server: &Server) -> AuthApi {
    let config = ApiClientConfig {
        base_url: server.url(),
        timeout_ms: 5000,
    };
    let client = ApiClient::new(config, Arc::new(MemoryTokenStore::new())).unwrap();
    AuthApi::new(Arc::new(client))
}

#[tokio::test]
async fn test_register_decodes_auth_response() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/users/register")
        .match_body(mockito::Matcher::Json(json!({
            "username": "kai",
            "email": "kai@example.com",
            "password": "hunter2"
        })))
        .with_status(201)
        .with_body(r#"{"token":"fresh","user":{"role":"user","username":"kai"}}"#)
        .create_async()
        .await;

    let api = api_for(&server);
    let response = api
        .register(&json!({
            "username": "kai",
            "email": "kai@example.com",
            "password": "hunter2"
        }))
        .await
        .unwrap();

    assert_eq!(response.token, "fresh");
    assert_eq!(response.user.role.as_deref(), Some("user"));
    assert_eq!(
        response.user.field("username"),
        Some(&json!("kai"))
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_login_decodes_auth_response() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/users/login")
        .with_status(200)
        .with_body(r#"{"token":"abc","user":{"role":"admin"}}"#)
        .create_async()
        .await;

    let api = api_for(&server);
    let response = api
        .login(&json!({"email": "root@example.com", "password": "s3cret"}))
        .await
        .unwrap();

    assert_eq!(response.token, "abc");
    assert!(response.user.is_admin());
}

#[tokio::test]
async fn test_get_current_user_unwraps_envelope() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/users/me")
        .with_status(200)
        .with_body(r#"{"user":{"role":"user","bio":"prompt enjoyer"}}"#)
        .create_async()
        .await;

    let api = api_for(&server);
    let user = api.get_current_user().await.unwrap();
    assert!(!user.is_admin());
    assert_eq!(user.field("bio"), Some(&json!("prompt enjoyer")));
}

#[tokio::test]
async fn test_update_profile_hits_put() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/users/profile")
        .with_status(200)
        .with_body(r#"{"user":{"role":"user","bio":"updated"}}"#)
        .create_async()
        .await;

    let api = api_for(&server);
    let user = api.update_profile(&json!({"bio": "updated"})).await.unwrap();
    assert_eq!(user.field("bio"), Some(&json!("updated")));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_change_password_hits_put() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/users/password")
        .with_status(200)
        .with_body(r#"{"message":"password updated"}"#)
        .create_async()
        .await;

    let api = api_for(&server);
    let body = api
        .change_password(&json!({"current": "old", "new": "new"}))
        .await
        .unwrap();
    assert_eq!(body["message"], "password updated");
    mock.assert_async().await;
}

#[test]
fn test_is_admin_requires_admin_role() {
    let admin: UserProfile = serde_json::from_value(json!({"role": "admin"})).unwrap();
    let user: UserProfile = serde_json::from_value(json!({"role": "user"})).unwrap();
    let anonymous: UserProfile = serde_json::from_value(json!({})).unwrap();

    assert!(admin.is_admin());
    assert!(!user.is_admin());
    assert!(!anonymous.is_admin());
}
