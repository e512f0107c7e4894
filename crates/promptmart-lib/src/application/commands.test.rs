use super::*;
use crate::storage::MemoryTokenStore;
use mockito::Server;

fn context_for(base_url: &str, tokens: Arc<MemoryTokenStore>) -> CommandContext {
    let config = AppConfig {
        api_url: base_url.to_string(),
        ..AppConfig::default()
    };
    CommandContext::with_token_store(config, tokens).unwrap()
}

#[tokio::test]
async fn test_guard_refuses_profile_when_logged_out() {
    let context = context_for("http://localhost:3000/api", Arc::new(MemoryTokenStore::new()));

    let err = execute_command_with_context(Commands::Profile { set: vec![] }, &context)
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("log in first"), "got: {}", message);
    // The intended destination is preserved in the hint
    assert!(message.contains("promptmart profile"), "got: {}", message);
}

#[tokio::test]
async fn test_guard_passes_profile_with_token() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/users/me")
        .match_header("authorization", "Bearer t")
        .with_status(200)
        .with_body(r#"{"user":{"role":"user","username":"kai"}}"#)
        .create_async()
        .await;

    let context = context_for(&server.url(), Arc::new(MemoryTokenStore::with_token("t")));
    execute_command_with_context(Commands::Profile { set: vec![] }, &context)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_tools_listing_needs_no_session() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/tools")
        .with_status(200)
        .with_body(r#"{"tools":[{"id":1,"name":"upscaler"}]}"#)
        .create_async()
        .await;

    let context = context_for(&server.url(), Arc::new(MemoryTokenStore::new()));
    execute_command_with_context(
        Commands::Tools {
            id: None,
            category: None,
            search: None,
            categories: false,
        },
        &context,
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_logout_clears_stored_token() {
    let tokens = Arc::new(MemoryTokenStore::with_token("abc"));
    let context = context_for("http://localhost:3000/api", tokens.clone());

    execute_command_with_context(Commands::Logout, &context)
        .await
        .unwrap();

    assert_eq!(tokens.load(), None);
    assert!(!context.session.is_logged_in());
}

#[test]
fn test_items_of_accepts_bare_array_and_envelopes() {
    let bare = serde_json::json!([{"id": 1}]);
    assert_eq!(items_of(&bare, &["tools"]).len(), 1);

    let wrapped = serde_json::json!({"tools": [{"id": 1}, {"id": 2}]});
    assert_eq!(items_of(&wrapped, &["tools", "items"]).len(), 2);

    let unknown = serde_json::json!({"unrelated": true});
    assert!(items_of(&unknown, &["tools"]).is_empty());
}

#[test]
fn test_item_label_prefers_name_then_title() {
    let named = serde_json::json!({"id": 7, "name": "upscaler"});
    assert_eq!(item_label(&named), "upscaler (7)");

    let titled = serde_json::json!({"id": "p1", "title": "debugging buddy"});
    assert_eq!(item_label(&titled), "debugging buddy (p1)");

    let plain = serde_json::json!("coding");
    assert_eq!(item_label(&plain), "coding");
}

#[test]
fn test_profile_name_falls_back() {
    let user: UserProfile =
        serde_json::from_value(serde_json::json!({"role": "user", "email": "a@b.c"})).unwrap();
    assert_eq!(profile_name(&user), "a@b.c");

    let anonymous: UserProfile = serde_json::from_value(serde_json::json!({})).unwrap();
    assert_eq!(profile_name(&anonymous), "you");
}
