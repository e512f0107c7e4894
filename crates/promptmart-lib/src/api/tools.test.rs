use super::*;
use crate::networking::ApiClientConfig;
use crate::storage::MemoryTokenStore;
use mockito::Server;

fn api_for(server: &Server) -> ToolsApi {
    let config = ApiClientConfig {
        base_url: server.url(),
        timeout_ms: 5000,
    };
    let client = ApiClient::new(config, Arc::new(MemoryTokenStore::new())).unwrap();
    ToolsApi::new(Arc::new(client))
}

#[tokio::test]
async fn test_list_with_params() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/tools")
        .match_query(mockito::Matcher::UrlEncoded(
            "category".into(),
            "vision".into(),
        ))
        .with_status(200)
        .with_body(r#"[{"id":1,"name":"upscaler"}]"#)
        .create_async()
        .await;

    let api = api_for(&server);
    let body = api.list(&[("category", "vision".to_string())]).await.unwrap();
    assert_eq!(body[0]["name"], "upscaler");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_without_params_sends_no_query() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/tools")
        .with_status(200)
        .with_body(r#"[]"#)
        .create_async()
        .await;

    let api = api_for(&server);
    api.list(&[]).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_and_categories_paths() {
    let mut server = Server::new_async().await;
    let detail = server
        .mock("GET", "/tools/42")
        .with_status(200)
        .with_body(r#"{"id":42}"#)
        .create_async()
        .await;
    let categories = server
        .mock("GET", "/tools/categories")
        .with_status(200)
        .with_body(r#"["nlp","vision"]"#)
        .create_async()
        .await;

    let api = api_for(&server);
    assert_eq!(api.get("42").await.unwrap()["id"], 42);
    assert_eq!(api.categories().await.unwrap()[1], "vision");
    detail.assert_async().await;
    categories.assert_async().await;
}

#[tokio::test]
async fn test_rate_posts_rating_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/tools/42/rate")
        .match_body(mockito::Matcher::Json(serde_json::json!({"rating": 5})))
        .with_status(200)
        .with_body(r#"{"average":4.7}"#)
        .create_async()
        .await;

    let api = api_for(&server);
    api.rate("42", 5).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_admin_management_paths() {
    let mut server = Server::new_async().await;
    let create = server
        .mock("POST", "/tools")
        .with_status(201)
        .with_body(r#"{"id":7}"#)
        .create_async()
        .await;
    let update = server
        .mock("PUT", "/tools/7")
        .with_status(200)
        .with_body(r#"{"id":7}"#)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/tools/7")
        .with_status(200)
        .with_body(r#"{}"#)
        .create_async()
        .await;

    let api = api_for(&server);
    api.create(&serde_json::json!({"name": "new tool"})).await.unwrap();
    api.update("7", &serde_json::json!({"name": "renamed"})).await.unwrap();
    api.delete("7").await.unwrap();

    create.assert_async().await;
    update.assert_async().await;
    delete.assert_async().await;
}
