use super::*;
use crate::networking::ApiClientConfig;
use crate::storage::MemoryTokenStore;
use mockito::Server;

fn api_for(server: &Server) -> PromptsApi {
    let config = ApiClientConfig {
        base_url: server.url(),
        timeout_ms: 5000,
    };
    let client = ApiClient::new(config, Arc::new(MemoryTokenStore::new())).unwrap();
    PromptsApi::new(Arc::new(client))
}

#[tokio::test]
async fn test_purchase_posts_to_purchase_path() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/prompts/7/purchase")
        .with_status(200)
        .with_body(r#"{"orderId":"ord_1"}"#)
        .create_async()
        .await;

    let api = api_for(&server);
    let body = api.purchase("7").await.unwrap();
    assert_eq!(body["orderId"], "ord_1");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_owned_and_authored_listings() {
    let mut server = Server::new_async().await;
    let purchased = server
        .mock("GET", "/prompts/purchased")
        .with_status(200)
        .with_body(r#"[{"id":1}]"#)
        .create_async()
        .await;
    let mine = server
        .mock("GET", "/prompts/my")
        .with_status(200)
        .with_body(r#"[{"id":2}]"#)
        .create_async()
        .await;

    let api = api_for(&server);
    assert_eq!(api.purchased().await.unwrap()[0]["id"], 1);
    assert_eq!(api.mine().await.unwrap()[0]["id"], 2);
    purchased.assert_async().await;
    mine.assert_async().await;
}

#[tokio::test]
async fn test_listing_and_detail_paths() {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", "/prompts")
        .match_query(mockito::Matcher::UrlEncoded(
            "category".into(),
            "coding".into(),
        ))
        .with_status(200)
        .with_body(r#"[]"#)
        .create_async()
        .await;
    let detail = server
        .mock("GET", "/prompts/9")
        .with_status(200)
        .with_body(r#"{"id":9}"#)
        .create_async()
        .await;
    let categories = server
        .mock("GET", "/prompts/categories")
        .with_status(200)
        .with_body(r#"["coding"]"#)
        .create_async()
        .await;

    let api = api_for(&server);
    api.list(&[("category", "coding".to_string())]).await.unwrap();
    assert_eq!(api.get("9").await.unwrap()["id"], 9);
    assert_eq!(api.categories().await.unwrap()[0], "coding");
    list.assert_async().await;
    detail.assert_async().await;
    categories.assert_async().await;
}

#[tokio::test]
async fn test_manage_and_rate_paths() {
    let mut server = Server::new_async().await;
    let create = server
        .mock("POST", "/prompts")
        .with_status(201)
        .with_body(r#"{"id":3}"#)
        .create_async()
        .await;
    let update = server
        .mock("PUT", "/prompts/3")
        .with_status(200)
        .with_body(r#"{"id":3}"#)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/prompts/3")
        .with_status(200)
        .with_body(r#"{}"#)
        .create_async()
        .await;
    let rate = server
        .mock("POST", "/prompts/3/rate")
        .match_body(mockito::Matcher::Json(serde_json::json!({"rating": 4})))
        .with_status(200)
        .with_body(r#"{}"#)
        .create_async()
        .await;

    let api = api_for(&server);
    api.create(&serde_json::json!({"title": "debugging buddy"})).await.unwrap();
    api.update("3", &serde_json::json!({"price": 5})).await.unwrap();
    api.rate("3", 4).await.unwrap();
    api.delete("3").await.unwrap();

    create.assert_async().await;
    update.assert_async().await;
    delete.assert_async().await;
    rate.assert_async().await;
}
