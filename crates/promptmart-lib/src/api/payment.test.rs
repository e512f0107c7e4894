use super::*;
use crate::networking::ApiClientConfig;
use crate::storage::MemoryTokenStore;
use mockito::Server;
use serde_json::json;

fn api_for(server: &Server) -> PaymentApi {
    let config = ApiClientConfig {
        base_url: server.url(),
        timeout_ms: 5000,
    };
    let client = ApiClient::new(config, Arc::new(MemoryTokenStore::new())).unwrap();
    PaymentApi::new(Arc::new(client))
}

#[tokio::test]
async fn test_create_order() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/payment/create-order")
        .match_body(mockito::Matcher::Json(json!({"promptId": "7"})))
        .with_status(201)
        .with_body(r#"{"orderId":"ord_1","status":"pending"}"#)
        .create_async()
        .await;

    let api = api_for(&server);
    let body = api.create_order(&json!({"promptId": "7"})).await.unwrap();
    assert_eq!(body["orderId"], "ord_1");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_order_queries() {
    let mut server = Server::new_async().await;
    let status = server
        .mock("GET", "/payment/status/ord_1")
        .with_status(200)
        .with_body(r#"{"status":"paid"}"#)
        .create_async()
        .await;
    let methods = server
        .mock("GET", "/payment/methods")
        .with_status(200)
        .with_body(r#"["card","wallet"]"#)
        .create_async()
        .await;
    let orders = server
        .mock("GET", "/payment/orders")
        .with_status(200)
        .with_body(r#"[{"orderId":"ord_1"}]"#)
        .create_async()
        .await;

    let api = api_for(&server);
    assert_eq!(api.status("ord_1").await.unwrap()["status"], "paid");
    assert_eq!(api.methods().await.unwrap()[0], "card");
    assert_eq!(api.orders(&[]).await.unwrap()[0]["orderId"], "ord_1");
    status.assert_async().await;
    methods.assert_async().await;
    orders.assert_async().await;
}

#[tokio::test]
async fn test_cancel_and_refund() {
    let mut server = Server::new_async().await;
    let cancel = server
        .mock("POST", "/payment/cancel/ord_1")
        .with_status(200)
        .with_body(r#"{"status":"cancelled"}"#)
        .create_async()
        .await;
    let refund = server
        .mock("POST", "/payment/refund/ord_2")
        .match_body(mockito::Matcher::Json(json!({"reason": "duplicate"})))
        .with_status(200)
        .with_body(r#"{"status":"refunded"}"#)
        .create_async()
        .await;

    let api = api_for(&server);
    assert_eq!(api.cancel("ord_1").await.unwrap()["status"], "cancelled");
    assert_eq!(
        api.refund("ord_2", &json!({"reason": "duplicate"}))
            .await
            .unwrap()["status"],
        "refunded"
    );
    cancel.assert_async().await;
    refund.assert_async().await;
}
