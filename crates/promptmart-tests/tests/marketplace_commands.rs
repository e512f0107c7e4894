//! E2E tests for browsing and purchase commands against a mock API

use anyhow::Result;
use mockito::Server;
use promptmart_lib::application::cli::Commands;
use promptmart_lib::application::commands::execute_command_with_context;
use promptmart_lib::storage::MemoryTokenStore;
use promptmart_tests::context_for;
use std::sync::Arc;

fn tools_command() -> Commands {
    Commands::Tools {
        id: None,
        category: None,
        search: None,
        categories: false,
    }
}

#[tokio::test]
async fn e2e_tools_listing_with_category_filter() -> Result<()> {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/tools")
        .match_query(mockito::Matcher::UrlEncoded(
            "category".into(),
            "vision".into(),
        ))
        .with_status(200)
        .with_body(r#"{"tools":[{"id":1,"name":"upscaler"},{"id":2,"name":"captioner"}]}"#)
        .create_async()
        .await;

    let context = context_for(&server.url(), Arc::new(MemoryTokenStore::new()));
    execute_command_with_context(
        Commands::Tools {
            id: None,
            category: Some("vision".to_string()),
            search: None,
            categories: false,
        },
        &context,
    )
    .await?;

    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn e2e_tools_listing_without_session() -> Result<()> {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/tools")
        .match_header("authorization", mockito::Matcher::Missing)
        .with_status(200)
        .with_body(r#"[]"#)
        .create_async()
        .await;

    let context = context_for(&server.url(), Arc::new(MemoryTokenStore::new()));
    execute_command_with_context(tools_command(), &context).await?;

    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn e2e_prompt_detail() -> Result<()> {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/prompts/7")
        .with_status(200)
        .with_body(r#"{"id":7,"title":"debugging buddy","price":5}"#)
        .create_async()
        .await;

    let context = context_for(&server.url(), Arc::new(MemoryTokenStore::new()));
    execute_command_with_context(
        Commands::Prompts {
            id: Some("7".to_string()),
            category: None,
            search: None,
            categories: false,
            mine: false,
            purchased: false,
        },
        &context,
    )
    .await?;

    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn e2e_purchase_carries_bearer_token() -> Result<()> {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/prompts/7/purchase")
        .match_header("authorization", "Bearer buyer")
        .with_status(200)
        .with_body(r#"{"orderId":"ord_1"}"#)
        .create_async()
        .await;

    let context = context_for(&server.url(), Arc::new(MemoryTokenStore::with_token("buyer")));
    execute_command_with_context(
        Commands::Purchase {
            prompt_id: "7".to_string(),
        },
        &context,
    )
    .await?;

    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn e2e_purchase_failure_propagates() -> Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/prompts/7/purchase")
        .with_status(402)
        .with_body(r#"{"message":"insufficient balance"}"#)
        .create_async()
        .await;

    let context = context_for(&server.url(), Arc::new(MemoryTokenStore::with_token("buyer")));
    let result = execute_command_with_context(
        Commands::Purchase {
            prompt_id: "7".to_string(),
        },
        &context,
    )
    .await;

    assert!(result.is_err());
    Ok(())
}

#[tokio::test]
async fn e2e_orders_lifecycle_queries() -> Result<()> {
    let mut server = Server::new_async().await;
    let listing = server
        .mock("GET", "/payment/orders")
        .with_status(200)
        .with_body(r#"{"orders":[{"orderId":"ord_1","status":"paid"}]}"#)
        .create_async()
        .await;
    let status = server
        .mock("GET", "/payment/status/ord_1")
        .with_status(200)
        .with_body(r#"{"orderId":"ord_1","status":"paid"}"#)
        .create_async()
        .await;
    let cancel = server
        .mock("POST", "/payment/cancel/ord_2")
        .with_status(200)
        .with_body(r#"{"status":"cancelled"}"#)
        .create_async()
        .await;

    let context = context_for(&server.url(), Arc::new(MemoryTokenStore::with_token("t")));

    execute_command_with_context(
        Commands::Orders {
            id: None,
            cancel: None,
            refund: None,
            reason: None,
            methods: false,
        },
        &context,
    )
    .await?;
    execute_command_with_context(
        Commands::Orders {
            id: Some("ord_1".to_string()),
            cancel: None,
            refund: None,
            reason: None,
            methods: false,
        },
        &context,
    )
    .await?;
    execute_command_with_context(
        Commands::Orders {
            id: None,
            cancel: Some("ord_2".to_string()),
            refund: None,
            reason: None,
            methods: false,
        },
        &context,
    )
    .await?;

    listing.assert_async().await;
    status.assert_async().await;
    cancel.assert_async().await;
    Ok(())
}
