//! E2E tests for the login gate in front of profile commands
//!
//! Logged-out invocations of guarded commands must be refused before any
//! network traffic happens; a stored token lets them through.

use anyhow::Result;
use mockito::Server;
use promptmart_lib::application::cli::Commands;
use promptmart_lib::application::commands::execute_command_with_context;
use promptmart_lib::storage::{MemoryTokenStore, TokenStore};
use promptmart_tests::context_for;
use std::sync::Arc;

#[tokio::test]
async fn e2e_profile_refused_when_logged_out() -> Result<()> {
    // No server at all: the guard must trip before any request is sent
    let context = context_for("http://127.0.0.1:9", Arc::new(MemoryTokenStore::new()));

    let err = execute_command_with_context(Commands::Profile { set: vec![] }, &context)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("log in first"));
    assert!(err.to_string().contains("promptmart profile"));
    Ok(())
}

#[tokio::test]
async fn e2e_passwd_refused_when_logged_out() -> Result<()> {
    let context = context_for("http://127.0.0.1:9", Arc::new(MemoryTokenStore::new()));

    let err = execute_command_with_context(Commands::Passwd, &context)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("promptmart passwd"));
    Ok(())
}

#[tokio::test]
async fn e2e_profile_allowed_with_stored_token() -> Result<()> {
    let mut server = Server::new_async().await;
    let me = server
        .mock("GET", "/users/me")
        .match_header("authorization", "Bearer stored")
        .with_status(200)
        .with_body(r#"{"user":{"role":"user","username":"kai"}}"#)
        .create_async()
        .await;

    let tokens = Arc::new(MemoryTokenStore::with_token("stored"));
    let context = context_for(&server.url(), tokens);

    execute_command_with_context(Commands::Profile { set: vec![] }, &context).await?;
    me.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn e2e_expired_session_is_cleared_by_any_call() -> Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/users/me")
        .with_status(401)
        .with_body(r#"{"message":"token expired"}"#)
        .create_async()
        .await;

    let tokens = Arc::new(MemoryTokenStore::with_token("stale"));
    let context = context_for(&server.url(), tokens.clone());

    // The command fails, and the stored credential is gone afterwards,
    // so the next guarded command is refused up front.
    let result = execute_command_with_context(Commands::Profile { set: vec![] }, &context).await;
    assert!(result.is_err());
    assert_eq!(tokens.load(), None);

    let err = execute_command_with_context(Commands::Passwd, &context)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("log in first"));
    Ok(())
}

#[tokio::test]
async fn e2e_logout_clears_session_without_network() -> Result<()> {
    let tokens = Arc::new(MemoryTokenStore::with_token("abc"));
    // Dead address: logout must not touch the network
    let context = context_for("http://127.0.0.1:9", tokens.clone());

    execute_command_with_context(Commands::Logout, &context).await?;

    assert_eq!(tokens.load(), None);
    assert!(!context.session.is_logged_in());
    Ok(())
}
