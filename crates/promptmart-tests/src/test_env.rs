//! Shared wiring for end-to-end command tests
//!
//! Builds a real `CommandContext` pointed at a test-controlled base URL,
//! with an in-memory token store standing in for the on-disk one.

use promptmart_lib::application::config::AppConfig;
use promptmart_lib::application::commands::CommandContext;
use promptmart_lib::storage::MemoryTokenStore;
use std::sync::Arc;

/// Context wired against `base_url` with an injected token store
pub fn context_for(base_url: &str, tokens: Arc<MemoryTokenStore>) -> CommandContext {
    let config = AppConfig {
        api_url: base_url.to_string(),
        net_timeout_ms: 2000,
        ..AppConfig::default()
    };
    CommandContext::with_token_store(config, tokens)
        .expect("test context construction should not fail")
}

/// Canonical login/register response body for a regular user
pub fn user_body(token: &str) -> String {
    format!(
        r#"{{"token":"{}","user":{{"role":"user","username":"kai","email":"kai@example.com"}}}}"#,
        token
    )
}

/// Canonical login/register response body for an admin
pub fn admin_user_body(token: &str) -> String {
    format!(
        r#"{{"token":"{}","user":{{"role":"admin","username":"root"}}}}"#,
        token
    )
}
