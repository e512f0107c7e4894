//! HTTP client facade for the marketplace REST API
//!
//! Single choke point for all outgoing API calls: attaches the stored
//! bearer token, unwraps the JSON response body, classifies failures, and
//! reacts to authentication expiry. Callers never build auth headers or
//! handle cross-cutting errors themselves.

use crate::storage::TokenStore;
use reqwest::{Client, Method, StatusCode, Url};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, trace, warn};

/// API base URL used when no configuration is supplied
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Fixed request timeout in milliseconds used when no configuration is supplied
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Errors surfaced by the API facade
///
/// The facade never swallows a failure: it logs, performs the 401 side
/// effect, and propagates one of these to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server responded with a non-success status code
    #[error("Server returned status {status}")]
    Server {
        status: u16,
        /// Server-supplied `message` field, when the body carried one
        message: Option<String>,
        body: Value,
    },

    /// The request was sent but no response arrived (network/timeout)
    #[error("Could not reach the server: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    /// The request was never sent (malformed configuration)
    #[error("Invalid request configuration: {message}")]
    Config { message: String },

    /// The response body could not be decoded into the expected shape
    #[error("Failed to decode response body: {source}")]
    Decode {
        #[from]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// HTTP status, when the server produced a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-supplied error message, when present in the response body
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Callback invoked when the server rejects the stored credential (401).
///
/// The facade clears the durable token itself, then hands the "what now"
/// decision to the composition root: the CLI tells the user to log in
/// again, a UI would navigate to its login view. Networking stays
/// ignorant of navigation.
pub type SessionExpiredHook = Arc<dyn Fn() + Send + Sync>;

/// API client configuration, fixed at construction
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL every request path is appended to
    pub base_url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// HTTP client facade shared by all domain API modules
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
    on_session_expired: Option<SessionExpiredHook>,
}

impl ApiClient {
    /// Build a client with a fixed base URL and timeout
    pub fn new(config: ApiClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ApiError::Config {
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
            on_session_expired: None,
        })
    }

    /// Install the session-expired callback invoked on every 401
    pub fn with_session_expired_hook(mut self, hook: SessionExpiredHook) -> Self {
        self.on_session_expired = Some(hook);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a request and return the response body directly.
    ///
    /// Status and headers are stripped on success; on failure the error is
    /// classified, logged, and propagated (never swallowed).
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&str, String)]>,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = Url::parse(&format!("{}{}", self.base_url, path)).map_err(|e| {
            error!(path, "Request configuration error: {}", e);
            ApiError::Config {
                message: e.to_string(),
            }
        })?;

        let mut builder = self.http.request(method.clone(), url);
        if let Some(query) = query {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        // Attach the bearer credential only when a token is stored
        if let Some(token) = self.tokens.load() {
            builder = builder.bearer_auth(token);
        }

        trace!(%method, path, "Issuing API request");

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) if e.is_builder() => {
                error!(%method, path, "Request configuration error: {}", e);
                return Err(ApiError::Config {
                    message: e.to_string(),
                });
            }
            Err(e) => {
                error!(%method, path, "Unable to reach the server: {}", e);
                return Err(ApiError::Transport { source: e });
            }
        };

        let status = response.status();
        let data = response
            .bytes()
            .await
            .map_err(|source| ApiError::Transport { source })?;

        if status.is_success() {
            // 204-style empty bodies decode as null
            if data.is_empty() {
                return Ok(Value::Null);
            }
            let body: Value = serde_json::from_slice(&data)?;
            return Ok(body);
        }

        let body: Value = serde_json::from_slice(&data).unwrap_or(Value::Null);
        let message = body
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string);

        match status {
            StatusCode::UNAUTHORIZED => {
                // Stored credential is expired or invalid: drop it and let
                // the composition root decide where to send the user.
                warn!(%method, path, "Authentication rejected, clearing stored token");
                if let Err(e) = self.tokens.clear() {
                    warn!("Failed to clear stored token: {}", e);
                }
                if let Some(hook) = &self.on_session_expired {
                    hook();
                }
            }
            StatusCode::FORBIDDEN => {
                error!(%method, path, "No permission to perform this operation");
            }
            StatusCode::NOT_FOUND => {
                error!(%method, path, "Requested resource does not exist");
            }
            StatusCode::INTERNAL_SERVER_ERROR => {
                error!(%method, path, "Server error");
            }
            _ => {
                error!(
                    %method,
                    path,
                    status = status.as_u16(),
                    "Request failed: {}",
                    message.as_deref().unwrap_or("no message")
                );
            }
        }

        Err(ApiError::Server {
            status: status.as_u16(),
            message,
            body,
        })
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::GET, path, None, None).await
    }

    pub async fn get_with_query(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, ApiError> {
        self.request(Method::GET, path, Some(query), None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.request(Method::POST, path, None, Some(body)).await
    }

    /// POST with an empty body (purchase, cancel, and friends)
    pub async fn post_empty(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::POST, path, None, None).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.request(Method::PUT, path, None, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::DELETE, path, None, None).await
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
