//! Account and identity endpoints

use crate::networking::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Role marker granting elevated capability.
///
/// Checked client-side only; the server enforces actual authorization.
pub const ADMIN_ROLE: &str = "admin";

/// Current user identity as returned by the server.
///
/// The profile is an open record; only `role` is load-bearing on the
/// client, everything else passes through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub role: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }

    /// Read a pass-through profile field
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// Response body from register/login
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Auth endpoint wrapper
pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// POST /users/register
    pub async fn register(&self, payload: &Value) -> Result<AuthResponse, ApiError> {
        let body = self.client.post("/users/register", payload).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// POST /users/login
    pub async fn login(&self, credentials: &Value) -> Result<AuthResponse, ApiError> {
        let body = self.client.post("/users/login", credentials).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// GET /users/me
    pub async fn get_current_user(&self) -> Result<UserProfile, ApiError> {
        let body = self.client.get("/users/me").await?;
        Ok(serde_json::from_value(unwrap_user(body))?)
    }

    /// PUT /users/profile
    pub async fn update_profile(&self, payload: &Value) -> Result<UserProfile, ApiError> {
        let body = self.client.put("/users/profile", payload).await?;
        Ok(serde_json::from_value(unwrap_user(body))?)
    }

    /// PUT /users/password
    pub async fn change_password(&self, payload: &Value) -> Result<Value, ApiError> {
        self.client.put("/users/password", payload).await
    }
}

/// Identity endpoints wrap the profile in a `{user: ...}` envelope; accept
/// a bare profile as well.
fn unwrap_user(body: Value) -> Value {
    if let Some(user) = body.get("user") {
        return user.clone();
    }
    body
}

#[cfg(test)]
mod tests {
    include!("auth.test.rs");
}
