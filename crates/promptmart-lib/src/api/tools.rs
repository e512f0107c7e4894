//! AI tool listing and management endpoints

use crate::networking::{ApiClient, ApiError};
use serde_json::{Value, json};
use std::sync::Arc;

/// Tools endpoint wrapper
pub struct ToolsApi {
    client: Arc<ApiClient>,
}

impl ToolsApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// GET /tools
    pub async fn list(&self, params: &[(&str, String)]) -> Result<Value, ApiError> {
        if params.is_empty() {
            self.client.get("/tools").await
        } else {
            self.client.get_with_query("/tools", params).await
        }
    }

    /// GET /tools/:id
    pub async fn get(&self, id: &str) -> Result<Value, ApiError> {
        self.client.get(&format!("/tools/{}", id)).await
    }

    /// GET /tools/categories
    pub async fn categories(&self) -> Result<Value, ApiError> {
        self.client.get("/tools/categories").await
    }

    /// POST /tools (admin)
    pub async fn create(&self, tool: &Value) -> Result<Value, ApiError> {
        self.client.post("/tools", tool).await
    }

    /// PUT /tools/:id (admin)
    pub async fn update(&self, id: &str, tool: &Value) -> Result<Value, ApiError> {
        self.client.put(&format!("/tools/{}", id), tool).await
    }

    /// DELETE /tools/:id (admin)
    pub async fn delete(&self, id: &str) -> Result<Value, ApiError> {
        self.client.delete(&format!("/tools/{}", id)).await
    }

    /// POST /tools/:id/rate
    pub async fn rate(&self, id: &str, rating: u8) -> Result<Value, ApiError> {
        self.client
            .post(&format!("/tools/{}/rate", id), &json!({ "rating": rating }))
            .await
    }
}

#[cfg(test)]
mod tests {
    include!("tools.test.rs");
}
