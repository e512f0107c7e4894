//! Prompt marketplace endpoints

use crate::networking::{ApiClient, ApiError};
use serde_json::{Value, json};
use std::sync::Arc;

/// Prompts endpoint wrapper
pub struct PromptsApi {
    client: Arc<ApiClient>,
}

impl PromptsApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// GET /prompts
    pub async fn list(&self, params: &[(&str, String)]) -> Result<Value, ApiError> {
        if params.is_empty() {
            self.client.get("/prompts").await
        } else {
            self.client.get_with_query("/prompts", params).await
        }
    }

    /// GET /prompts/categories
    pub async fn categories(&self) -> Result<Value, ApiError> {
        self.client.get("/prompts/categories").await
    }

    /// GET /prompts/:id
    pub async fn get(&self, id: &str) -> Result<Value, ApiError> {
        self.client.get(&format!("/prompts/{}", id)).await
    }

    /// POST /prompts
    pub async fn create(&self, prompt: &Value) -> Result<Value, ApiError> {
        self.client.post("/prompts", prompt).await
    }

    /// PUT /prompts/:id
    pub async fn update(&self, id: &str, prompt: &Value) -> Result<Value, ApiError> {
        self.client.put(&format!("/prompts/{}", id), prompt).await
    }

    /// DELETE /prompts/:id
    pub async fn delete(&self, id: &str) -> Result<Value, ApiError> {
        self.client.delete(&format!("/prompts/{}", id)).await
    }

    /// POST /prompts/:id/purchase
    pub async fn purchase(&self, id: &str) -> Result<Value, ApiError> {
        self.client
            .post_empty(&format!("/prompts/{}/purchase", id))
            .await
    }

    /// GET /prompts/purchased
    pub async fn purchased(&self) -> Result<Value, ApiError> {
        self.client.get("/prompts/purchased").await
    }

    /// GET /prompts/my
    pub async fn mine(&self) -> Result<Value, ApiError> {
        self.client.get("/prompts/my").await
    }

    /// POST /prompts/:id/rate
    pub async fn rate(&self, id: &str, rating: u8) -> Result<Value, ApiError> {
        self.client
            .post(
                &format!("/prompts/{}/rate", id),
                &json!({ "rating": rating }),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    include!("prompts.test.rs");
}
