//! Order lifecycle and payment query endpoints

use crate::networking::{ApiClient, ApiError};
use serde_json::Value;
use std::sync::Arc;

/// Payment endpoint wrapper
pub struct PaymentApi {
    client: Arc<ApiClient>,
}

impl PaymentApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// POST /payment/create-order
    pub async fn create_order(&self, order: &Value) -> Result<Value, ApiError> {
        self.client.post("/payment/create-order", order).await
    }

    /// GET /payment/status/:id
    pub async fn status(&self, order_id: &str) -> Result<Value, ApiError> {
        self.client
            .get(&format!("/payment/status/{}", order_id))
            .await
    }

    /// GET /payment/methods
    pub async fn methods(&self) -> Result<Value, ApiError> {
        self.client.get("/payment/methods").await
    }

    /// GET /payment/orders
    pub async fn orders(&self, params: &[(&str, String)]) -> Result<Value, ApiError> {
        if params.is_empty() {
            self.client.get("/payment/orders").await
        } else {
            self.client.get_with_query("/payment/orders", params).await
        }
    }

    /// POST /payment/cancel/:id
    pub async fn cancel(&self, order_id: &str) -> Result<Value, ApiError> {
        self.client
            .post_empty(&format!("/payment/cancel/{}", order_id))
            .await
    }

    /// POST /payment/refund/:id
    pub async fn refund(&self, order_id: &str, details: &Value) -> Result<Value, ApiError> {
        self.client
            .post(&format!("/payment/refund/{}", order_id), details)
            .await
    }
}

#[cfg(test)]
mod tests {
    include!("payment.test.rs");
}
