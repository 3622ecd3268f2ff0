//! Response DTOs for the catalog API
//!
//! Defines the structure of outgoing HTTP response bodies. Product payloads
//! are serialized directly from [`crate::models::Product`].

use serde::Serialize;

/// Response body for the update operation (PUT /products/:id)
#[derive(Debug, Clone, Serialize)]
pub struct UpdateResponse {
    /// Success message
    pub message: String,
    /// The id of the updated product
    pub id: i64,
}

impl UpdateResponse {
    /// Creates a new UpdateResponse
    pub fn new(id: i64) -> Self {
        Self {
            message: format!("Product {} updated successfully", id),
            id,
        }
    }
}

/// Response body for the delete operation (DELETE /products/:id)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The id of the deleted product
    pub id: i64,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(id: i64) -> Self {
        Self {
            message: format!("Product {} deleted successfully", id),
            id,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
