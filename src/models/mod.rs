//! Request and Response models for the catalog API
//!
//! This module defines the product row type and the DTOs used for
//! serializing/deserializing HTTP request and response bodies.

pub mod product;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use product::{Product, ProductFields};
pub use requests::{ImageUpload, ProductForm};
pub use responses::{DeleteResponse, ErrorResponse, HealthResponse, UpdateResponse};
