//! API Module
//!
//! HTTP handlers and routing for the catalog REST API.
//!
//! # Endpoints
//! - `GET /products` - Full product listing (snapshot-cached)
//! - `POST /products` - Create a product (multipart form)
//! - `GET /products/:id` - Fetch one product
//! - `PUT /products/:id` - Update a product (multipart form)
//! - `DELETE /products/:id` - Delete a product
//! - `GET /health` - Health check endpoint
//! - `GET /images/*` - Static image files

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
