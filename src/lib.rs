//! Catalog Server - A product catalog REST service
//!
//! Provides CRUD over a relational product table with a TTL snapshot cache
//! for the listing and lifecycle management for uploaded image files.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod images;
pub mod models;
pub mod store;

pub use api::AppState;
pub use catalog::CatalogService;
pub use config::Config;
