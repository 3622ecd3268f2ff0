//! Catalog Module
//!
//! The catalog service orchestrating store, cache, and image lifecycle.

mod service;

pub use service::{CacheHint, CatalogService};
