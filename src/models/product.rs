//! Product Model
//!
//! The catalog row type shared by the store gateway, cache, and API.

use serde::{Deserialize, Serialize};

/// A catalog product as stored in the `products` table.
///
/// The `image` field holds a bare filename inside the shared image
/// directory, never a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Identifier assigned by the store on insert
    pub id: i64,
    /// Product name
    pub name: String,
    /// Product description
    pub description: String,
    /// Unit price
    pub price: f64,
    /// Image filename, `placeholder.webp` when no upload exists
    pub image: String,
}

/// The writable product columns, without id or image.
///
/// The image filename travels separately because the update path only
/// overrides the stored name when a new file was actually uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub price: f64,
}
