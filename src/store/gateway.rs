//! Store Gateway Module
//!
//! The seam between the catalog and the relational backing store. The
//! catalog service only speaks this trait, so tests can wrap or replace the
//! store without touching the orchestration logic.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Product, ProductFields};

/// Query interface over the `products` table.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Fetches all products ordered by id.
    async fn select_all(&self) -> Result<Vec<Product>>;

    /// Fetches a single product, or None when the id has no row.
    async fn select_by_id(&self, id: i64) -> Result<Option<Product>>;

    /// Inserts a new row and returns the generated id.
    async fn insert(&self, fields: &ProductFields, image: &str) -> Result<i64>;

    /// Applies new field values to a row, overriding the stored image name
    /// only when `image` is present. Returns the affected row count.
    async fn update(&self, id: i64, fields: &ProductFields, image: Option<&str>) -> Result<u64>;

    /// Deletes a row, returning the affected count (0 when the id is absent).
    async fn delete(&self, id: i64) -> Result<u64>;
}
