//! SQLite Store Module
//!
//! sqlx-backed implementation of the product store gateway.

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::error::Result;
use crate::models::{Product, ProductFields};
use crate::store::ProductStore;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    price REAL NOT NULL,
    image TEXT NOT NULL DEFAULT 'placeholder.webp'
)";

// == SQLite Product Store ==
/// Product store backed by a `sqlx::SqlitePool`.
#[derive(Debug, Clone)]
pub struct SqliteProductStore {
    pool: SqlitePool,
}

impl SqliteProductStore {
    /// Wraps an existing pool. The schema is not touched; call
    /// [`SqliteProductStore::init_schema`] if the table may not exist yet.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connects to the database and bootstraps the schema.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new().connect(database_url).await?;
        let store = Self::new(pool);
        store.init_schema().await?;
        Ok(store)
    }

    /// Creates the `products` table when missing.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ProductStore for SqliteProductStore {
    async fn select_all(&self) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, image FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    async fn select_by_id(&self, id: i64) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, image FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    async fn insert(&self, fields: &ProductFields, image: &str) -> Result<i64> {
        let result =
            sqlx::query("INSERT INTO products (name, description, price, image) VALUES (?, ?, ?, ?)")
                .bind(&fields.name)
                .bind(&fields.description)
                .bind(fields.price)
                .bind(image)
                .execute(&self.pool)
                .await?;
        Ok(result.last_insert_rowid())
    }

    async fn update(&self, id: i64, fields: &ProductFields, image: Option<&str>) -> Result<u64> {
        // COALESCE keeps the stored image name when no new file was uploaded
        let result = sqlx::query(
            "UPDATE products SET name = ?, description = ?, price = ?, image = COALESCE(?, image) WHERE id = ?",
        )
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(image)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
