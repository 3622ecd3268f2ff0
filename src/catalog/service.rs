//! Catalog Service Module
//!
//! Orchestrates the store gateway, snapshot cache, and image lifecycle into
//! the list/get/create/update/delete operations. Every write invalidates the
//! snapshot after the store accepted it, so the next read always re-fetches.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::cache::ProductCache;
use crate::error::{CatalogError, Result};
use crate::images::ImageStore;
use crate::models::{Product, ProductForm};
use crate::store::ProductStore;

// == Cache Hint ==
/// Advisory client-cacheability window, surfaced as a `Cache-Control` header.
///
/// Bounded to the remaining freshness of the served snapshot; not a
/// correctness guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheHint {
    max_age_secs: u64,
}

impl CacheHint {
    /// Builds a hint from a freshness window, rounded up to whole seconds.
    pub fn new(window: Duration) -> Self {
        Self {
            max_age_secs: (window.as_millis() as u64 + 999) / 1000,
        }
    }

    /// Advertised maximum age in seconds.
    #[allow(dead_code)]
    pub fn max_age_secs(&self) -> u64 {
        self.max_age_secs
    }

    /// Renders the `Cache-Control` header value.
    pub fn header_value(&self) -> String {
        format!("public, max-age={}", self.max_age_secs)
    }
}

// == Catalog Service ==
/// The product catalog operations behind the HTTP surface.
///
/// Cheap to clone; the store, cache, and image directory are shared.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn ProductStore>,
    cache: Arc<RwLock<ProductCache>>,
    images: ImageStore,
    ttl: Duration,
}

impl CatalogService {
    // == Constructor ==
    /// Creates a service with an empty cache and the given freshness window.
    pub fn new(store: Arc<dyn ProductStore>, images: ImageStore, cache_ttl: Duration) -> Self {
        Self {
            store,
            cache: Arc::new(RwLock::new(ProductCache::new(cache_ttl))),
            images,
            ttl: cache_ttl,
        }
    }

    /// The shared image directory, for the static file route.
    pub fn image_dir(&self) -> &Path {
        self.images.dir()
    }

    // == List ==
    /// Returns all products, served from the snapshot while it is fresh.
    ///
    /// On a miss the full listing is fetched from the store and cached. Two
    /// concurrent misses may both fetch and repopulate; last write wins.
    pub async fn list(&self) -> Result<(Vec<Product>, CacheHint)> {
        {
            let cache = self.cache.read().await;
            if let Some((products, remaining)) = cache.get_all() {
                return Ok((products, CacheHint::new(remaining)));
            }
        }

        let products = self.store.select_all().await?;
        let mut cache = self.cache.write().await;
        cache.put_all(products.clone());
        Ok((products, CacheHint::new(self.ttl)))
    }

    // == Get ==
    /// Returns a single product by id.
    ///
    /// A present snapshot is scanned first, regardless of its age; only when
    /// the scan misses does the store get queried.
    pub async fn get(&self, id: i64) -> Result<(Product, CacheHint)> {
        {
            let cache = self.cache.read().await;
            if let Some(product) = cache.find_by_id(id) {
                return Ok((product, CacheHint::new(cache.ttl_remaining())));
            }
        }

        match self.store.select_by_id(id).await? {
            Some(product) => Ok((product, CacheHint::new(self.ttl))),
            None => Err(CatalogError::NotFound(id)),
        }
    }

    // == Create ==
    /// Stores an optional upload, inserts the row, and invalidates the cache
    /// so the next read sees the store-assigned id and ordering.
    pub async fn create(&self, form: ProductForm) -> Result<Product> {
        let image = self.images.store_upload(form.image.as_ref()).await;
        let fields = form.fields();

        let id = self.store.insert(&fields, &image).await?;
        self.cache.write().await.invalidate();

        Ok(Product {
            id,
            name: fields.name,
            description: fields.description,
            price: fields.price,
            image,
        })
    }

    // == Update ==
    /// Applies new field values and an optional replacement image.
    ///
    /// The current image name is read before anything is written, the
    /// superseded file is deleted only when a new upload actually happened,
    /// and the stored name is kept otherwise (COALESCE merge in the store).
    pub async fn update(&self, id: i64, form: ProductForm) -> Result<()> {
        let current = self
            .store
            .select_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        let new_image = match form.image.as_ref() {
            Some(upload) => Some(self.images.store_upload(Some(upload)).await),
            None => None,
        };
        self.images
            .replace(Some(current.image.as_str()), new_image.as_deref())
            .await;

        self.store
            .update(id, &form.fields(), new_image.as_deref())
            .await?;
        self.cache.write().await.invalidate();
        Ok(())
    }

    // == Delete ==
    /// Removes the product's image file and row, then invalidates the cache.
    ///
    /// Deleting an id with no row is tolerated: zero affected rows is not an
    /// error at this layer.
    pub async fn delete(&self, id: i64) -> Result<()> {
        if let Some(product) = self.store.select_by_id(id).await? {
            self.images.remove(&product.image).await;
        }

        self.store.delete(id).await?;
        self.cache.write().await.invalidate();
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;
    use tokio::time::sleep;

    use crate::images::PLACEHOLDER_IMAGE;
    use crate::models::{ImageUpload, ProductFields};
    use crate::store::SqliteProductStore;
    use async_trait::async_trait;
    use sqlx::sqlite::SqlitePoolOptions;

    /// Store wrapper counting gateway calls, for cache-hit assertions.
    struct CountingStore {
        inner: SqliteProductStore,
        select_all_calls: AtomicUsize,
        select_by_id_calls: AtomicUsize,
    }

    #[async_trait]
    impl ProductStore for CountingStore {
        async fn select_all(&self) -> crate::error::Result<Vec<Product>> {
            self.select_all_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.select_all().await
        }

        async fn select_by_id(&self, id: i64) -> crate::error::Result<Option<Product>> {
            self.select_by_id_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.select_by_id(id).await
        }

        async fn insert(&self, fields: &ProductFields, image: &str) -> crate::error::Result<i64> {
            self.inner.insert(fields, image).await
        }

        async fn update(
            &self,
            id: i64,
            fields: &ProductFields,
            image: Option<&str>,
        ) -> crate::error::Result<u64> {
            self.inner.update(id, fields, image).await
        }

        async fn delete(&self, id: i64) -> crate::error::Result<u64> {
            self.inner.delete(id).await
        }
    }

    async fn test_service(ttl: Duration) -> (CatalogService, Arc<CountingStore>, TempDir) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let inner = SqliteProductStore::new(pool);
        inner.init_schema().await.unwrap();

        let store = Arc::new(CountingStore {
            inner,
            select_all_calls: AtomicUsize::new(0),
            select_by_id_calls: AtomicUsize::new(0),
        });

        let tmp = tempfile::tempdir().unwrap();
        let service = CatalogService::new(store.clone(), ImageStore::new(tmp.path()), ttl);
        (service, store, tmp)
    }

    fn form(name: &str, price: f64, image: Option<(&str, &[u8])>) -> ProductForm {
        ProductForm {
            name: name.to_string(),
            description: format!("{} description", name),
            price,
            image: image.map(|(original_name, bytes)| ImageUpload {
                original_name: original_name.to_string(),
                bytes: bytes.to_vec(),
            }),
        }
    }

    #[tokio::test]
    async fn test_second_list_is_served_from_cache() {
        let (service, store, _tmp) = test_service(Duration::from_secs(3)).await;
        service.create(form("a", 1.0, None)).await.unwrap();

        let (first, _) = service.list().await.unwrap();
        let (second, _) = service.list().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.select_all_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_list_refetches_after_ttl() {
        let (service, store, _tmp) = test_service(Duration::from_millis(100)).await;

        service.list().await.unwrap();
        sleep(Duration::from_millis(250)).await;
        service.list().await.unwrap();

        assert_eq!(store.select_all_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_list_after_write_reflects_the_write() {
        let (service, store, _tmp) = test_service(Duration::from_secs(3)).await;

        let (before, _) = service.list().await.unwrap();
        assert!(before.is_empty());

        let created = service.create(form("a", 1.0, None)).await.unwrap();
        let (after, _) = service.list().await.unwrap();

        assert_eq!(after.len(), 1);
        assert_eq!(after[0].id, created.id);
        assert_eq!(store.select_all_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_list_hint_is_bounded_by_remaining_window() {
        let (service, _store, _tmp) = test_service(Duration::from_secs(3)).await;

        let (_, refill_hint) = service.list().await.unwrap();
        assert_eq!(refill_hint.max_age_secs(), 3);

        let (_, hit_hint) = service.list().await.unwrap();
        assert!(hit_hint.max_age_secs() <= 3);
        assert!(hit_hint.max_age_secs() >= 1);
    }

    #[tokio::test]
    async fn test_get_served_from_snapshot() {
        let (service, store, _tmp) = test_service(Duration::from_secs(3)).await;
        let created = service.create(form("a", 1.0, None)).await.unwrap();
        service.list().await.unwrap();

        let (product, _) = service.get(created.id).await.unwrap();

        assert_eq!(product.name, "a");
        assert_eq!(store.select_by_id_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_get_scans_even_a_stale_snapshot() {
        let (service, store, _tmp) = test_service(Duration::from_millis(100)).await;
        let created = service.create(form("a", 1.0, None)).await.unwrap();
        service.list().await.unwrap();
        sleep(Duration::from_millis(250)).await;

        let (product, _) = service.get(created.id).await.unwrap();

        assert_eq!(product.id, created.id);
        assert_eq!(store.select_by_id_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_get_falls_back_to_store() {
        let (service, store, _tmp) = test_service(Duration::from_secs(3)).await;
        let created = service.create(form("a", 1.0, None)).await.unwrap();

        // Cache was invalidated by the create, so the store answers
        let (product, _) = service.get(created.id).await.unwrap();

        assert_eq!(product.id, created.id);
        assert_eq!(store.select_by_id_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let (service, _store, _tmp) = test_service(Duration::from_secs(3)).await;

        let result = service.get(99).await;

        assert!(matches!(result, Err(CatalogError::NotFound(99))));
    }

    #[tokio::test]
    async fn test_create_without_upload_uses_placeholder() {
        let (service, _store, tmp) = test_service(Duration::from_secs(3)).await;

        let product = service.create(form("a", 9.99, None)).await.unwrap();

        assert_eq!(product.image, PLACEHOLDER_IMAGE);
        let mut entries = tokio::fs::read_dir(tmp.path()).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_with_upload_writes_file() {
        let (service, _store, tmp) = test_service(Duration::from_secs(3)).await;

        let product = service
            .create(form("a", 9.99, Some(("photo.webp", b"imagedata"))))
            .await
            .unwrap();

        assert_ne!(product.image, PLACEHOLDER_IMAGE);
        assert!(product.image.ends_with(".webp"));
        assert!(tmp.path().join(&product.image).exists());
    }

    #[tokio::test]
    async fn test_update_with_upload_replaces_old_file() {
        let (service, _store, tmp) = test_service(Duration::from_secs(3)).await;
        let created = service
            .create(form("a", 1.0, Some(("first.webp", b"one"))))
            .await
            .unwrap();

        service
            .update(created.id, form("a2", 2.0, Some(("second.webp", b"two"))))
            .await
            .unwrap();

        let (updated, _) = service.get(created.id).await.unwrap();
        assert_ne!(updated.image, created.image);
        assert!(!tmp.path().join(&created.image).exists());
        assert!(tmp.path().join(&updated.image).exists());
    }

    #[tokio::test]
    async fn test_update_without_upload_keeps_image() {
        let (service, _store, tmp) = test_service(Duration::from_secs(3)).await;
        let created = service
            .create(form("a", 1.0, Some(("first.webp", b"one"))))
            .await
            .unwrap();

        service.update(created.id, form("a2", 2.0, None)).await.unwrap();

        let (updated, _) = service.get(created.id).await.unwrap();
        assert_eq!(updated.name, "a2");
        assert_eq!(updated.image, created.image);
        assert!(tmp.path().join(&created.image).exists());
    }

    #[tokio::test]
    async fn test_update_does_not_delete_placeholder() {
        let (service, _store, tmp) = test_service(Duration::from_secs(3)).await;
        tokio::fs::write(tmp.path().join(PLACEHOLDER_IMAGE), b"shared")
            .await
            .unwrap();
        let created = service.create(form("a", 1.0, None)).await.unwrap();

        service
            .update(created.id, form("a2", 2.0, Some(("new.webp", b"two"))))
            .await
            .unwrap();

        assert!(tmp.path().join(PLACEHOLDER_IMAGE).exists());
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let (service, _store, _tmp) = test_service(Duration::from_secs(3)).await;

        let result = service.update(42, form("a", 1.0, None)).await;

        assert!(matches!(result, Err(CatalogError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_delete_removes_row_and_image() {
        let (service, _store, tmp) = test_service(Duration::from_secs(3)).await;
        let created = service
            .create(form("a", 1.0, Some(("photo.webp", b"data"))))
            .await
            .unwrap();

        service.delete(created.id).await.unwrap();

        assert!(!tmp.path().join(&created.image).exists());
        assert!(matches!(
            service.get(created.id).await,
            Err(CatalogError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_keeps_placeholder_file() {
        let (service, _store, tmp) = test_service(Duration::from_secs(3)).await;
        tokio::fs::write(tmp.path().join(PLACEHOLDER_IMAGE), b"shared")
            .await
            .unwrap();
        let created = service.create(form("a", 1.0, None)).await.unwrap();

        service.delete(created.id).await.unwrap();

        assert!(tmp.path().join(PLACEHOLDER_IMAGE).exists());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_tolerated() {
        let (service, _store, _tmp) = test_service(Duration::from_secs(3)).await;

        assert!(service.delete(42).await.is_ok());
    }

    #[test]
    fn test_cache_hint_rounds_up() {
        assert_eq!(CacheHint::new(Duration::from_secs(3)).max_age_secs(), 3);
        assert_eq!(CacheHint::new(Duration::from_millis(2100)).max_age_secs(), 3);
        assert_eq!(CacheHint::new(Duration::from_millis(900)).max_age_secs(), 1);
        assert_eq!(CacheHint::new(Duration::ZERO).max_age_secs(), 0);
    }

    #[test]
    fn test_cache_hint_header_value() {
        let hint = CacheHint::new(Duration::from_secs(3));
        assert_eq!(hint.header_value(), "public, max-age=3");
    }
}
