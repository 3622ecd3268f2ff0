//! Snapshot Cache Module
//!
//! Holds the last full product listing with a capture timestamp and a
//! freshness window. The cache is either empty or a complete snapshot;
//! there is no partial or per-key caching.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::models::Product;

// == Product Cache ==
/// Whole-list snapshot cache for the product catalog.
///
/// Freshness only gates the list path: `find_by_id` scans any present
/// snapshot regardless of age, and the caller falls through to the store
/// when the scan misses. Writes must call [`ProductCache::invalidate`] so
/// the next read re-fetches.
#[derive(Debug)]
pub struct ProductCache {
    /// Last fetched listing, None when invalidated or never populated
    snapshot: Option<Snapshot>,
    /// Maximum age for which the snapshot is served on the list path
    ttl: Duration,
}

#[derive(Debug, Clone)]
struct Snapshot {
    products: Vec<Product>,
    /// Capture timestamp (Unix milliseconds)
    captured_at: u64,
}

impl ProductCache {
    // == Constructor ==
    /// Creates an empty cache with the given freshness window.
    pub fn new(ttl: Duration) -> Self {
        Self { snapshot: None, ttl }
    }

    // == Get All ==
    /// Returns the cached listing and the remaining freshness window, or
    /// None when the cache is empty or the snapshot has aged past the TTL.
    pub fn get_all(&self) -> Option<(Vec<Product>, Duration)> {
        let snapshot = self.snapshot.as_ref()?;
        let remaining = self.remaining(snapshot);
        if remaining.is_zero() {
            return None;
        }
        Some((snapshot.products.clone(), remaining))
    }

    // == Put All ==
    /// Stores a complete listing and stamps the current time.
    pub fn put_all(&mut self, products: Vec<Product>) {
        self.snapshot = Some(Snapshot {
            products,
            captured_at: current_timestamp_ms(),
        });
    }

    // == Invalidate ==
    /// Clears the snapshot unconditionally.
    pub fn invalidate(&mut self) {
        self.snapshot = None;
    }

    // == Find By Id ==
    /// Linear scan of the current snapshot, if one is present.
    ///
    /// Deliberately ignores freshness; staleness only bounds the list path.
    /// Returns None both when the cache is empty and when the id is not in
    /// the snapshot; the caller queries the store in either case.
    pub fn find_by_id(&self, id: i64) -> Option<Product> {
        self.snapshot
            .as_ref()?
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    // == TTL Remaining ==
    /// Remaining freshness window, zero when the cache is empty or stale.
    pub fn ttl_remaining(&self) -> Duration {
        self.snapshot
            .as_ref()
            .map(|s| self.remaining(s))
            .unwrap_or(Duration::ZERO)
    }

    /// Returns true if a snapshot is present, fresh or not.
    #[allow(dead_code)]
    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    fn remaining(&self, snapshot: &Snapshot) -> Duration {
        let age_ms = current_timestamp_ms().saturating_sub(snapshot.captured_at);
        self.ttl.saturating_sub(Duration::from_millis(age_ms))
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
