//! Cache Module
//!
//! Provides the in-memory whole-list snapshot cache for the product catalog.

mod snapshot;


// Re-export public types
pub use snapshot::{current_timestamp_ms, ProductCache};

// == Public Constants ==
/// Default freshness window for the product list snapshot.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3;
