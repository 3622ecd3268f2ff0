//! Image Lifecycle Module
//!
//! Persists uploaded product images under stable generated names and removes
//! superseded or orphaned files. All deletions are best-effort: the outcome
//! is observed and logged, but a filesystem failure never aborts the catalog
//! operation that triggered it.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::ImageUpload;

// == Public Constants ==
/// Sentinel filename for products without an uploaded image.
/// Never written and never deleted by the lifecycle manager.
pub const PLACEHOLDER_IMAGE: &str = "placeholder.webp";

// == Delete Outcome ==
/// Observable result of a best-effort image deletion.
#[derive(Debug)]
pub enum DeleteOutcome {
    /// The file existed and was deleted
    Removed,
    /// No file with that name existed
    Absent,
    /// The name was the placeholder, which is exempt from deletion
    Retained,
    /// The filesystem refused the deletion
    Failed(std::io::Error),
}

// == Image Store ==
/// Manages product image files in a single shared directory.
#[derive(Debug, Clone)]
pub struct ImageStore {
    /// Shared image directory, also exposed by the static file route
    dir: PathBuf,
    /// Per-process sequence disambiguating same-millisecond uploads
    counter: Arc<AtomicU64>,
}

impl ImageStore {
    // == Constructor ==
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The shared image directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the image directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    // == Store Upload ==
    /// Persists an uploaded file under a generated name and returns the name.
    ///
    /// With no upload, returns the placeholder name without touching the
    /// filesystem. A failed write is logged and also falls back to the
    /// placeholder so the catalog row never references a file that was not
    /// persisted.
    pub async fn store_upload(&self, upload: Option<&ImageUpload>) -> String {
        let Some(upload) = upload else {
            return PLACEHOLDER_IMAGE.to_string();
        };

        let name = self.assign_name(&upload.original_name);
        match tokio::fs::write(self.dir.join(&name), &upload.bytes).await {
            Ok(()) => {
                debug!(file = %name, size = upload.bytes.len(), "Stored uploaded image");
                name
            }
            Err(err) => {
                warn!(file = %name, error = %err, "Failed to write uploaded image");
                PLACEHOLDER_IMAGE.to_string()
            }
        }
    }

    // == Replace ==
    /// Deletes the superseded image after an update stored a new one.
    ///
    /// Only acts when an upload actually happened (`new` is present) and the
    /// row held a previous name; returns None when no deletion was attempted.
    pub async fn replace(&self, old: Option<&str>, new: Option<&str>) -> Option<DeleteOutcome> {
        match (old, new) {
            (Some(old), Some(_)) => Some(self.remove(old).await),
            _ => None,
        }
    }

    // == Remove ==
    /// Best-effort deletion of an image file, unless it is the placeholder.
    ///
    /// A stored name may reference a file that no longer exists; that is an
    /// `Absent` outcome, not an error.
    pub async fn remove(&self, name: &str) -> DeleteOutcome {
        if name == PLACEHOLDER_IMAGE {
            return DeleteOutcome::Retained;
        }

        match tokio::fs::remove_file(self.dir.join(name)).await {
            Ok(()) => {
                debug!(file = %name, "Removed image");
                DeleteOutcome::Removed
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => DeleteOutcome::Absent,
            Err(err) => {
                warn!(file = %name, error = %err, "Failed to remove image");
                DeleteOutcome::Failed(err)
            }
        }
    }

    /// Builds a collision-resistant filename from the upload timestamp, a
    /// per-process sequence number, and the original extension.
    fn assign_name(&self, original_name: &str) -> String {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        format!("{}-{}{}", chrono::Utc::now().timestamp_millis(), seq, ext)
    }
}
