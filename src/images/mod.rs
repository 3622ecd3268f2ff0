//! Images Module
//!
//! Lifecycle management for uploaded product image files.

mod lifecycle;

pub use lifecycle::{DeleteOutcome, ImageStore, PLACEHOLDER_IMAGE};
