//! External service integrations for the admin panel.
//!
//! # Services
//!
//! - `images` - S3-backed category banner storage

pub mod images;

pub use images::{ImageStore, ImageStoreError, StoredBanner};
