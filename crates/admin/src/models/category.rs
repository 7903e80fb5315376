//! Storefront categories.

use chrono::{DateTime, Utc};

use cartloom_core::CategoryEid;

/// A storefront category.
///
/// `banner_image` is the signed read URL resolved after the banner object
/// landed in storage; a category row never exists without one.
#[derive(Debug, Clone)]
pub struct Category {
    pub eid: CategoryEid,
    pub name: String,
    pub banner_image: String,
    pub storefront: String,
    pub created_at: DateTime<Utc>,
}
