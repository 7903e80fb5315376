//! Vendor products.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use cartloom_core::{AccountEid, ProductEid};

/// A product listed by a vendor.
///
/// `verified` mirrors the owning vendor's verification state and is flipped
/// in bulk whenever that state changes. `storefront` partitions products
/// between the two category contexts sharing one database.
#[derive(Debug, Clone)]
pub struct Product {
    pub eid: ProductEid,
    pub vendor_eid: AccountEid,
    pub name: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub verified: bool,
    pub storefront: String,
    pub created_at: DateTime<Utc>,
}
