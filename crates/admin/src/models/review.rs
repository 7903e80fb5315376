//! Product reviews.

use chrono::{DateTime, Utc};

use cartloom_core::{AccountEid, ProductEid};

/// A review left on a product. Shown on the admin product detail view.
#[derive(Debug, Clone)]
pub struct Review {
    pub product_eid: ProductEid,
    pub user_eid: AccountEid,
    pub reviewer_name: Option<String>,
    pub rating: i16,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}
