//! Shipping addresses.

use cartloom_core::AccountEid;

/// A user's saved shipping address.
#[derive(Debug, Clone)]
pub struct Address {
    pub user_eid: AccountEid,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
    pub phone: Option<String>,
}
