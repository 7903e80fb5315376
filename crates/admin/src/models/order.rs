//! Product orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use cartloom_core::{AccountEid, OrderEid, OrderStatus};

/// An order, with the product snapshot embedded at purchase time.
///
/// The snapshot fields (`product_name`, `product_image`, `unit_price`) are
/// copies - later product edits must not rewrite order history.
#[derive(Debug, Clone)]
pub struct Order {
    pub eid: OrderEid,
    pub user_eid: AccountEid,
    pub vendor_eid: AccountEid,
    pub product_name: String,
    pub product_image: Option<String>,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub status: OrderStatus,
    pub storefront: String,
    pub created_at: DateTime<Utc>,
}
