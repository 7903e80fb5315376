//! Order repository, including the status-faceted detail queries.
//!
//! The faceted queries answer "what is this vendor/user currently handling,
//! and what already happened" in one round trip: two labeled subqueries over
//! the same indexed base filter, each independently sorted and paginated,
//! glued with `UNION ALL` and split back apart in process.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use cartloom_core::{AccountEid, OrderEid, OrderStatus};

use super::RepositoryError;
use crate::models::Order;
use crate::pagination::Page;
use crate::stats::{FacetLabel, Facets, MonthCount, YearWindow};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    eid: String,
    user_eid: String,
    vendor_eid: String,
    product_name: String,
    product_image: Option<String>,
    unit_price: Decimal,
    quantity: i32,
    status: String,
    storefront: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<OrderStatus>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order status in database: {e}"))
        })?;

        Ok(Self {
            eid: OrderEid::new(row.eid),
            user_eid: AccountEid::new(row.user_eid),
            vendor_eid: AccountEid::new(row.vendor_eid),
            product_name: row.product_name,
            product_image: row.product_image,
            unit_price: row.unit_price,
            quantity: row.quantity,
            status,
            storefront: row.storefront,
            created_at: row.created_at,
        })
    }
}

/// A labeled row from a faceted query.
#[derive(Debug, sqlx::FromRow)]
struct FacetedOrderRow {
    facet: String,
    #[sqlx(flatten)]
    order: OrderRow,
}

impl TryFrom<FacetedOrderRow> for (FacetLabel, Order) {
    type Error = RepositoryError;

    fn try_from(row: FacetedOrderRow) -> Result<Self, Self::Error> {
        let label = row.facet.parse::<FacetLabel>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid facet label: {e}"))
        })?;
        Ok((label, row.order.try_into()?))
    }
}

const ORDER_COLUMNS: &str = "eid, user_eid, vendor_eid, product_name, product_image, \
     unit_price, quantity, status, storefront, created_at";

// =============================================================================
// Repository
// =============================================================================

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Count orders on a storefront.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_for_storefront(&self, storefront: &str) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM marketplace.product_order WHERE storefront = $1",
        )
        .bind(storefront)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Storefront orders grouped by creation month within one calendar year.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn monthly_orders(
        &self,
        storefront: &str,
        window: YearWindow,
    ) -> Result<Vec<MonthCount>, RepositoryError> {
        let rows = sqlx::query_as::<_, MonthCount>(
            "SELECT CAST(EXTRACT(MONTH FROM created_at) AS INTEGER) AS month, \
                    COUNT(*) AS count \
             FROM marketplace.product_order \
             WHERE storefront = $1 AND created_at >= $2 AND created_at <= $3 \
             GROUP BY 1 \
             ORDER BY 1",
        )
        .bind(storefront)
        .bind(window.start)
        .bind(window.end)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// A vendor's orders, faceted by status with independent pagination.
    ///
    /// `active` holds orders still `pending`, paged by `active_page`;
    /// `history` holds everything else, paged by `history_page`. Both facets
    /// sort newest first over the post-filter set before their own skip/limit.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn facets_for_vendor(
        &self,
        vendor_eid: &AccountEid,
        storefront: &str,
        active_page: Page,
        history_page: Page,
    ) -> Result<Facets<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, FacetedOrderRow>(&format!(
            "SELECT * FROM ( \
                 SELECT 'active' AS facet, {ORDER_COLUMNS} \
                 FROM marketplace.product_order \
                 WHERE vendor_eid = $1 AND storefront = $2 AND status = 'pending' \
                 ORDER BY created_at DESC \
                 OFFSET $3 LIMIT $4 \
             ) AS active_facet \
             UNION ALL \
             SELECT * FROM ( \
                 SELECT 'history' AS facet, {ORDER_COLUMNS} \
                 FROM marketplace.product_order \
                 WHERE vendor_eid = $1 AND storefront = $2 AND status <> 'pending' \
                 ORDER BY created_at DESC \
                 OFFSET $5 LIMIT $6 \
             ) AS history_facet \
             ORDER BY facet, created_at DESC"
        ))
        .bind(vendor_eid.as_str())
        .bind(storefront)
        .bind(active_page.offset())
        .bind(active_page.limit())
        .bind(history_page.offset())
        .bind(history_page.limit())
        .fetch_all(self.pool)
        .await?;

        let labeled = rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Facets::partition(labeled))
    }

    /// A user's orders, faceted by status without pagination.
    ///
    /// The user detail view shows the complete order history, so neither
    /// facet takes a page parameter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn facets_for_user(
        &self,
        user_eid: &AccountEid,
        storefront: &str,
    ) -> Result<Facets<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, FacetedOrderRow>(&format!(
            "SELECT CASE WHEN status = 'pending' THEN 'active' ELSE 'history' END AS facet, \
                    {ORDER_COLUMNS} \
             FROM marketplace.product_order \
             WHERE user_eid = $1 AND storefront = $2 \
             ORDER BY 1, created_at DESC"
        ))
        .bind(user_eid.as_str())
        .bind(storefront)
        .fetch_all(self.pool)
        .await?;

        let labeled = rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Facets::partition(labeled))
    }
}
