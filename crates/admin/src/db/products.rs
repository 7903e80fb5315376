//! Product repository.
//!
//! Admin views only ever read products scoped to a vendor external id and the
//! deployment's storefront partition; the `verified` cascade lives with the
//! vendor transition in [`super::accounts`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use cartloom_core::{AccountEid, ProductEid};

use super::RepositoryError;
use crate::models::Product;
use crate::pagination::Page;

/// Internal row type for `PostgreSQL` product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    eid: String,
    vendor_eid: String,
    name: String,
    price: Decimal,
    image_url: Option<String>,
    verified: bool,
    storefront: String,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            eid: ProductEid::new(row.eid),
            vendor_eid: AccountEid::new(row.vendor_eid),
            name: row.name,
            price: row.price,
            image_url: row.image_url,
            verified: row.verified,
            storefront: row.storefront,
            created_at: row.created_at,
        }
    }
}

const PRODUCT_COLUMNS: &str =
    "eid, vendor_eid, name, price, image_url, verified, storefront, created_at";

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// One page of a vendor's products on a storefront, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_vendor(
        &self,
        vendor_eid: &AccountEid,
        storefront: &str,
        page: Page,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM marketplace.product \
             WHERE vendor_eid = $1 AND storefront = $2 \
             ORDER BY created_at DESC \
             OFFSET $3 LIMIT $4"
        ))
        .bind(vendor_eid.as_str())
        .bind(storefront)
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// A single product, scoped to its vendor and storefront.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_vendor(
        &self,
        vendor_eid: &AccountEid,
        product_eid: &ProductEid,
        storefront: &str,
    ) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM marketplace.product \
             WHERE vendor_eid = $1 AND eid = $2 AND storefront = $3"
        ))
        .bind(vendor_eid.as_str())
        .bind(product_eid.as_str())
        .bind(storefront)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Count verified products on a storefront.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_verified(&self, storefront: &str) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM marketplace.product \
             WHERE verified = TRUE AND storefront = $1",
        )
        .bind(storefront)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }
}
