//! Review repository.
//!
//! Reviews surface on the admin product detail view only; the reviewer name
//! comes from an outer join against the account table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cartloom_core::{AccountEid, ProductEid};

use super::RepositoryError;
use crate::models::Review;

/// Internal row type for joined review queries.
#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    product_eid: String,
    user_eid: String,
    reviewer_name: Option<String>,
    rating: i16,
    comment: String,
    created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Self {
            product_eid: ProductEid::new(row.product_eid),
            user_eid: AccountEid::new(row.user_eid),
            reviewer_name: row.reviewer_name,
            rating: row.rating,
            comment: row.comment,
            created_at: row.created_at,
        }
    }
}

/// Repository for review database operations.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All reviews on a product, newest first, with the reviewer joined in.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_product(
        &self,
        product_eid: &ProductEid,
    ) -> Result<Vec<Review>, RepositoryError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            "SELECT v.product_eid, v.user_eid, a.name AS reviewer_name, \
                    v.rating, v.comment, v.created_at \
             FROM marketplace.review v \
             LEFT JOIN marketplace.account a ON a.eid = v.user_eid \
             WHERE v.product_eid = $1 \
             ORDER BY v.created_at DESC",
        )
        .bind(product_eid.as_str())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
