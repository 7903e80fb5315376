//! Category repository.
//!
//! Categories are the one entity this layer both creates and deletes. Every
//! query is scoped to a storefront partition, and the insert only ever runs
//! after the banner image resolved to a durable URL.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cartloom_core::CategoryEid;

use super::{RepositoryError, map_unique_violation};
use crate::models::Category;
use crate::pagination::Page;

/// Internal row type for `PostgreSQL` category queries.
#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    eid: String,
    name: String,
    banner_image: String,
    storefront: String,
    created_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            eid: CategoryEid::new(row.eid),
            name: row.name,
            banner_image: row.banner_image,
            storefront: row.storefront,
            created_at: row.created_at,
        }
    }
}

/// A category ready to persist: id minted, banner URL already resolved.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub eid: CategoryEid,
    pub name: String,
    pub banner_image: String,
    pub storefront: String,
}

const CATEGORY_COLUMNS: &str = "eid, name, banner_image, storefront, created_at";

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// One page of a storefront's categories, alphabetical by name.
    ///
    /// Categories are the one list view that does not sort by creation time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        storefront: &str,
        page: Page,
    ) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM marketplace.category \
             WHERE storefront = $1 \
             ORDER BY name ASC \
             OFFSET $2 LIMIT $3"
        ))
        .bind(storefront)
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Persist a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the external id or name is
    /// already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, category: NewCategory) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "INSERT INTO marketplace.category (eid, name, banner_image, storefront) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(category.eid.as_str())
        .bind(&category.name)
        .bind(&category.banner_image)
        .bind(&category.storefront)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "category already exists"))?;

        Ok(row.into())
    }

    /// Delete a category by external id, scoped to its storefront.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such category exists on this
    /// storefront.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, storefront: &str, eid: &CategoryEid) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "DELETE FROM marketplace.category WHERE storefront = $1 AND eid = $2",
        )
        .bind(storefront)
        .bind(eid.as_str())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
