//! Account repository: shoppers and vendors.
//!
//! Vendors and shoppers share the `marketplace.account` table, discriminated
//! by `role`. The vendor verification decision runs both of its writes (the
//! status change and the product `verified` cascade) inside one transaction.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cartloom_core::{AccountEid, Email, Role, VerificationDecision, VerificationStatus};

use super::RepositoryError;
use crate::models::Account;
use crate::pagination::Page;
use crate::stats::{MonthCount, YearWindow};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` account queries.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    eid: String,
    role: String,
    name: String,
    email: String,
    account_verification: String,
    account_verification_at: Option<DateTime<Utc>>,
    verify_documents: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = RepositoryError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let role = row.role.parse::<Role>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid role in database: {e}"))
        })?;
        let verification = row.account_verification.parse::<VerificationStatus>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid verification status in database: {e}"))
        })?;
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            eid: AccountEid::new(row.eid),
            role,
            name: row.name,
            email,
            verification,
            verification_at: row.account_verification_at,
            verify_documents: row.verify_documents,
            created_at: row.created_at,
        })
    }
}

const ACCOUNT_COLUMNS: &str = "eid, role, name, email, account_verification, \
     account_verification_at, verify_documents, created_at";

/// Result of applying an admin verification decision to a vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The vendor was in `requested`; status and product flags were updated.
    Applied {
        /// Products whose `verified` flag was rewritten by the cascade.
        products_updated: u64,
    },
    /// The vendor exists but was not in `requested`; nothing changed.
    NotRequested,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for account database operations.
pub struct AccountRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AccountRepository<'a> {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get any account by its external id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_eid(&self, eid: &AccountEid) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM marketplace.account WHERE eid = $1"
        ))
        .bind(eid.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a vendor by its external id.
    ///
    /// Returns `None` when the id resolves to a non-vendor account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_vendor(&self, eid: &AccountEid) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM marketplace.account \
             WHERE eid = $1 AND role = 'vendor'"
        ))
        .bind(eid.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// One page of vendors in the given verification state, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn list_vendors_by_verification(
        &self,
        verification: VerificationStatus,
        page: Page,
    ) -> Result<Vec<Account>, RepositoryError> {
        let rows = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM marketplace.account \
             WHERE role = 'vendor' AND account_verification = $1 \
             ORDER BY created_at DESC \
             OFFSET $2 LIMIT $3"
        ))
        .bind(verification.to_string())
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// One page of shopper accounts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn list_users(&self, page: Page) -> Result<Vec<Account>, RepositoryError> {
        let rows = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM marketplace.account \
             WHERE role = 'user' \
             ORDER BY created_at DESC \
             OFFSET $1 LIMIT $2"
        ))
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// The newest accounts of a role, for the dashboard side lists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn recent_by_role(
        &self,
        role: Role,
        limit: i64,
    ) -> Result<Vec<Account>, RepositoryError> {
        let rows = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM marketplace.account \
             WHERE role = $1 \
             ORDER BY created_at DESC \
             LIMIT $2"
        ))
        .bind(role.to_string())
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Count accounts of a role.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_role(&self, role: Role) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM marketplace.account WHERE role = $1",
        )
        .bind(role.to_string())
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Count vendors whose verification was accepted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_accepted_vendors(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM marketplace.account \
             WHERE role = 'vendor' AND account_verification = 'accepted'",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Count vendors currently awaiting a verification decision.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_pending_verifications(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM marketplace.account \
             WHERE role = 'vendor' AND account_verification = 'requested'",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Shopper signups grouped by creation month within one calendar year.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn monthly_user_signups(
        &self,
        window: YearWindow,
    ) -> Result<Vec<MonthCount>, RepositoryError> {
        let rows = sqlx::query_as::<_, MonthCount>(
            "SELECT CAST(EXTRACT(MONTH FROM created_at) AS INTEGER) AS month, \
                    COUNT(*) AS count \
             FROM marketplace.account \
             WHERE role = 'user' AND created_at >= $1 AND created_at <= $2 \
             GROUP BY 1 \
             ORDER BY 1",
        )
        .bind(window.start)
        .bind(window.end)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Apply an admin verification decision to a vendor.
    ///
    /// Only a vendor currently in `requested` transitions; the status change,
    /// the decision timestamp, and the product `verified` cascade commit as a
    /// single transaction, so a failure of either write rolls back both.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement or the commit
    /// fails.
    pub async fn decide_verification(
        &self,
        eid: &AccountEid,
        decision: VerificationDecision,
    ) -> Result<VerificationOutcome, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE marketplace.account \
             SET account_verification = $1, account_verification_at = NOW() \
             WHERE eid = $2 AND role = 'vendor' AND account_verification = 'requested'",
        )
        .bind(decision.as_status().to_string())
        .bind(eid.as_str())
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(VerificationOutcome::NotRequested);
        }

        let cascaded = sqlx::query(
            "UPDATE marketplace.product SET verified = $1 WHERE vendor_eid = $2",
        )
        .bind(decision.verified_flag())
        .bind(eid.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(VerificationOutcome::Applied {
            products_updated: cascaded.rows_affected(),
        })
    }
}
