//! Report repository.
//!
//! Reports are append-only and admin-read-only; every query joins the
//! reporting account so views can show who filed the report. The join is an
//! outer one - a report outlives its reporter.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cartloom_core::AccountEid;

use super::RepositoryError;
use crate::models::Report;
use crate::pagination::Page;

/// Internal row type for joined report queries.
#[derive(Debug, sqlx::FromRow)]
struct ReportRow {
    user_eid: String,
    reporter_name: Option<String>,
    reporter_email: Option<String>,
    subject: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl From<ReportRow> for Report {
    fn from(row: ReportRow) -> Self {
        Self {
            user_eid: AccountEid::new(row.user_eid),
            reporter_name: row.reporter_name,
            reporter_email: row.reporter_email,
            subject: row.subject,
            message: row.message,
            created_at: row.created_at,
        }
    }
}

const REPORT_SELECT: &str = "SELECT r.user_eid, a.name AS reporter_name, \
            a.email AS reporter_email, r.subject, r.message, r.created_at \
     FROM marketplace.report r \
     LEFT JOIN marketplace.account a ON a.eid = r.user_eid";

/// Repository for report database operations.
pub struct ReportRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReportRepository<'a> {
    /// Create a new report repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// One page of reports, newest first, with the reporter joined in.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, page: Page) -> Result<Vec<Report>, RepositoryError> {
        let rows = sqlx::query_as::<_, ReportRow>(&format!(
            "{REPORT_SELECT} ORDER BY r.created_at DESC OFFSET $1 LIMIT $2"
        ))
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// The newest reports, for the dashboard side list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recent(&self, limit: i64) -> Result<Vec<Report>, RepositoryError> {
        let rows = sqlx::query_as::<_, ReportRow>(&format!(
            "{REPORT_SELECT} ORDER BY r.created_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
