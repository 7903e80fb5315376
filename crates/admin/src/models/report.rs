//! User-submitted reports.

use chrono::{DateTime, Utc};

use cartloom_core::AccountEid;

/// A report filed by a user. Append-only; this layer only reads them.
///
/// Reporter fields come from a join against the account table and are absent
/// when the reporting account has since been removed.
#[derive(Debug, Clone)]
pub struct Report {
    pub user_eid: AccountEid,
    pub reporter_name: Option<String>,
    pub reporter_email: Option<String>,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
