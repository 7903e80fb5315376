//! Platform accounts (shoppers and vendors share one table).

use chrono::{DateTime, Utc};

use cartloom_core::{AccountEid, Email, Role, VerificationStatus};

/// A platform account.
///
/// Vendors carry a verification state; for shoppers it stays
/// [`VerificationStatus::None`]. `verify_documents` holds the URL of the
/// vendor-submitted verification document and is only surfaced on the vendor
/// detail view.
#[derive(Debug, Clone)]
pub struct Account {
    pub eid: AccountEid,
    pub role: Role,
    pub name: String,
    pub email: Email,
    pub verification: VerificationStatus,
    pub verification_at: Option<DateTime<Utc>>,
    pub verify_documents: Option<String>,
    pub created_at: DateTime<Utc>,
}
