//! Session-related types for admin authentication.
//!
//! Credential verification happens in the external auth collaborator; this
//! layer only consumes the principal it left in the session.

use serde::{Deserialize, Serialize};

use cartloom_core::{AccountEid, Email};

/// Session-stored admin identity.
///
/// Minimal data stored in the session to identify the logged-in admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's external account id.
    pub eid: AccountEid,
    /// Admin's email address.
    pub email: Email,
    /// Admin's display name.
    pub name: String,
}

/// Session keys for admin authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
