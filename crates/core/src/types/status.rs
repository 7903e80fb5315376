//! Role and status enums shared across the marketplace.
//!
//! All of these are stored as lowercase text in `PostgreSQL` and round-trip
//! through `Display`/`FromStr`; repositories treat an unknown stored value as
//! data corruption rather than panicking.

use serde::{Deserialize, Serialize};

/// Account role on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A shopper.
    User,
    /// A seller whose products appear on a storefront.
    Vendor,
    /// Back-office staff.
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Vendor => write!(f, "vendor"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "vendor" => Ok(Self::Vendor),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Vendor account verification state.
///
/// Only `Requested` vendors may transition, and only to one of the two
/// terminal states; nothing transitions back out of a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// Vendor has not asked for verification.
    None,
    /// Verification documents submitted, awaiting an admin decision.
    Requested,
    /// Terminal: approved.
    Accepted,
    /// Terminal: declined.
    Rejected,
}

impl VerificationStatus {
    /// Whether an admin decision may be applied from this state.
    #[must_use]
    pub const fn is_transitionable(self) -> bool {
        matches!(self, Self::Requested)
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Requested => write!(f, "requested"),
            Self::Accepted => write!(f, "accepted"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "requested" => Ok(Self::Requested),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("invalid verification status: {s}")),
        }
    }
}

/// An admin's decision on a pending vendor verification.
///
/// Parsed from the request path; anything other than the two terminal values
/// is rejected before any storage is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationDecision {
    Accepted,
    Rejected,
}

impl VerificationDecision {
    /// The verification state this decision lands the vendor in.
    #[must_use]
    pub const fn as_status(self) -> VerificationStatus {
        match self {
            Self::Accepted => VerificationStatus::Accepted,
            Self::Rejected => VerificationStatus::Rejected,
        }
    }

    /// The `verified` flag cascaded to the vendor's products.
    #[must_use]
    pub const fn verified_flag(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl std::fmt::Display for VerificationDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accepted => write!(f, "accepted"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for VerificationDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("invalid verification decision: {s}")),
        }
    }
}

/// Product order status.
///
/// `Pending` is the only "active" state; every other state is order history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Accepted,
    Shipped,
    Delivered,
    Cancelled,
    Returned,
}

impl OrderStatus {
    /// Whether this order still needs vendor action.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Accepted => write!(f, "accepted"),
            Self::Shipped => write!(f, "shipped"),
            Self::Delivered => write!(f, "delivered"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Returned => write!(f, "returned"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            "returned" => Ok(Self::Returned),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn role_round_trips() {
        for role in [Role::User, Role::Vendor, Role::Admin] {
            assert_eq!(Role::from_str(&role.to_string()).unwrap(), role);
        }
        assert!(Role::from_str("superuser").is_err());
    }

    #[test]
    fn verification_status_round_trips() {
        for status in [
            VerificationStatus::None,
            VerificationStatus::Requested,
            VerificationStatus::Accepted,
            VerificationStatus::Rejected,
        ] {
            assert_eq!(
                VerificationStatus::from_str(&status.to_string()).unwrap(),
                status
            );
        }
    }

    #[test]
    fn only_requested_is_transitionable() {
        assert!(VerificationStatus::Requested.is_transitionable());
        assert!(!VerificationStatus::None.is_transitionable());
        assert!(!VerificationStatus::Accepted.is_transitionable());
        assert!(!VerificationStatus::Rejected.is_transitionable());
    }

    #[test]
    fn decision_parses_only_terminal_values() {
        assert_eq!(
            VerificationDecision::from_str("accepted").unwrap(),
            VerificationDecision::Accepted
        );
        assert_eq!(
            VerificationDecision::from_str("rejected").unwrap(),
            VerificationDecision::Rejected
        );
        for s in ["requested", "none", "pending", "ACCEPTED", ""] {
            assert!(VerificationDecision::from_str(s).is_err(), "{s}");
        }
    }

    #[test]
    fn decision_maps_to_status_and_flag() {
        assert_eq!(
            VerificationDecision::Accepted.as_status(),
            VerificationStatus::Accepted
        );
        assert_eq!(
            VerificationDecision::Rejected.as_status(),
            VerificationStatus::Rejected
        );
        assert!(VerificationDecision::Accepted.verified_flag());
        assert!(!VerificationDecision::Rejected.verified_flag());
    }

    #[test]
    fn order_status_round_trips_and_pending_is_active() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Accepted,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
            OrderStatus::Returned,
        ] {
            assert_eq!(OrderStatus::from_str(&status.to_string()).unwrap(), status);
            assert_eq!(status.is_pending(), status == OrderStatus::Pending);
        }
    }
}
