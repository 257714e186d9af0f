//! Admin identity types.
//!
//! Admin accounts and their login flows live in the identity service; the
//! back office reads the authenticated identity from the shared session.

use serde::{Deserialize, Serialize};

use eezy_store_core::AdminUserId;

/// Admin role with different permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Full access including admin user management (in the identity service).
    SuperAdmin,
    /// Full access to store management features.
    Admin,
    /// Read-only access to store data.
    Viewer,
}

impl AdminRole {
    /// Whether this role may advance order fulfillment status.
    ///
    /// Viewers can read everything but write nothing.
    #[must_use]
    pub const fn can_update_orders(self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Admin)
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SuperAdmin => write!(f, "super_admin"),
            Self::Admin => write!(f, "admin"),
            Self::Viewer => write!(f, "viewer"),
        }
    }
}

impl std::str::FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "viewer" => Ok(Self::Viewer),
            _ => Err(format!("invalid admin role: {s}")),
        }
    }
}

/// Session-stored admin identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's ID, minted by the identity service.
    pub id: AdminUserId,
    /// Admin's email address.
    pub email: String,
    /// Permission level.
    pub role: AdminRole,
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_roundtrip() {
        for role in [AdminRole::SuperAdmin, AdminRole::Admin, AdminRole::Viewer] {
            assert_eq!(AdminRole::from_str(&role.to_string()), Ok(role));
        }
        assert!(AdminRole::from_str("root").is_err());
    }

    #[test]
    fn test_viewer_cannot_update_orders() {
        assert!(AdminRole::SuperAdmin.can_update_orders());
        assert!(AdminRole::Admin.can_update_orders());
        assert!(!AdminRole::Viewer.can_update_orders());
    }
}
