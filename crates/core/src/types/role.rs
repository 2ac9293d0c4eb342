//! Caller roles.

use serde::{Deserialize, Serialize};

/// Authorization tier attached to an authenticated request.
///
/// The set is closed on purpose: order visibility is selected by an
/// exhaustive `match` over this enum, so adding a role forces every policy
/// site to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A regular buyer. Sees only their own orders.
    #[default]
    User,
    /// A merchant account. Order visibility is still the full set until a
    /// seller-product ownership relation exists.
    Seller,
    /// Full visibility and management rights.
    Admin,
}

impl Role {
    /// The role name as stored in the `users.role` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Seller => "seller",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "seller" => Ok(Self::Seller),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}
