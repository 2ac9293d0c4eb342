//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use verdant_core::{Email, Role, UserId};

/// A registered account (domain type).
///
/// The password hash is deliberately not part of this type; the repository
/// only surfaces it on the credential-check path.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// The account's email address.
    pub email: Email,
    /// Authorization tier.
    pub role: Role,
    /// Optional display name.
    pub name: Option<String>,
    /// Optional shipping address.
    pub address: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
