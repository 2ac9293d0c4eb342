//! Authentication: password hashing, bearer tokens, and the per-request
//! caller identity.
//!
//! The service is stateless: `POST /auth/login` issues a signed token
//! carrying the user's ID and role, and the [`CurrentUser`] extractor
//! verifies it on every protected route. Nothing about the caller is
//! persisted per-request.

pub mod extractor;
pub mod jwt;
pub mod password;

use thiserror::Error;

use verdant_core::{EmailError, Role, UserId};

pub use jwt::JwtService;

/// Errors from the authentication layer.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email/password pair did not match an account.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration email failed validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Registration password failed validation.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// Registration email is already taken.
    #[error("email already registered")]
    EmailTaken,

    /// No bearer token on a protected route.
    #[error("missing bearer token")]
    MissingToken,

    /// Token failed signature or claim validation.
    #[error("invalid token")]
    InvalidToken,

    /// Token was valid once but has expired.
    #[error("token expired")]
    TokenExpired,

    /// Hashing or signing failed; not a caller problem.
    #[error("credential processing failed")]
    Internal,
}

/// The authenticated caller, derived from a verified token.
///
/// This is the identity every policy decision is a function of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    /// The caller's user ID.
    pub id: UserId,
    /// The caller's authorization tier.
    pub role: Role,
}
