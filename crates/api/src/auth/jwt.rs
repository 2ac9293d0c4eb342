//! Bearer token issue and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use verdant_core::{Role, UserId};

use super::{AuthError, CurrentUser};

const ISSUER: &str = "verdant-api";

/// Claims stored in an access token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User ID (subject).
    sub: String,
    /// Role name.
    role: String,
    /// Issued-at timestamp.
    iat: i64,
    /// Expiry timestamp.
    exp: i64,
    /// Issuer.
    iss: String,
}

/// HS256 token service.
///
/// Built once at startup from the configured signing secret and shared via
/// application state.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtService {
    /// Create a token service from the configured secret and lifetime.
    #[must_use]
    pub fn new(secret: &SecretString, ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.expose_secret().as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Issue an access token for a user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Internal`] if signing fails.
    pub fn issue(&self, user_id: UserId, role: Role) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.as_str().to_owned(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            iss: ISSUER.to_owned(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "token signing failed");
            AuthError::Internal
        })
    }

    /// Verify a token and recover the caller identity it carries.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenExpired`] for expired tokens and
    /// [`AuthError::InvalidToken`] for anything else that fails
    /// validation, including unparseable subject or role claims.
    pub fn verify(&self, token: &str) -> Result<CurrentUser, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["sub", "exp", "iss"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })?;

        let id = data
            .claims
            .sub
            .parse::<i32>()
            .map(UserId::new)
            .map_err(|_| AuthError::InvalidToken)?;
        let role = data
            .claims
            .role
            .parse::<Role>()
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(CurrentUser { id, role })
    }

    /// Strip the `Bearer ` scheme from an Authorization header value.
    #[must_use]
    pub fn token_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}
