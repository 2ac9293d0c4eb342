//! Unified error handling for the API.
//!
//! Every route handler returns `Result<T, ApiError>`. The `IntoResponse`
//! impl maps each failure to a status code and a safe `{"message"}` body;
//! raw causes (database errors, corrupt rows) are logged server-side and
//! never reach the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use verdant_core::OrderStatus;

use crate::auth::AuthError;
use crate::db::RepositoryError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Client sent a structurally valid but semantically bad request.
    #[error("{0}")]
    Validation(String),

    /// An order referenced products the catalog does not contain.
    #[error("one or more products not found")]
    UnknownProducts,

    /// Resource does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Caller is authenticated but the policy denies the operation.
    #[error("forbidden")]
    Forbidden,

    /// The order lifecycle does not permit this status change.
    #[error("cannot move order from {from} to {to}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    /// The target changed underneath the request.
    #[error("{0}")]
    Conflict(&'static str),
}

impl ApiError {
    const fn status_code(&self) -> StatusCode {
        match self {
            Self::Repository(err) => match err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Conflict(_) => StatusCode::CONFLICT,
                RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials
                | AuthError::MissingToken
                | AuthError::InvalidToken
                | AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
                AuthError::InvalidEmail(_) | AuthError::WeakPassword(_) => StatusCode::BAD_REQUEST,
                AuthError::EmailTaken => StatusCode::CONFLICT,
                AuthError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Validation(_) | Self::UnknownProducts => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::InvalidTransition { .. } | Self::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    /// The message shown to the client. Internal failures collapse to a
    /// generic line; their detail only goes to the log.
    fn public_message(&self) -> String {
        match self {
            Self::Repository(err) => match err {
                RepositoryError::NotFound => "not found".to_owned(),
                RepositoryError::Conflict(msg) => msg.clone(),
                RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
                    "internal server error".to_owned()
                }
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "invalid credentials".to_owned(),
                AuthError::MissingToken | AuthError::InvalidToken | AuthError::TokenExpired => {
                    err.to_string()
                }
                AuthError::InvalidEmail(e) => e.to_string(),
                AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::EmailTaken => "email already registered".to_owned(),
                AuthError::Internal => "internal server error".to_owned(),
            },
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (status, Json(json!({ "message": self.public_message() }))).into_response()
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_client_errors_map_to_4xx() {
        assert_eq!(
            status_of(ApiError::Validation("empty items".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(ApiError::UnknownProducts), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ApiError::NotFound("order")), StatusCode::NOT_FOUND);
        assert_eq!(status_of(ApiError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(ApiError::InvalidTransition {
                from: OrderStatus::Fulfilled,
                to: OrderStatus::New,
            }),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_auth_errors_map_to_expected_codes() {
        assert_eq!(
            status_of(ApiError::Auth(AuthError::MissingToken)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(ApiError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(ApiError::Auth(AuthError::EmailTaken)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(ApiError::Auth(AuthError::WeakPassword("too short".into()))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_store_failures_are_opaque_500s() {
        let err = ApiError::Repository(RepositoryError::DataCorruption(
            "invalid role in database: root".into(),
        ));
        assert_eq!(err.public_message(), "internal server error");
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);

        let err = ApiError::Repository(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(err.public_message(), "internal server error");
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_transition_message_names_both_states() {
        let err = ApiError::InvalidTransition {
            from: OrderStatus::New,
            to: OrderStatus::Fulfilled,
        };
        assert_eq!(err.public_message(), "cannot move order from New to Fulfilled");
    }
}
