//! Axum extractor for the authenticated caller.
//!
//! Handlers that take a [`CurrentUser`] parameter require a valid bearer
//! token; the rejection is an [`ApiError`] that renders as 401.
//!
//! # Example
//!
//! ```rust,ignore
//! async fn protected_handler(caller: CurrentUser) -> impl IntoResponse {
//!     format!("caller {} with role {}", caller.id, caller.role)
//! }
//! ```

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use super::{AuthError, CurrentUser, JwtService};
use crate::error::ApiError;
use crate::state::AppState;

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Middleware or a prior extractor may already have verified this
        // request's token.
        if let Some(caller) = parts.extensions.get::<Self>() {
            return Ok(*caller);
        }

        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingToken)?;

        let token =
            JwtService::token_from_header(header_value).ok_or(AuthError::InvalidToken)?;

        let caller = state.jwt().verify(token).map_err(|e| {
            tracing::debug!(error = %e, path = %parts.uri.path(), "token rejected");
            e
        })?;

        parts.extensions.insert(caller);
        Ok(caller)
    }
}
