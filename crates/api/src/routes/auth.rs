//! Auth route handlers: registration and login.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use verdant_core::Email;

use crate::auth::{AuthError, password};
use crate::db::{RepositoryError, UserRepository};
use crate::error::{ApiError, Result};
use crate::models::User;
use crate::state::AppState;

const MIN_PASSWORD_LENGTH: usize = 6;

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub address: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// Response body for `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// `POST /auth/register` - create an account.
///
/// The role is always "user"; elevated roles are provisioned through the
/// CLI, never through registration.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<User>)> {
    let email = Email::parse(&body.email).map_err(AuthError::InvalidEmail)?;

    if body.password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        ))
        .into());
    }

    let hashed = password::hash(&body.password)?;

    let user = UserRepository::new(state.pool())
        .create(&email, &hashed, body.name.as_deref(), body.address.as_deref())
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => ApiError::Auth(AuthError::EmailTaken),
            other => ApiError::Repository(other),
        })?;

    tracing::info!(user_id = %user.id, "account registered");

    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /auth/login` - verify credentials and issue a bearer token.
///
/// Unknown addresses and wrong passwords are indistinguishable to the
/// caller.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<LoginResponse>> {
    // A malformed address cannot match an account; same public answer.
    let Ok(email) = Email::parse(&body.email) else {
        return Err(AuthError::InvalidCredentials.into());
    };

    let Some((user, stored_hash)) = UserRepository::new(state.pool())
        .get_by_email(&email)
        .await?
    else {
        return Err(AuthError::InvalidCredentials.into());
    };

    if !password::verify(&stored_hash, &body.password) {
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = state.jwt().issue(user.id, user.role)?;

    tracing::debug!(user_id = %user.id, "login succeeded");

    Ok(Json(LoginResponse { token, user }))
}
