//! User provisioning command.
//!
//! Registration through the API always assigns the "user" role; seller and
//! admin accounts are created here instead.

use verdant_core::{Email, Role};

use verdant_api::auth::password;
use verdant_api::db::UserRepository;

/// Create a user with an explicit role.
///
/// # Errors
///
/// Returns an error for an invalid email or role, a duplicate email, or a
/// database failure.
pub async fn create(
    email: &str,
    password: &str,
    role: &str,
    name: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let email = Email::parse(email)?;
    let role: Role = role.parse()?;

    let pool = super::connect().await?;

    let hashed = password::hash(password)?;

    let user = UserRepository::new(&pool)
        .create_with_role(&email, &hashed, role, name, None)
        .await?;

    tracing::info!(user_id = %user.id, role = %user.role, "user created");
    Ok(())
}
