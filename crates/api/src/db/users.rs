//! User repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use verdant_core::{Email, Role, UserId};

use super::RepositoryError;
use crate::models::User;

/// Internal row type for `users` queries.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    email: String,
    password_hash: String,
    role: String,
    name: Option<String>,
    address: Option<String>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    /// Split the row into the domain user and its credential hash.
    fn into_parts(self) -> Result<(User, String), RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let role: Role = self.role.parse().map_err(|_| {
            RepositoryError::DataCorruption(format!("invalid role in database: {}", self.role))
        })?;

        Ok((
            User {
                id: UserId::new(self.id),
                email,
                role,
                name: self.name,
                address: self.address,
                created_at: self.created_at,
            },
            self.password_hash,
        ))
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user with the default "user" role.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        email: &Email,
        password_hash: &str,
        name: Option<&str>,
        address: Option<&str>,
    ) -> Result<User, RepositoryError> {
        self.create_with_role(email, password_hash, Role::User, name, address)
            .await
    }

    /// Create a new user with an explicit role. Only the CLI provisioning
    /// path may assign anything other than [`Role::User`]; registration
    /// never lets the caller pick a role.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_with_role(
        &self,
        email: &Email,
        password_hash: &str,
        role: Role,
        name: Option<&str>,
        address: Option<&str>,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (email, password_hash, role, name, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, password_hash, role, name, address, created_at
            ",
        )
        .bind(email.as_str())
        .bind(password_hash)
        .bind(role.as_str())
        .bind(name)
        .bind(address)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        let (user, _) = row.into_parts()?;
        Ok(user)
    }

    /// Get a user and their password hash by email.
    ///
    /// Returns `None` if no account exists for the address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored fields are invalid.
    pub async fn get_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, email, password_hash, role, name, address, created_at
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_parts).transpose()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored fields are invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, email, password_hash, role, name, address, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| r.into_parts().map(|(user, _)| user)).transpose()
    }
}
