//! Database migration command.
//!
//! Migrations live in `crates/api/migrations/` and are embedded into this
//! binary at compile time; running them requires only `API_DATABASE_URL`.

/// Run all pending database migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
