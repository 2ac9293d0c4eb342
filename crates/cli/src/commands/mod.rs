//! CLI subcommand implementations.

pub mod migrate;
pub mod seed;
pub mod user;

use secrecy::SecretString;
use sqlx::PgPool;

/// Connect to the API database using `API_DATABASE_URL`.
///
/// Loads `.env` first so the CLI works from a development checkout.
pub(crate) async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("API_DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| "API_DATABASE_URL not set")?;

    tracing::info!("Connecting to database...");
    let pool = verdant_api::db::create_pool(&database_url).await?;

    Ok(pool)
}
