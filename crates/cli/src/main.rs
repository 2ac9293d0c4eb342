//! Verdant CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! verdant-cli migrate
//!
//! # Provision an elevated user (roles cannot be chosen at registration)
//! verdant-cli user create -e admin@example.com -p <password> -r admin
//!
//! # Seed the catalog with sample products
//! verdant-cli seed products
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `user create` - Create users with any role
//! - `seed products` - Insert a sample catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "verdant-cli")]
#[command(author, version, about = "Verdant Market CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Seed the database with sample data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Initial password
        #[arg(short, long)]
        password: String,

        /// Role (`user`, `seller`, `admin`)
        #[arg(short, long, default_value = "user")]
        role: String,

        /// Display name
        #[arg(short, long)]
        name: Option<String>,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Insert a sample product catalog
    Products,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                password,
                role,
                name,
            } => {
                commands::user::create(&email, &password, &role, name.as_deref()).await?;
            }
        },
        Commands::Seed { target } => match target {
            SeedTarget::Products => commands::seed::products().await?,
        },
    }
    Ok(())
}
