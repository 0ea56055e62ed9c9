//! Pocket Shop CLI - Database migrations and catalog management.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! pocket-cli migrate
//!
//! # Seed the demo catalog into an empty product table
//! pocket-cli seed
//!
//! # Seed a custom catalog instead
//! pocket-cli seed --file catalog.yaml
//!
//! # Show the catalog
//! pocket-cli products
//! ```
//!
//! The database is the one the storefront uses (`STOREFRONT_DATABASE_URL`,
//! falling back to `DATABASE_URL`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "pocket-cli")]
#[command(author, version, about = "Pocket Shop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the product catalog if it is empty
    Seed {
        /// YAML catalog to seed instead of the built-in demo products
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// List the product catalog
    Products,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let db = commands::open_database().await?;

    match cli.command {
        Commands::Migrate => commands::migrate::run(&db).await?,
        Commands::Seed { file } => commands::seed::run(&db, file.as_deref()).await?,
        Commands::Products => commands::products::run(&db).await?,
    }
    Ok(())
}
