//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! pocket-cli migrate
//! ```
//!
//! Migrations live in `crates/storefront/migrations/` and are embedded in the
//! storefront crate, so the CLI always applies the same set the server does.

use pocket_shop_storefront::db::Database;

use super::CliError;

/// Run storefront database migrations.
///
/// # Errors
///
/// Returns `CliError::Repository` if a migration fails.
pub async fn run(db: &Database) -> Result<(), CliError> {
    tracing::info!("Running storefront migrations...");
    db.migrate().await?;
    tracing::info!("Storefront migrations complete!");
    Ok(())
}
