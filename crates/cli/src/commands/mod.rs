//! CLI command implementations.

pub mod migrate;
pub mod products;
pub mod seed;

use pocket_shop_storefront::config::{ConfigError, StorefrontConfig};
use pocket_shop_storefront::db::{Database, RepositoryError};

/// Errors surfaced by CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid catalog file: {0}")]
    Catalog(String),
}

/// Open the storefront database using the storefront's environment config.
///
/// # Errors
///
/// Returns `CliError` if the configuration is invalid or the database cannot
/// be opened.
pub async fn open_database() -> Result<Database, CliError> {
    let config = StorefrontConfig::from_env()?;
    tracing::info!(
        database_url = %config.database_url,
        "Connecting to storefront database..."
    );

    let db = Database::connect(&config.database_url, config.db_max_connections)
        .await
        .map_err(RepositoryError::from)?;
    Ok(db)
}
