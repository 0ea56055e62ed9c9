//! Seed the product catalog.
//!
//! Without `--file`, the built-in demo catalog is used. A catalog file is a
//! YAML list of products:
//!
//! ```yaml
//! - name: Desk Lamp
//!   price: 45.50
//!   image: "💡"
//! ```
//!
//! Seeding only happens when the product table is empty.

use std::path::Path;

use tracing::{error, info};

use pocket_shop_storefront::db::{Database, seed};
use pocket_shop_storefront::models::NewProduct;

use super::CliError;

/// Run migrations, then seed the catalog if the product table is empty.
///
/// # Errors
///
/// Returns `CliError` if the file cannot be read or is invalid, or if a
/// database operation fails.
pub async fn run(db: &Database, file: Option<&Path>) -> Result<(), CliError> {
    // Read and validate the file before touching the database
    let catalog = match file {
        Some(path) => load_catalog(path).await?,
        None => seed::default_catalog(),
    };
    info!(products = catalog.len(), "Catalog loaded");

    db.migrate().await?;

    let inserted = seed::seed_catalog(db, &catalog).await?;
    if inserted == 0 {
        info!("Product table already has rows, nothing seeded");
    } else {
        info!("Seeding complete! Products inserted: {inserted}");
    }
    Ok(())
}

async fn load_catalog(path: &Path) -> Result<Vec<NewProduct>, CliError> {
    info!(path = %path.display(), "Loading catalog from file");

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Io {
            path: path.display().to_string(),
            source,
        })?;

    let catalog = parse_catalog(&content)?;

    let errors = validate_catalog(&catalog);
    if !errors.is_empty() {
        error!("Catalog validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(CliError::Catalog(format!(
            "{} validation errors found",
            errors.len()
        )));
    }

    Ok(catalog)
}

fn parse_catalog(content: &str) -> Result<Vec<NewProduct>, CliError> {
    serde_yaml::from_str(content).map_err(|e| CliError::Catalog(e.to_string()))
}

fn validate_catalog(catalog: &[NewProduct]) -> Vec<String> {
    let mut errors = Vec::new();
    if catalog.is_empty() {
        errors.push("catalog has no products".to_string());
    }
    for (index, product) in catalog.iter().enumerate() {
        if product.name.trim().is_empty() {
            errors.push(format!("product #{} has an empty name", index + 1));
        }
    }
    errors
}
