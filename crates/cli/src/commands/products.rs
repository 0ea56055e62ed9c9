//! Catalog listing command.

use pocket_shop_storefront::db::{Database, ProductRepository};

use super::CliError;

/// Log every product in the catalog.
///
/// # Errors
///
/// Returns `CliError::Repository` if the catalog cannot be read.
pub async fn run(db: &Database) -> Result<(), CliError> {
    let mut conn = db.read().await?;
    let catalog = ProductRepository::new(&mut conn).list_all().await?;

    if catalog.is_empty() {
        tracing::info!("Catalog is empty (run `pocket-cli seed`)");
        return Ok(());
    }

    tracing::info!("Products ({}):", catalog.len());
    for product in &catalog {
        tracing::info!(
            "  {:>3}  {} {:<24} {}",
            product.id.as_i64(),
            product.image,
            product.name,
            product.price
        );
    }
    Ok(())
}
