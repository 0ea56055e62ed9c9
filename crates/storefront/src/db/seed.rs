//! Demo catalog seeding.

use pocket_shop_core::Price;

use super::{Database, ProductRepository, RepositoryError};
use crate::models::NewProduct;

/// The fixed demo catalog: (name, price in cents, image token).
const DEFAULT_CATALOG: [(&str, u32, &str); 8] = [
    ("Wireless Headphones", 7999, "🎧"),
    ("Smart Watch", 19_999, "⌚"),
    ("Laptop Stand", 4999, "💻"),
    ("Mechanical Keyboard", 12_999, "⌨️"),
    ("USB-C Hub", 3999, "🔌"),
    ("Webcam HD", 8999, "📷"),
    ("Phone Case", 2499, "📱"),
    ("Portable Charger", 3499, "🔋"),
];

/// The eight products every fresh database starts with.
#[must_use]
pub fn default_catalog() -> Vec<NewProduct> {
    DEFAULT_CATALOG
        .iter()
        .map(|(name, cents, image)| NewProduct {
            name: (*name).to_string(),
            price: Price::from_unsigned_cents(*cents),
            image: (*image).to_string(),
        })
        .collect()
}

/// Insert `catalog` if the product table is empty.
///
/// The emptiness check and the inserts share one write transaction, so
/// concurrent seeders cannot both insert. Returns the number of products
/// inserted (0 if the table already had rows).
///
/// # Errors
///
/// Returns `RepositoryError` if any statement fails; nothing is inserted in
/// that case.
pub async fn seed_catalog(db: &Database, catalog: &[NewProduct]) -> Result<u64, RepositoryError> {
    let mut tx = db.begin_write().await?;
    let mut products = ProductRepository::new(tx.conn());

    if products.count().await? > 0 {
        tracing::debug!("Product table already populated, skipping seed");
        return Ok(0);
    }

    let mut inserted = 0;
    for product in catalog {
        products.insert(product).await?;
        inserted += 1;
    }
    tx.commit().await?;

    tracing::info!(inserted, "Seeded product catalog");
    Ok(inserted)
}
