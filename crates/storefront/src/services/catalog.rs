//! Catalog service.

use tracing::instrument;

use super::ShopError;
use crate::db::{Database, ProductRepository};
use crate::models::Product;

/// Read-only access to the product catalog.
pub struct CatalogService<'a> {
    db: &'a Database,
}

impl<'a> CatalogService<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List all products in id order.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Storage` if the read fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ShopError> {
        let mut conn = self.db.read().await?;
        Ok(ProductRepository::new(&mut conn).list_all().await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::db::seed;

    #[tokio::test]
    async fn test_list_products_returns_seeded_catalog_in_order() {
        let db = Database::in_memory().await.unwrap();
        db.migrate().await.unwrap();
        seed::seed_catalog(&db, &seed::default_catalog()).await.unwrap();

        let listed = CatalogService::new(&db).list_products().await.unwrap();
        let names: Vec<&str> = listed.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names.len(), 8);
        assert_eq!(names.first(), Some(&"Wireless Headphones"));
        assert_eq!(names.last(), Some(&"Portable Charger"));
        assert!(listed.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn test_list_products_empty_catalog() {
        let db = Database::in_memory().await.unwrap();
        db.migrate().await.unwrap();

        assert!(CatalogService::new(&db).list_products().await.unwrap().is_empty());
    }
}
