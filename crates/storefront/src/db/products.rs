//! Product repository.

use sqlx::SqliteConnection;

use pocket_shop_core::{Price, ProductId};

use super::RepositoryError;
use crate::models::{NewProduct, Product};

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    price_cents: i64,
    image: String,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = Price::from_cents(row.price_cents).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price for product {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            price,
            image: row.image,
        })
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> ProductRepository<'c> {
    /// Create a product repository on a pooled connection or a write transaction.
    #[must_use]
    pub const fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// List every product in id order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored price is invalid.
    pub async fn list_all(&mut self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> =
            sqlx::query_as("SELECT id, name, price_cents, image FROM products ORDER BY id")
                .fetch_all(&mut *self.conn)
                .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Returns true if a product with this id exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&mut self, id: ProductId) -> Result<bool, RepositoryError> {
        let found: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = ?)")
                .bind(id)
                .fetch_one(&mut *self.conn)
                .await?;

        Ok(found)
    }

    /// Count the products in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&mut self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(count)
    }

    /// Insert a product and return its new id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the price does not fit in cents.
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&mut self, product: &NewProduct) -> Result<ProductId, RepositoryError> {
        let price_cents = product.price.to_cents().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price for '{}': {e}", product.name))
        })?;

        let result =
            sqlx::query("INSERT INTO products (name, price_cents, image) VALUES (?, ?, ?)")
                .bind(&product.name)
                .bind(price_cents)
                .bind(&product.image)
                .execute(&mut *self.conn)
                .await?;

        Ok(ProductId::new(result.last_insert_rowid()))
    }
}
