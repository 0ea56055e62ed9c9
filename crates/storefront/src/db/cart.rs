//! Cart repository.
//!
//! Mutations should run on the connection of a
//! [`WriteTransaction`](super::WriteTransaction) so that multi-statement
//! operations stay atomic.

use sqlx::SqliteConnection;

use pocket_shop_core::{CartLineId, Price, ProductId, Quantity};

use super::RepositoryError;
use crate::models::{CartItem, CartLine};

#[derive(sqlx::FromRow)]
struct CartLineRow {
    id: CartLineId,
    product_id: ProductId,
    qty: i64,
}

#[derive(sqlx::FromRow)]
struct CartItemRow {
    id: CartLineId,
    product_id: ProductId,
    qty: i64,
    name: String,
    price_cents: i64,
    image: String,
}

fn stored_qty(id: CartLineId, qty: i64) -> Result<Quantity, RepositoryError> {
    Quantity::new(qty).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid quantity for cart line {id}: {e}"))
    })
}

impl TryFrom<CartLineRow> for CartLine {
    type Error = RepositoryError;

    fn try_from(row: CartLineRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            product_id: row.product_id,
            qty: stored_qty(row.id, row.qty)?,
        })
    }
}

impl TryFrom<CartItemRow> for CartItem {
    type Error = RepositoryError;

    fn try_from(row: CartItemRow) -> Result<Self, Self::Error> {
        let price = Price::from_cents(row.price_cents).map_err(|e| {
            RepositoryError::DataCorruption(format!(
                "invalid price for product {}: {e}",
                row.product_id
            ))
        })?;

        Ok(Self {
            id: row.id,
            product_id: row.product_id,
            qty: stored_qty(row.id, row.qty)?,
            name: row.name,
            price,
            image: row.image,
        })
    }
}

/// Repository for the shared cart.
pub struct CartRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> CartRepository<'c> {
    /// Create a cart repository on a pooled connection or a write transaction.
    #[must_use]
    pub const fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// List cart lines joined with their products, in line id order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list_items(&mut self) -> Result<Vec<CartItem>, RepositoryError> {
        let rows: Vec<CartItemRow> = sqlx::query_as(
            r"
            SELECT cart.id, cart.product_id, cart.qty,
                   products.name, products.price_cents, products.image
            FROM cart
            JOIN products ON cart.product_id = products.id
            ORDER BY cart.id
            ",
        )
        .fetch_all(&mut *self.conn)
        .await?;

        rows.into_iter().map(CartItem::try_from).collect()
    }

    /// Find the cart line for a product, if there is one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_product(
        &mut self,
        product_id: ProductId,
    ) -> Result<Option<CartLine>, RepositoryError> {
        let row: Option<CartLineRow> = sqlx::query_as(
            "SELECT id, product_id, qty FROM cart WHERE product_id = ? ORDER BY id LIMIT 1",
        )
        .bind(product_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        row.map(CartLine::try_from).transpose()
    }

    /// Insert a new cart line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including an
    /// unknown product, which violates the foreign key).
    pub async fn insert(
        &mut self,
        product_id: ProductId,
        qty: Quantity,
    ) -> Result<CartLine, RepositoryError> {
        let result = sqlx::query("INSERT INTO cart (product_id, qty) VALUES (?, ?)")
            .bind(product_id)
            .bind(i64::from(qty))
            .execute(&mut *self.conn)
            .await?;

        Ok(CartLine {
            id: CartLineId::new(result.last_insert_rowid()),
            product_id,
            qty,
        })
    }

    /// Overwrite the quantity of a line. Returns false if no such line exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn set_qty(&mut self, id: CartLineId, qty: Quantity) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE cart SET qty = ? WHERE id = ?")
            .bind(i64::from(qty))
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a line. Returns false if no such line exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&mut self, id: CartLineId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every line, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn clear(&mut self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart")
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected())
    }
}
