//! Cart service.
//!
//! There is one cart shared by every client. Each mutation runs inside a
//! single write transaction, so concurrent adds for the same product are
//! all counted.

use tracing::instrument;

use pocket_shop_core::{CartLineId, ProductId, Quantity};

use super::ShopError;
use crate::db::{CartRepository, Database, ProductRepository};
use crate::models::{Cart, CartLine};

/// Result of adding a product to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutcome {
    /// The line after the add, with its final quantity.
    pub line: CartLine,
    /// True if the line was created, false if an existing line was incremented.
    pub created: bool,
}

/// Operations on the shared cart.
pub struct CartService<'a> {
    db: &'a Database,
}

impl<'a> CartService<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Current cart lines with product data and the computed total.
    ///
    /// # Errors
    ///
    /// - `ShopError::InvalidInput` if the total overflows
    /// - `ShopError::Storage` if the read fails
    #[instrument(skip(self))]
    pub async fn list_cart(&self) -> Result<Cart, ShopError> {
        let mut conn = self.db.read().await?;
        let items = CartRepository::new(&mut conn).list_items().await?;
        Ok(Cart::from_items(items)?)
    }

    /// Add `qty` (default 1) of a product, accumulating onto an existing line.
    ///
    /// # Errors
    ///
    /// - `ShopError::InvalidInput` if `product_id` is absent, `qty` is below 1,
    ///   or the accumulated quantity is too large
    /// - `ShopError::NotFound` if the product does not exist
    /// - `ShopError::Storage` if a read or write fails
    #[instrument(skip(self))]
    pub async fn add_to_cart(
        &self,
        product_id: Option<ProductId>,
        qty: Option<i64>,
    ) -> Result<AddOutcome, ShopError> {
        let product_id = product_id.ok_or_else(|| ShopError::invalid("productId is required"))?;
        let qty = match qty {
            Some(value) => parse_qty(value)?,
            None => Quantity::ONE,
        };

        let mut tx = self.db.begin_write().await?;

        if !ProductRepository::new(tx.conn()).exists(product_id).await? {
            return Err(ShopError::NotFound(format!("Product {product_id} not found")));
        }

        let mut cart = CartRepository::new(tx.conn());
        let outcome = match cart.find_by_product(product_id).await? {
            Some(existing) => {
                let total = existing
                    .qty
                    .checked_add(qty)
                    .map_err(|e| ShopError::invalid(format!("Invalid quantity: {e}")))?;
                cart.set_qty(existing.id, total).await?;
                AddOutcome {
                    line: CartLine {
                        qty: total,
                        ..existing
                    },
                    created: false,
                }
            }
            None => AddOutcome {
                line: cart.insert(product_id, qty).await?,
                created: true,
            },
        };

        tx.commit().await?;

        tracing::debug!(
            line_id = %outcome.line.id,
            qty = %outcome.line.qty,
            created = outcome.created,
            "Cart line saved"
        );
        Ok(outcome)
    }

    /// Overwrite the quantity of an existing line.
    ///
    /// # Errors
    ///
    /// - `ShopError::InvalidInput` if `qty` is absent or below 1
    /// - `ShopError::NotFound` if the line does not exist
    /// - `ShopError::Storage` if the write fails
    #[instrument(skip(self))]
    pub async fn update_qty(
        &self,
        line_id: CartLineId,
        qty: Option<i64>,
    ) -> Result<Quantity, ShopError> {
        let qty = qty
            .ok_or_else(|| ShopError::invalid("Invalid quantity"))
            .and_then(parse_qty)?;

        let mut tx = self.db.begin_write().await?;
        if !CartRepository::new(tx.conn()).set_qty(line_id, qty).await? {
            return Err(cart_item_not_found());
        }
        tx.commit().await?;

        Ok(qty)
    }

    /// Delete a line from the cart.
    ///
    /// # Errors
    ///
    /// - `ShopError::NotFound` if the line does not exist
    /// - `ShopError::Storage` if the write fails
    #[instrument(skip(self))]
    pub async fn remove_line(&self, line_id: CartLineId) -> Result<(), ShopError> {
        let mut tx = self.db.begin_write().await?;
        if !CartRepository::new(tx.conn()).delete(line_id).await? {
            return Err(cart_item_not_found());
        }
        tx.commit().await?;

        Ok(())
    }
}

fn parse_qty(value: i64) -> Result<Quantity, ShopError> {
    Quantity::new(value).map_err(|e| ShopError::invalid(format!("Invalid quantity: {e}")))
}

fn cart_item_not_found() -> ShopError {
    ShopError::NotFound("Cart item not found".to_string())
}
