//! Checkout service.

use chrono::{DateTime, Utc};
use tracing::instrument;
use uuid::Uuid;

use pocket_shop_core::{Email, Price, PriceError};

use super::ShopError;
use crate::db::{CartRepository, Database};
use crate::models::{Receipt, ReceiptItem};

/// Turns the shared cart into a receipt.
pub struct CheckoutService<'a> {
    db: &'a Database,
}

impl<'a> CheckoutService<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Complete an order for the current cart contents and empty the cart.
    ///
    /// Reading the lines and clearing them happen in one write transaction,
    /// so a concurrent add is either on this receipt or left in the cart.
    ///
    /// # Errors
    ///
    /// - `ShopError::InvalidInput` if the name or email is blank, or the
    ///   email is malformed
    /// - `ShopError::InvalidInput` if the total overflows (the cart is untouched)
    /// - `ShopError::EmptyCart` if the cart has no lines
    /// - `ShopError::Storage` if a read or write fails (the cart is untouched)
    #[instrument(skip(self, name, email))]
    pub async fn checkout(
        &self,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Receipt, ShopError> {
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        let email = email.map(str::trim).filter(|e| !e.is_empty());
        let (Some(name), Some(email)) = (name, email) else {
            return Err(ShopError::invalid("Name and email are required"));
        };
        let email =
            Email::parse(email).map_err(|e| ShopError::invalid(format!("Invalid email: {e}")))?;

        let mut tx = self.db.begin_write().await?;
        let mut cart = CartRepository::new(tx.conn());

        let lines = cart.list_items().await?;
        if lines.is_empty() {
            return Err(ShopError::EmptyCart);
        }

        let items = lines
            .into_iter()
            .map(|line| -> Result<ReceiptItem, PriceError> {
                Ok(ReceiptItem {
                    subtotal: line.line_total()?,
                    name: line.name,
                    qty: line.qty,
                    price: line.price,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let total = Price::total(items.iter().map(|item| item.subtotal))?;

        cart.clear().await?;
        tx.commit().await?;

        let timestamp = Utc::now();
        let order_id = generate_order_id(timestamp);
        tracing::info!(%order_id, %total, lines = items.len(), "Order completed");

        Ok(Receipt {
            order_id,
            customer_name: name.to_string(),
            customer_email: email,
            items,
            total,
            timestamp,
        })
    }
}

/// `ORD-<unix millis>-<8 hex digits>`.
fn generate_order_id(now: DateTime<Utc>) -> String {
    let (suffix, ..) = Uuid::new_v4().as_fields();
    format!("ORD-{}-{suffix:08X}", now.timestamp_millis())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::services::CartService;
    use crate::services::test_support::shop_with_two_products;

    #[tokio::test]
    async fn test_checkout_builds_receipt_and_clears_cart() {
        let (db, a, b) = shop_with_two_products().await;
        let cart = CartService::new(&db);
        cart.add_to_cart(Some(a), Some(2)).await.unwrap();
        cart.add_to_cart(Some(b), Some(1)).await.unwrap();

        let receipt = CheckoutService::new(&db)
            .checkout(Some("Ada"), Some("ada@example.com"))
            .await
            .unwrap();

        assert_eq!(receipt.customer_name, "Ada");
        assert_eq!(receipt.customer_email.as_str(), "ada@example.com");
        assert_eq!(receipt.total.to_cents().unwrap(), 2500);
        assert_eq!(receipt.items.len(), 2);
        assert_eq!(receipt.items[0].name, "A");
        assert_eq!(receipt.items[0].qty.get(), 2);
        assert_eq!(receipt.items[0].subtotal.to_cents().unwrap(), 2000);
        assert_eq!(receipt.items[1].name, "B");
        assert_eq!(receipt.items[1].subtotal.to_cents().unwrap(), 500);

        let after = cart.list_cart().await.unwrap();
        assert!(after.is_empty());
        assert_eq!(after.total.to_cents().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_checkout_empty_cart() {
        let (db, _, _) = shop_with_two_products().await;
        let result = CheckoutService::new(&db)
            .checkout(Some("Ada"), Some("ada@example.com"))
            .await;
        assert!(matches!(result, Err(ShopError::EmptyCart)));
    }

    #[tokio::test]
    async fn test_checkout_requires_name_and_email() {
        let (db, a, _) = shop_with_two_products().await;
        CartService::new(&db).add_to_cart(Some(a), None).await.unwrap();
        let service = CheckoutService::new(&db);

        for (name, email) in [
            (None, Some("ada@example.com")),
            (Some("Ada"), None),
            (Some("   "), Some("ada@example.com")),
            (Some("Ada"), Some("  ")),
            (Some("Ada"), Some("not-an-email")),
        ] {
            assert!(matches!(
                service.checkout(name, email).await,
                Err(ShopError::InvalidInput(_))
            ));
        }

        // Rejected checkouts leave the cart alone.
        assert_eq!(CartService::new(&db).list_cart().await.unwrap().items.len(), 1);
    }

    #[tokio::test]
    async fn test_order_ids_are_unique() {
        let (db, a, _) = shop_with_two_products().await;
        let cart = CartService::new(&db);
        let checkout = CheckoutService::new(&db);

        cart.add_to_cart(Some(a), None).await.unwrap();
        let first = checkout.checkout(Some("Ada"), Some("ada@example.com")).await.unwrap();
        cart.add_to_cart(Some(a), None).await.unwrap();
        let second = checkout.checkout(Some("Ada"), Some("ada@example.com")).await.unwrap();

        assert_ne!(first.order_id, second.order_id);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_checkout_during_concurrent_adds_keeps_every_unit() {
        const ADDS: u32 = 200;
        let (db, a, _) = shop_with_two_products().await;

        let adders: Vec<_> = (0..ADDS)
            .map(|_| {
                let db = db.clone();
                tokio::spawn(async move {
                    CartService::new(&db).add_to_cart(Some(a), Some(1)).await
                })
            })
            .collect();

        let checkouts = {
            let db = db.clone();
            tokio::spawn(async move {
                let mut checked_out = 0_u32;
                for _ in 0..20 {
                    let result = CheckoutService::new(&db)
                        .checkout(Some("Ada"), Some("ada@example.com"))
                        .await;
                    match result {
                        Ok(receipt) => {
                            let qty: u32 = receipt.items.iter().map(|item| item.qty.get()).sum();
                            assert_eq!(receipt.total.to_cents().unwrap(), i64::from(qty) * 1000);
                            checked_out += qty;
                        }
                        Err(ShopError::EmptyCart) => {}
                        Err(e) => panic!("checkout failed: {e}"),
                    }
                    tokio::task::yield_now().await;
                }
                checked_out
            })
        };

        for adder in adders {
            adder.await.unwrap().unwrap();
        }
        let checked_out = checkouts.await.unwrap();

        let left: u32 = CartService::new(&db)
            .list_cart()
            .await
            .unwrap()
            .items
            .iter()
            .map(|item| item.qty.get())
            .sum();
        assert_eq!(checked_out + left, ADDS);
    }

    #[test]
    fn test_order_id_format() {
        let now = Utc::now();
        let id = generate_order_id(now);
        let parts: Vec<&str> = id.split('-').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ORD");
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), 8);
        assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit()));
    }
}
