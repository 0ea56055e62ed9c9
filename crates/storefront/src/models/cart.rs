//! Cart domain types.

use serde::Serialize;

use pocket_shop_core::{CartLineId, Price, PriceError, ProductId, Quantity};

/// One row of the shared cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: CartLineId,
    pub product_id: ProductId,
    pub qty: Quantity,
}

/// A cart line joined with its product's display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartLineId,
    pub product_id: ProductId,
    pub qty: Quantity,
    pub name: String,
    pub price: Price,
    pub image: String,
}

impl CartItem {
    /// Price of the whole line (`price × qty`).
    ///
    /// # Errors
    ///
    /// Returns `PriceError::OutOfRange` if the product overflows.
    pub fn line_total(&self) -> Result<Price, PriceError> {
        self.price.times(self.qty)
    }
}

/// The current cart contents with the computed total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub total: Price,
}

impl Cart {
    /// Build a cart from its items, computing `total = Σ(price × qty)`.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::OutOfRange` if a line total or the sum overflows.
    pub fn from_items(items: Vec<CartItem>) -> Result<Self, PriceError> {
        let line_totals = items
            .iter()
            .map(CartItem::line_total)
            .collect::<Result<Vec<_>, _>>()?;
        let total = Price::total(line_totals)?;
        Ok(Self { items, total })
    }

    /// Returns true if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn item(id: i64, cents: i64, qty: i64) -> CartItem {
        CartItem {
            id: CartLineId::new(id),
            product_id: ProductId::new(id),
            qty: Quantity::new(qty).unwrap(),
            name: format!("Product {id}"),
            price: Price::from_cents(cents).unwrap(),
            image: String::new(),
        }
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = Cart::from_items(Vec::new()).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total, Price::ZERO);
    }

    #[test]
    fn test_total_sums_line_totals() {
        let cart = Cart::from_items(vec![item(1, 1000, 2), item(2, 500, 1)]).unwrap();
        assert_eq!(cart.total.to_cents().unwrap(), 2500);
    }

    #[test]
    fn test_total_of_largest_lines_is_computed() {
        let most = i64::from(Quantity::MAX);
        let cart = Cart::from_items(vec![
            item(1, Price::MAX_CENTS, most),
            item(2, Price::MAX_CENTS, most),
        ])
        .unwrap();
        assert!(cart.total > cart.items[0].line_total().unwrap());
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let json = serde_json::to_value(item(3, 2499, 4)).unwrap();
        assert_eq!(json["productId"], 3);
        assert_eq!(json["qty"], 4);
        assert_eq!(json["price"], 24.99);
    }
}
