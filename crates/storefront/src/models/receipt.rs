//! Checkout receipt types.
//!
//! A receipt exists only in the checkout response; it is never persisted.

use chrono::{DateTime, Utc};
use serde::Serialize;

use pocket_shop_core::{Email, Price, Quantity};

/// One purchased line on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptItem {
    pub name: String,
    pub qty: Quantity,
    pub price: Price,
    pub subtotal: Price,
}

/// Summary of a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Order number, e.g. `ORD-1760450000000-9F3A62C1`.
    pub order_id: String,
    pub customer_name: String,
    pub customer_email: Email,
    pub items: Vec<ReceiptItem>,
    pub total: Price,
    pub timestamp: DateTime<Utc>,
}
