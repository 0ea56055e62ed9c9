//! Product domain types.

use serde::{Deserialize, Serialize};

use pocket_shop_core::{Price, ProductId};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    /// Unique product ID, assigned at creation.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Display token for the product image (an emoji in the demo catalog).
    pub image: String,
}

/// A product that has not been inserted yet.
///
/// Also the shape of one entry in a YAML seed catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub image: String,
}
