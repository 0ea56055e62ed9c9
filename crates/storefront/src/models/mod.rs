//! Domain models for the storefront.
//!
//! These types are what the services return and what the API serializes.
//! Field names serialize as camelCase to match the storefront client.

pub mod cart;
pub mod product;
pub mod receipt;

pub use cart::{Cart, CartItem, CartLine};
pub use product::{NewProduct, Product};
pub use receipt::{Receipt, ReceiptItem};
