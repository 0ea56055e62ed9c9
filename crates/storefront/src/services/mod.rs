//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `catalog` - Product listing
//! - `cart` - Add, update, remove, and list lines of the shared cart
//! - `checkout` - Turn the cart into a receipt and empty it
//!
//! Services borrow the [`Database`](crate::db::Database) handle for one call
//! and never keep rows between calls; every operation re-reads storage.

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use cart::{AddOutcome, CartService};
pub use catalog::CatalogService;
pub use checkout::CheckoutService;

use thiserror::Error;

use pocket_shop_core::PriceError;

use crate::db::RepositoryError;

/// Errors returned by storefront services.
#[derive(Debug, Error)]
pub enum ShopError {
    /// The caller sent a missing or malformed field.
    #[error("{0}")]
    InvalidInput(String),

    /// A referenced cart line or product does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Checkout was attempted with no lines in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The underlying read or write failed.
    #[error("storage failure: {0}")]
    Storage(#[from] RepositoryError),
}

impl ShopError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

impl From<PriceError> for ShopError {
    fn from(e: PriceError) -> Self {
        Self::InvalidInput(format!("Cart total cannot be computed: {e}"))
    }
}
