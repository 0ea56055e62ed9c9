//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /api/products       - Product catalog
//! GET    /api/cart           - Cart lines and total
//! POST   /api/cart           - Add a product (accumulates onto an existing line)
//! PUT    /api/cart/{id}      - Set the quantity of a line
//! DELETE /api/cart/{id}      - Remove a line
//! POST   /api/checkout       - Complete the order and empty the cart
//! GET    /api/health         - Liveness check
//! GET    /api/health/ready   - Readiness check (database reachable)
//! ```

pub mod cart;
pub mod checkout;
pub mod health;
pub mod products;

use axum::{
    Json, Router,
    extract::{
        Path,
        rejection::{JsonRejection, PathRejection},
    },
    routing::{get, post, put},
};

use pocket_shop_core::CartLineId;

use crate::error::AppError;
use crate::state::AppState;

/// Create the `/api` routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/cart", get(cart::show).post(cart::add))
        .route("/cart/{id}", put(cart::update).delete(cart::remove))
        .route("/checkout", post(checkout::checkout))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Handler for unmatched routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

/// Unwrap a JSON body, turning a rejection into an `invalid_input` error.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        AppError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    })
}

/// Unwrap a `{id}` path segment as a cart line id.
fn line_id(path: Result<Path<i64>, PathRejection>) -> Result<CartLineId, AppError> {
    path.map(|Path(id)| CartLineId::new(id))
        .map_err(|_| AppError::BadRequest("Invalid cart item id".to_string()))
}
