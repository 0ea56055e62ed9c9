//! Cart route handlers.
//!
//! There is a single cart shared by all clients; no session is involved.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use pocket_shop_core::{CartLineId, ProductId, Quantity};

use super::{json_body, line_id};
use crate::error::Result;
use crate::models::Cart;
use crate::services::CartService;
use crate::state::AppState;

/// Body of `POST /api/cart`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: Option<ProductId>,
    pub qty: Option<i64>,
}

/// Response from adding to the cart.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartResponse {
    pub message: &'static str,
    pub id: CartLineId,
    pub product_id: ProductId,
    pub qty: Quantity,
}

/// Body of `PUT /api/cart/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub qty: Option<i64>,
}

/// Response from updating a line.
#[derive(Debug, Serialize)]
pub struct UpdateCartResponse {
    pub message: &'static str,
    pub id: CartLineId,
    pub qty: Quantity,
}

/// Response from removing a line.
#[derive(Debug, Serialize)]
pub struct RemoveCartResponse {
    pub message: &'static str,
    pub id: CartLineId,
}

/// Show the cart with its total.
///
/// GET /api/cart
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<Cart>> {
    let cart = CartService::new(state.db()).list_cart().await?;
    Ok(Json(cart))
}

/// Add a product to the cart.
///
/// POST /api/cart
#[instrument(skip(state, payload))]
pub async fn add(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AddToCartRequest>, JsonRejection>,
) -> Result<Json<AddToCartResponse>> {
    let request = json_body(payload)?;
    let outcome = CartService::new(state.db())
        .add_to_cart(request.product_id, request.qty)
        .await?;

    let message = if outcome.created {
        "Item added to cart"
    } else {
        "Cart updated"
    };

    Ok(Json(AddToCartResponse {
        message,
        id: outcome.line.id,
        product_id: outcome.line.product_id,
        qty: outcome.line.qty,
    }))
}

/// Set the quantity of a cart line.
///
/// PUT /api/cart/{id}
#[instrument(skip(state, path, payload))]
pub async fn update(
    State(state): State<AppState>,
    path: std::result::Result<Path<i64>, PathRejection>,
    payload: std::result::Result<Json<UpdateCartRequest>, JsonRejection>,
) -> Result<Json<UpdateCartResponse>> {
    let id = line_id(path)?;
    let request = json_body(payload)?;
    let qty = CartService::new(state.db())
        .update_qty(id, request.qty)
        .await?;

    Ok(Json(UpdateCartResponse {
        message: "Cart item updated",
        id,
        qty,
    }))
}

/// Remove a line from the cart.
///
/// DELETE /api/cart/{id}
#[instrument(skip(state, path))]
pub async fn remove(
    State(state): State<AppState>,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<RemoveCartResponse>> {
    let id = line_id(path)?;
    CartService::new(state.db()).remove_line(id).await?;

    Ok(Json(RemoveCartResponse {
        message: "Item removed from cart",
        id,
    }))
}
