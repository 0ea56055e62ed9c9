//! Checkout route handler.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use tracing::instrument;

use super::json_body;
use crate::error::Result;
use crate::models::Receipt;
use crate::services::CheckoutService;
use crate::state::AppState;

/// Body of `POST /api/checkout`.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Complete the order for the current cart.
///
/// POST /api/checkout
#[instrument(skip(state, payload))]
pub async fn checkout(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<Receipt>> {
    let request = json_body(payload)?;
    let receipt = CheckoutService::new(state.db())
        .checkout(request.name.as_deref(), request.email.as_deref())
        .await?;
    Ok(Json(receipt))
}
