//! Product route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::Result;
use crate::models::Product;
use crate::services::CatalogService;
use crate::state::AppState;

/// List every product in the catalog.
///
/// GET /api/products
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = CatalogService::new(state.db()).list_products().await?;
    Ok(Json(products))
}
