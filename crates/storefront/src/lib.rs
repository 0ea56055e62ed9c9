//! Pocket Shop storefront library.
//!
//! This crate provides the storefront API as a library, allowing the server
//! binary, the CLI and the integration tests to share one router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use std::time::Duration;

use axum::{
    Router,
    http::{HeaderValue, Request, Response},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::db::{Database, RepositoryError, seed};
use crate::state::AppState;

/// Build the full storefront application: routes, fallback and middleware.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(state.config().cors_origin.as_deref());

    Router::new()
        .merge(routes::routes())
        .fallback(routes::not_found)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
                    span.record("status", response.status().as_u16());
                    span.record(
                        "latency_ms",
                        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                    );
                    DefaultOnResponse::default().on_response(response, latency, span);
                }),
        )
        .layer(cors)
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Run migrations and, if `seed_catalog` is set, seed the demo catalog when
/// the product table is empty.
///
/// # Errors
///
/// Returns `RepositoryError` if a migration or the seed fails.
pub async fn prepare_database(db: &Database, seed_catalog: bool) -> Result<(), RepositoryError> {
    db.migrate().await?;
    tracing::info!("Database migrations applied");

    if seed_catalog {
        seed::seed_catalog(db, &seed::default_catalog()).await?;
    }
    Ok(())
}

/// Any origin unless one origin is configured.
fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let Some(origin) = origin else {
        return CorsLayer::permissive();
    };

    match HeaderValue::from_str(origin) {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(e) => {
            tracing::warn!(
                origin,
                error = %e,
                "Invalid CORS origin, cross-origin requests disabled"
            );
            CorsLayer::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::config::StorefrontConfig;

    async fn test_app() -> Router {
        let db = Database::in_memory().await.unwrap();
        prepare_database(&db, true).await.unwrap();
        app(AppState::new(StorefrontConfig::default(), db))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        let request = builder
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_products_are_seeded() {
        let app = test_app().await;
        let (status, json) = send(&app, Method::GET, "/api/products", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 8);
        assert_eq!(json[0]["name"], "Wireless Headphones");
        assert_eq!(json[0]["price"], 79.99);
    }

    #[tokio::test]
    async fn test_add_then_accumulate_messages() {
        let app = test_app().await;

        let (status, json) =
            send(&app, Method::POST, "/api/cart", Some(r#"{"productId":1}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Item added to cart");
        assert_eq!(json["qty"], 1);

        let body = r#"{"productId":1,"qty":2}"#;
        let (_, json) = send(&app, Method::POST, "/api/cart", Some(body)).await;
        assert_eq!(json["message"], "Cart updated");
        assert_eq!(json["qty"], 3);
    }

    #[tokio::test]
    async fn test_malformed_json_is_invalid_input() {
        let app = test_app().await;
        let (status, json) = send(&app, Method::POST, "/api/cart", Some("{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "invalid_input");
    }

    #[tokio::test]
    async fn test_non_numeric_line_id_is_invalid_input() {
        let app = test_app().await;
        let (status, json) = send(&app, Method::DELETE, "/api/cart/abc", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid cart item id");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = test_app().await;
        let (status, json) = send(&app, Method::GET, "/api/nope", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Route not found");
        assert_eq!(json["code"], "not_found");
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app().await;
        let (status, json) = send(&app, Method::GET, "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "OK");

        let (status, _) = send(&app, Method::GET, "/api/health/ready", None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
