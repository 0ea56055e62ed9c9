//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`.
//!
//! Every error body has the shape `{"error": <message>, "code": <code>}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::ShopError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// A service rejected the request or failed.
    #[error(transparent)]
    Shop(#[from] ShopError),

    /// The request could not be decoded (bad JSON body, non-numeric id).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route matched.
    #[error("Not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Shop(ShopError::InvalidInput(_) | ShopError::EmptyCart) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Shop(ShopError::NotFound(_)) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Shop(ShopError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Shop(ShopError::InvalidInput(_)) | Self::BadRequest(_) => "invalid_input",
            Self::Shop(ShopError::NotFound(_)) | Self::NotFound(_) => "not_found",
            Self::Shop(ShopError::EmptyCart) => "empty_cart",
            Self::Shop(ShopError::Storage(_)) => "storage_failure",
        }
    }

    /// Message shown to the client. Storage details are never exposed.
    fn public_message(&self) -> String {
        match self {
            Self::Shop(ShopError::Storage(_)) => "Internal server error".to_string(),
            Self::Shop(err) => err.to_string(),
            Self::BadRequest(msg) | Self::NotFound(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, code = self.code(), "Request rejected");
        }

        let body = ErrorBody {
            error: self.public_message(),
            code: self.code(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
