//! Error types for the storefront
//!
//! Storage and catalog failures never reach the shop state: the persistence
//! accessors and the catalog client log them and degrade to empty results.
//! `ApiError` is what the HTTP layer reports back to a caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::shop::models::ProductId;

/// Failures of a key-value storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached or refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The key cannot be represented by this backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The stored value is not the JSON shape we expect.
    #[error("corrupt data under {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The value could not be serialized for writing.
    #[error("failed to serialize value for {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failures talking to the remote product catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("catalog request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("catalog returned {status} for {url}")]
    Status { url: String, status: StatusCode },

    #[error("catalog response from {url} could not be decoded: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Invalid configuration values read from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Errors returned by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    #[error("quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),

    #[error("cart is empty")]
    EmptyCart,

    #[error("shop state is unavailable")]
    StatePoisoned,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::ProductNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidQuantity(_) => StatusCode::BAD_REQUEST,
            ApiError::EmptyCart => StatusCode::CONFLICT,
            ApiError::StatePoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;
