//! # API Error Types
//!
//! Unified error handling for the HTTP layer.
//!
//! Every failure is contained to its request: missing entities become 404
//! with a domain message, bad input 400, and anything from an upstream
//! service a uniform 500 carrying the underlying message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use catalog_domain::DomainError;
use catalog_persistence::{FEATURED_PRODUCTS_ENTITY, PersistenceError};

/// API-level errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid UUID format: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("Persistence error: {0}")]
    Persistence(PersistenceError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiError {
    /// Get HTTP status code for this error
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) | Self::InvalidUuid(_) => StatusCode::BAD_REQUEST,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Response body for this error
    pub fn body(&self) -> ErrorBody {
        match self {
            Self::NotFound { entity_type, .. } if entity_type == FEATURED_PRODUCTS_ENTITY => {
                ErrorBody {
                    message: "No featured products found".to_string(),
                    error: None,
                }
            }
            Self::NotFound { entity_type, .. } => ErrorBody {
                message: format!("{entity_type} not found"),
                error: None,
            },
            Self::InvalidInput(msg) => ErrorBody {
                message: "Invalid input".to_string(),
                error: Some(msg.clone()),
            },
            Self::InvalidUuid(e) => ErrorBody {
                message: "Invalid product id".to_string(),
                error: Some(e.to_string()),
            },
            Self::Persistence(e) => ErrorBody {
                message: "Server error".to_string(),
                error: Some(e.to_string()),
            },
            Self::Internal(msg) => ErrorBody {
                message: "Server error".to_string(),
                error: Some(msg.clone()),
            },
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound { entity_type, key } => Self::NotFound {
                entity_type,
                id: key,
            },
            other => Self::Persistence(other),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            DomainError::InvalidPrice(price) => {
                Self::InvalidInput(format!("price must be a non-negative number, got {price}"))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, Json(self.body())).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
