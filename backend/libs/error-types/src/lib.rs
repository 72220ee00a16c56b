//! Shared error taxonomy for the Chirp backend services.
//!
//! Every core operation returns [`ServiceResult`]. Client-facing variants carry a
//! message that is safe to show to the caller; [`ServiceError::Persistence`] carries
//! internal detail that is logged but never rendered into a response body.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Self-follow, unfollow without an edge, empty required field
    #[error("Validation error: {0}")]
    Validation(String),

    /// Duplicate follow edge, duplicate like
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Visibility denied for a private account
    #[error("Privacy error: {0}")]
    Privacy(String),

    /// Storage unavailable or misbehaving. Not a domain condition.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ServiceError::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        ServiceError::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ServiceError::NotFound(msg.into())
    }

    pub fn privacy(msg: impl Into<String>) -> Self {
        ServiceError::Privacy(msg.into())
    }

    /// Stable machine-readable kind, used in response bodies and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => error_codes::VALIDATION,
            ServiceError::Conflict(_) => error_codes::CONFLICT,
            ServiceError::NotFound(_) => error_codes::NOT_FOUND,
            ServiceError::Privacy(_) => error_codes::PRIVACY,
            ServiceError::Persistence(_) => error_codes::PERSISTENCE,
        }
    }

    /// Client-facing errors are returned to the caller as-is
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ServiceError::Persistence(_))
    }

    fn detail(&self) -> &str {
        match self {
            ServiceError::Validation(msg)
            | ServiceError::Conflict(msg)
            | ServiceError::NotFound(msg)
            | ServiceError::Privacy(msg)
            | ServiceError::Persistence(msg) => msg,
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return ServiceError::Conflict("Resource already exists".to_string());
            }
            if db_err.is_foreign_key_violation() {
                return ServiceError::NotFound("Referenced resource does not exist".to_string());
            }
            if db_err.is_check_violation() {
                return ServiceError::Validation("Constraint check failed".to_string());
            }
        }
        ServiceError::Persistence(err.to_string())
    }
}

pub mod error_codes {
    pub const VALIDATION: &str = "VALIDATION_ERROR";
    pub const CONFLICT: &str = "CONFLICT";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const PRIVACY: &str = "PRIVACY_ERROR";
    pub const PERSISTENCE: &str = "INTERNAL_ERROR";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
}

/// JSON body of every error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status: u16,
}

impl ErrorResponse {
    pub fn new(error: &str, message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            status: status.as_u16(),
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Privacy(_) => StatusCode::FORBIDDEN,
            ServiceError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = if self.is_client_error() {
            self.detail().to_string()
        } else {
            tracing::error!(error = %self.detail(), "Persistence failure while handling request");
            "Internal server error".to_string()
        };

        HttpResponse::build(status).json(ErrorResponse::new(self.kind(), message, status))
    }
}
