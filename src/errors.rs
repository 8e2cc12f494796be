//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion. Every error renders as
//! `{ "message", "code", "cause" }` where `code` mirrors the HTTP status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{
    CAUSE_ACCESS_DENIED, CAUSE_AUTHENTICATION_REQUIRED, CAUSE_DATABASE_ERROR,
    CAUSE_INVALID_CREDENTIALS, CAUSE_INVALID_PARAMETERS, CAUSE_SERVER_ERROR,
};

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Business rule failures
    #[error("{message}")]
    NotFound { message: String, cause: &'static str },

    #[error("{message}")]
    Conflict { message: String, cause: &'static str },

    // Validation
    #[error("{0}")]
    Validation(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal { cause: &'static str, detail: String },
}

/// Error response body
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
    pub code: u16,
    pub cause: String,
}

impl AppError {
    /// Get cause code for client
    pub fn cause(&self) -> &'static str {
        match self {
            AppError::Unauthorized | AppError::Jwt(_) => CAUSE_AUTHENTICATION_REQUIRED,
            AppError::Forbidden => CAUSE_ACCESS_DENIED,
            AppError::InvalidCredentials => CAUSE_INVALID_CREDENTIALS,
            AppError::NotFound { cause, .. } | AppError::Conflict { cause, .. } => cause,
            AppError::Validation(_) => CAUSE_INVALID_PARAMETERS,
            AppError::Database(_) => CAUSE_DATABASE_ERROR,
            AppError::Internal { cause, .. } => cause,
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials | AppError::Jwt(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            // Hide details for internal/security errors
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Internal server error".to_string()
            }
            AppError::Jwt(e) => {
                tracing::debug!("JWT error: {:?}", e);
                "Invalid or expired token".to_string()
            }
            AppError::Internal { cause, detail } => {
                tracing::error!(cause = %cause, "Internal error: {}", detail);
                "Internal server error".to_string()
            }

            // Business and validation messages are safe to show
            _ => self.to_string(),
        }
    }

    /// Render the wire body for this error.
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            message: self.user_message(),
            code: self.status().as_u16(),
            cause: self.cause().to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait tagging unexpected failures at a use-case boundary.
///
/// Business errors pass through untouched; persistence and untagged
/// internal failures become `Internal` with the operation's cause code.
pub trait ResultExt<T> {
    fn or_internal(self, cause: &'static str) -> AppResult<T>;
}

impl<T> ResultExt<T> for AppResult<T> {
    fn or_internal(self, cause: &'static str) -> AppResult<T> {
        self.map_err(|err| match err {
            AppError::Database(e) => AppError::Internal {
                cause,
                detail: e.to_string(),
            },
            AppError::Internal {
                cause: CAUSE_SERVER_ERROR,
                detail,
            } => AppError::Internal { cause, detail },
            other => other,
        })
    }
}

/// Convenience constructors
impl AppError {
    pub fn not_found(message: impl Into<String>, cause: &'static str) -> Self {
        AppError::NotFound {
            message: message.into(),
            cause,
        }
    }

    pub fn conflict(message: impl Into<String>, cause: &'static str) -> Self {
        AppError::Conflict {
            message: message.into(),
            cause,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal {
            cause: CAUSE_SERVER_ERROR,
            detail: msg.into(),
        }
    }
}
