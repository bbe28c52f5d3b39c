//! # API Error Type
//!
//! Unified error type for application commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Nabídka                                │
//! │                                                                         │
//! │  Command Function: Result<T, ApiError>                                  │
//! │         │                                                               │
//! │         ├── ValidationError ──────────► VALIDATION_ERROR                │
//! │         ├── CoreError ────────────────► VALIDATION_ERROR                │
//! │         ├── StoreError::NotFound ─────► NOT_FOUND                       │
//! │         ├── StoreError::* ────────────► STORAGE_ERROR  (detail logged)  │
//! │         ├── ExportError ──────────────► EXPORT_ERROR   (user message)   │
//! │         └── anything else ────────────► INTERNAL                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Serialized form:
//! ```json
//! { "code": "NOT_FOUND", "message": "Quote not found: id_1718000000000_abc" }
//! ```

use serde::Serialize;

use nabidka_core::{CoreError, ValidationError};
use nabidka_export::ExportError;
use nabidka_store::StoreError;

/// API error returned from commands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Entity not found
    NotFound,

    /// Input rejected at the save boundary
    ValidationError,

    /// Persistence failed
    StorageError,

    /// Document export failed
    ExportError,

    /// Anything else
    Internal,
}

/// Result type alias for commands.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            other => ApiError::validation(other.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            StoreError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Database connection failed")
            }
            StoreError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Database migration failed")
            }
            other => {
                tracing::error!("Storage operation failed: {}", other);
                ApiError::new(ErrorCode::StorageError, "Data could not be saved")
            }
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        tracing::error!("Export failed: {}", err);
        ApiError::new(ErrorCode::ExportError, err.user_message())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
