//! # Error Types
//!
//! Domain-specific error types for nabidka-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  nabidka-core errors (this file)                                       │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  nabidka-store errors (separate crate)                                 │
//! │  └── StoreError       - Persistence failures                           │
//! │                                                                         │
//! │  nabidka-export errors (separate crate)                                │
//! │  └── ExportError      - Render / capture / conversion failures         │
//! │                                                                         │
//! │  App errors                                                            │
//! │  └── ApiError         - What the presentation layer sees (serialized)  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Presentation           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Line item index does not exist in the quote being edited.
    ///
    /// ## When This Occurs
    /// - Removing a row that was already removed
    /// - A stale index from the presentation layer
    #[error("Line item {index} does not exist (quote has {len} items)")]
    LineItemOutOfRange { index: usize, len: usize },

    /// Embedded logo is not a `data:` URL this crate can interpret.
    #[error("Invalid logo image: {reason}")]
    InvalidLogo { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised at the save boundary, before anything reaches the Entity Store.
/// The store itself never validates.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Invalid format (e.g., invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::MustNotBeNegative { field }
            | ValidationError::NotFinite { field }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::LineItemOutOfRange { index: 3, len: 2 };
        assert_eq!(
            err.to_string(),
            "Line item 3 does not exist (quote has 2 items)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("postalCode");
        assert_eq!(err.to_string(), "postalCode is required");
        assert_eq!(err.field(), "postalCode");

        let err = ValidationError::MustNotBeNegative {
            field: "unitPrice".to_string(),
        };
        assert_eq!(err.to_string(), "unitPrice must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("name").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
