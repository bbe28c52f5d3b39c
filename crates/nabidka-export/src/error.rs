//! # Export Error Types
//!
//! Every way an export can fail, each with its own user-facing message.
//!
//! ## Failure Points
//! ```text
//! export_quote
//!   │
//!   ├── no converter configured ──────► ConverterUnavailable   (no surface created)
//!   ├── render failed / not committed ─► CaptureTargetNotFound  (surface released)
//!   ├── converter failed ──────────────► Conversion             (surface released)
//!   └── artifact could not be written ─► Io
//! ```

use thiserror::Error;

/// Export pipeline errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// No PDF converter is available to the pipeline.
    #[error("PDF converter is not available")]
    ConverterUnavailable,

    /// The print area was not present on the surface after rendering.
    ///
    /// ## When This Occurs
    /// - The renderer failed
    /// - Rendering did not commit within the render timeout
    #[error("Print area not found after render: {reason}")]
    CaptureTargetNotFound { reason: String },

    /// The converter failed to produce a document.
    #[error("PDF conversion failed: {0}")]
    Conversion(String),

    /// Writing the finished artifact failed.
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Message shown to the user, in Czech.
    pub fn user_message(&self) -> &'static str {
        match self {
            ExportError::ConverterUnavailable => {
                "Chyba při generování PDF. Knihovna pro generování není načtena."
            }
            ExportError::CaptureTargetNotFound { .. } => {
                "Dokument pro PDF se nepodařilo připravit. Zkuste to prosím znovu."
            }
            ExportError::Conversion(_) => "Při generování PDF došlo k chybě.",
            ExportError::Io(_) => "PDF se nepodařilo uložit.",
        }
    }
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_user_messages_are_distinct() {
        let errors = [
            ExportError::ConverterUnavailable,
            ExportError::CaptureTargetNotFound {
                reason: "timeout".to_string(),
            },
            ExportError::Conversion("bad".to_string()),
            ExportError::Io(std::io::Error::other("disk")),
        ];

        let messages: HashSet<&str> = errors.iter().map(ExportError::user_message).collect();
        assert_eq!(messages.len(), errors.len());
    }
}
