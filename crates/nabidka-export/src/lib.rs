//! # nabidka-export: Document Export for Nabídka
//!
//! Turns a quote into the printable document shown in the preview and into
//! a paginated PDF.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Nabídka Export Flow                              │
//! │                                                                         │
//! │  Command (export_quote)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  nabidka-export (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────┐   ┌──────────────┐   ┌──────────────────┐   │   │
//! │  │   │ QuoteDocument│──►│  Renderer    │──►│  Surface         │   │   │
//! │  │   │ (document.rs)│   │ (layout.rs)  │   │  (surface.rs)    │   │   │
//! │  │   └──────────────┘   └──────────────┘   └────────┬─────────┘   │   │
//! │  │                                                  │ capture      │   │
//! │  │   ┌──────────────┐                    ┌──────────▼─────────┐   │   │
//! │  │   │ExportPipeline│───────────────────►│  Converter (pdf/)  │   │   │
//! │  │   │(pipeline.rs) │                    │  A4, 0.5 in, JPEG  │   │   │
//! │  │   └──────────────┘                    └────────────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Nabidka-<number>.pdf                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pipeline`] - Export orchestration and artifacts
//! - [`document`] - Presentation model shared by preview and export
//! - [`layout`] - Canvas layout of a document
//! - [`surface`] - Off-screen and preview surfaces
//! - [`pdf`] - PDF conversion
//! - [`font`] - Base-14 font metrics and Czech text encoding
//! - [`options`] - Page and image settings
//! - [`error`] - Export error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nabidka_export::ExportPipeline;
//!
//! let pipeline = ExportPipeline::new();
//! let artifact = pipeline.export_quote(&quote).await?;
//! artifact.save_to("/tmp").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod error;
pub mod font;
pub mod layout;
pub mod options;
pub mod pdf;
pub mod pipeline;
pub mod surface;

// =============================================================================
// Re-exports
// =============================================================================

pub use document::{LogoImage, QuoteDocument};
pub use error::{ExportError, ExportResult};
pub use layout::{PageRenderer, PrintArea, Renderer};
pub use options::{ExportOptions, Orientation, PageFormat};
pub use pdf::{Converter, PdfConverter};
pub use pipeline::{ExportArtifact, ExportPipeline, DEFAULT_RENDER_TIMEOUT, DEFAULT_SETTLE_DELAY};
pub use surface::{PreviewSurface, SurfaceRegistry};
