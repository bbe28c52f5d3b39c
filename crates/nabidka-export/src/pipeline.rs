//! # Export Pipeline
//!
//! Orchestrates a single quote export from model to PDF bytes.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  export_quote(&Quote)                                                   │
//! │                                                                         │
//! │  1. converter present?  ── no ──► ConverterUnavailable (no surface)     │
//! │  2. build document (logo decode) on the blocking pool                   │
//! │  3. attach off-screen surface  ◄── guard held from here on              │
//! │  4. lay out on the blocking pool                                        │
//! │       bounded by render_timeout ── miss ──► CaptureTargetNotFound       │
//! │  5. commit, wait settle_delay, capture print area                       │
//! │  6. convert ── error ──► propagate                                      │
//! │  7. guard dropped ──► surface released                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//!
//!  export_preview(&PreviewSurface): capture ──► convert
//!  (the caller keeps the visible surface)
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use nabidka_core::Quote;

use crate::document::{QuoteDocument, PLACEHOLDER_NUMBER};
use crate::error::{ExportError, ExportResult};
use crate::layout::{PageRenderer, PrintArea, Renderer};
use crate::options::ExportOptions;
use crate::pdf::{Converter, PdfConverter};
use crate::surface::{PreviewSurface, SurfaceRegistry};

/// Default pause between a committed render and its capture.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Default bound on how long layout may take before the surface is given up.
pub const DEFAULT_RENDER_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// Artifact
// =============================================================================

/// A finished export.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Writes the artifact into `dir` and returns the full path.
    pub async fn save_to(&self, dir: impl AsRef<Path>) -> ExportResult<PathBuf> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.file_name);
        tokio::fs::write(&path, &self.bytes).await?;
        info!(path = %path.display(), size = self.bytes.len(), "Export saved");
        Ok(path)
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Export pipeline shared by every export in the process.
#[derive(Clone)]
pub struct ExportPipeline {
    registry: SurfaceRegistry,
    renderer: Arc<dyn Renderer>,
    converter: Option<Arc<dyn Converter>>,
    options: ExportOptions,
    settle_delay: Duration,
    render_timeout: Duration,
}

impl Default for ExportPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportPipeline {
    /// Pipeline with the built-in renderer and PDF converter.
    pub fn new() -> Self {
        ExportPipeline {
            registry: SurfaceRegistry::new(),
            renderer: Arc::new(PageRenderer),
            converter: Some(Arc::new(PdfConverter)),
            options: ExportOptions::default(),
            settle_delay: DEFAULT_SETTLE_DELAY,
            render_timeout: DEFAULT_RENDER_TIMEOUT,
        }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Replaces the converter. `None` models a converter that failed to load.
    pub fn with_converter(mut self, converter: Option<Arc<dyn Converter>>) -> Self {
        self.converter = converter;
        self
    }

    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_render_timeout(mut self, timeout: Duration) -> Self {
        self.render_timeout = timeout;
        self
    }

    pub fn registry(&self) -> &SurfaceRegistry {
        &self.registry
    }

    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Exports `quote` through an isolated off-screen surface.
    pub async fn export_quote(&self, quote: &Quote) -> ExportResult<ExportArtifact> {
        let converter = self.converter.clone().ok_or_else(|| {
            error!("PDF converter is not available");
            ExportError::ConverterUnavailable
        })?;

        let file_name = ExportOptions::file_name(&quote.quote_number);
        info!(quote_number = %quote.quote_number, file = %file_name, "Starting export");

        let quote = quote.clone();
        let document = tokio::task::spawn_blocking(move || QuoteDocument::from_quote(&quote))
            .await
            .map_err(|join| ExportError::CaptureTargetNotFound {
                reason: join.to_string(),
            })?;

        let mut surface = self.registry.attach_offscreen();

        let area = self.render_bounded(document).await.map_err(|e| {
            error!(surface = surface.id(), error = %e, "Render did not commit");
            e
        })?;
        surface.commit(area);

        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }
        let area = surface.capture()?;
        let bytes = converter
            .convert(area, &self.options)
            .await
            .map_err(|e| {
                error!(error = %e, "Conversion failed");
                e
            })?;

        info!(file = %file_name, size = bytes.len(), "Export finished");
        Ok(ExportArtifact { file_name, bytes })
    }

    /// Exports what the visible preview currently shows.
    pub async fn export_preview(&self, preview: &PreviewSurface) -> ExportResult<ExportArtifact> {
        let converter = self
            .converter
            .clone()
            .ok_or(ExportError::ConverterUnavailable)?;

        let number = preview.document().quote_number.as_str();
        let number = if number == PLACEHOLDER_NUMBER { "" } else { number };
        let file_name = ExportOptions::file_name(number);
        debug!(file = %file_name, "Exporting preview surface");

        let bytes = converter.convert(preview.capture(), &self.options).await?;
        Ok(ExportArtifact { file_name, bytes })
    }

    /// Lays out the document, failing when it does not commit within the
    /// render timeout.
    async fn render_bounded(&self, document: QuoteDocument) -> ExportResult<PrintArea> {
        let renderer = Arc::clone(&self.renderer);
        let job = tokio::task::spawn_blocking(move || renderer.render(&document));

        match tokio::time::timeout(self.render_timeout, job).await {
            Ok(Ok(Ok(area))) => {
                debug!(height = area.height, ops = area.ops.len(), "Render committed");
                Ok(area)
            }
            Ok(Ok(Err(reason))) => Err(ExportError::CaptureTargetNotFound { reason }),
            Ok(Err(join)) => Err(ExportError::CaptureTargetNotFound {
                reason: join.to_string(),
            }),
            Err(_) => Err(ExportError::CaptureTargetNotFound {
                reason: format!("render did not commit within {:?}", self.render_timeout),
            }),
        }
    }
}
