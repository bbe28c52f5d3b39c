//! # Render Surfaces
//!
//! A surface is the place a document is mounted and laid out before it is
//! captured. Two kinds exist:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OffscreenSurface                  PreviewSurface                       │
//! │  ─────────────────                 ──────────────                       │
//! │  created per export                owned by the caller                  │
//! │  invisible, inert, 210 mm wide     visible, printable as-is             │
//! │  registered in SurfaceRegistry     not registered                       │
//! │  released on Drop (every path)     lives as long as the caller wants    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The registry is shared by concurrent exports. Each export attaches its
//! own surface; dropping the guard detaches it, so a failed or panicking
//! export cannot leak one.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::document::QuoteDocument;
use crate::error::{ExportError, ExportResult};
use crate::layout::{PrintArea, Renderer, CANVAS_WIDTH};
use crate::options::POINTS_PER_MM;

// =============================================================================
// Surface Style
// =============================================================================

/// Presentation properties of a mounted surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceStyle {
    pub opacity: f32,
    /// Whether the surface reacts to pointer input.
    pub pointer_events: bool,
    /// Whether focus traversal can reach the surface.
    pub focusable: bool,
    /// Offset of the surface's top-left corner from the viewport, in mm.
    pub left_mm: f64,
    pub top_mm: f64,
    pub width_mm: f64,
}

impl SurfaceStyle {
    /// Invisible, inert, out of the tab order and outside the viewport.
    pub fn offscreen() -> Self {
        SurfaceStyle {
            opacity: 0.0,
            pointer_events: false,
            focusable: false,
            left_mm: -10_000.0,
            top_mm: 0.0,
            width_mm: CANVAS_WIDTH / POINTS_PER_MM,
        }
    }

    /// A normal, visible surface.
    pub fn visible() -> Self {
        SurfaceStyle {
            opacity: 1.0,
            pointer_events: true,
            focusable: true,
            left_mm: 0.0,
            top_mm: 0.0,
            width_mm: CANVAS_WIDTH / POINTS_PER_MM,
        }
    }
}

// =============================================================================
// Registry
// =============================================================================

pub type SurfaceId = u64;

#[derive(Debug, Default)]
struct RegistryInner {
    attached: Mutex<HashMap<SurfaceId, SurfaceStyle>>,
    next_id: AtomicU64,
    created: AtomicU64,
}

/// The set of currently attached off-screen surfaces.
#[derive(Debug, Clone, Default)]
pub struct SurfaceRegistry {
    inner: Arc<RegistryInner>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a new off-screen surface and returns its guard.
    pub fn attach_offscreen(&self) -> OffscreenSurface {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let style = SurfaceStyle::offscreen();
        self.inner.attached.lock().insert(id, style.clone());
        self.inner.created.fetch_add(1, Ordering::Relaxed);
        debug!(surface = id, "Attached off-screen surface");

        OffscreenSurface {
            id,
            style,
            registry: self.clone(),
            print_area: None,
        }
    }

    fn detach(&self, id: SurfaceId) {
        if self.inner.attached.lock().remove(&id).is_some() {
            debug!(surface = id, "Released off-screen surface");
        }
    }

    /// Number of surfaces attached right now.
    pub fn attached_count(&self) -> usize {
        self.inner.attached.lock().len()
    }

    /// Number of surfaces ever attached.
    pub fn created_count(&self) -> u64 {
        self.inner.created.load(Ordering::Relaxed)
    }

    /// Style of an attached surface.
    pub fn style_of(&self, id: SurfaceId) -> Option<SurfaceStyle> {
        self.inner.attached.lock().get(&id).cloned()
    }
}

// =============================================================================
// Off-screen Surface
// =============================================================================

/// An attached off-screen surface. Detaches itself when dropped.
#[derive(Debug)]
pub struct OffscreenSurface {
    id: SurfaceId,
    style: SurfaceStyle,
    registry: SurfaceRegistry,
    print_area: Option<Arc<PrintArea>>,
}

impl OffscreenSurface {
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn style(&self) -> &SurfaceStyle {
        &self.style
    }

    /// Records the committed render.
    pub fn commit(&mut self, area: PrintArea) {
        self.print_area = Some(Arc::new(area));
    }

    /// Returns the print area, or `CaptureTargetNotFound` if nothing committed.
    pub fn capture(&self) -> ExportResult<Arc<PrintArea>> {
        self.print_area
            .clone()
            .ok_or_else(|| ExportError::CaptureTargetNotFound {
                reason: "surface has no committed print area".to_string(),
            })
    }
}

impl Drop for OffscreenSurface {
    fn drop(&mut self) {
        self.registry.detach(self.id);
    }
}

// =============================================================================
// Preview Surface
// =============================================================================

/// The visible preview. It is also the print surface: capturing it yields
/// exactly what the user sees.
#[derive(Debug)]
pub struct PreviewSurface {
    style: SurfaceStyle,
    document: QuoteDocument,
    print_area: Arc<PrintArea>,
}

impl PreviewSurface {
    /// Mounts `document` and renders it synchronously.
    pub fn mount(document: QuoteDocument, renderer: &dyn Renderer) -> ExportResult<Self> {
        let area = renderer
            .render(&document)
            .map_err(|reason| ExportError::CaptureTargetNotFound { reason })?;

        Ok(PreviewSurface {
            style: SurfaceStyle::visible(),
            document,
            print_area: Arc::new(area),
        })
    }

    pub fn style(&self) -> &SurfaceStyle {
        &self.style
    }

    pub fn document(&self) -> &QuoteDocument {
        &self.document
    }

    /// The print area as currently rendered.
    pub fn capture(&self) -> Arc<PrintArea> {
        Arc::clone(&self.print_area)
    }
}
