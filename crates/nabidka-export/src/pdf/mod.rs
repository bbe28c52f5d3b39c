//! # PDF Conversion
//!
//! Converts a captured print area into a paginated PDF.
//!
//! ## Architecture
//! ```text
//! PrintArea (canvas points, unpaginated)
//!     ↓
//! [paginate] slice the canvas into page-height bands
//!     ↓
//! [ContentStreamBuilder] one operator stream per page, clipped to margins
//!     ↓
//! [PdfWriter] catalog, pages, fonts, logo XObject, info
//!     ↓
//! [ObjectSerializer]
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Page Geometry
//! ```text
//! ┌──────────── page (A4 portrait) ────────────┐
//! │ margin 0.5 in                               │
//! │   ┌───────── content box ──────────┐        │
//! │   │ canvas band i, scaled by       │        │
//! │   │ s = content_width / canvas_w   │        │
//! │   └────────────────────────────────┘        │
//! └─────────────────────────────────────────────┘
//! band height (canvas units) = content_height / s
//! ```

use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage};
use tracing::{debug, warn};

use crate::error::{ExportError, ExportResult};
use crate::font::{Face, CZECH_DIFFERENCES};
use crate::layout::{DrawOp, PrintArea};
use crate::options::ExportOptions;

pub mod content;
pub mod writer;

pub use content::ContentStreamBuilder;
pub use writer::{ObjectSerializer, PdfObject, PdfWriter};

const LOGO_RESOURCE: &str = "Im1";

/// Turns a print area into document bytes.
#[async_trait]
pub trait Converter: Send + Sync {
    async fn convert(&self, area: Arc<PrintArea>, options: &ExportOptions) -> ExportResult<Vec<u8>>;
}

/// The built-in PDF converter. Work runs on the blocking pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfConverter;

#[async_trait]
impl Converter for PdfConverter {
    async fn convert(&self, area: Arc<PrintArea>, options: &ExportOptions) -> ExportResult<Vec<u8>> {
        let options = options.clone();
        tokio::task::spawn_blocking(move || render_pdf(&area, &options))
            .await
            .map_err(|e| ExportError::Conversion(e.to_string()))?
    }
}

/// Page geometry derived from the options and the canvas width.
#[derive(Debug, Clone, Copy)]
struct Geometry {
    page_w: f64,
    page_h: f64,
    margin: f64,
    scale: f64,
    band: f64,
}

impl Geometry {
    fn new(area: &PrintArea, options: &ExportOptions) -> ExportResult<Self> {
        let (page_w, page_h) = options.page_size();
        let margin = options.margin_points();
        let content_w = page_w - 2.0 * margin;
        let content_h = page_h - 2.0 * margin;

        if content_w <= 0.0 || content_h <= 0.0 || area.width <= 0.0 {
            return Err(ExportError::Conversion(
                "margins leave no printable area".to_string(),
            ));
        }

        let scale = content_w / area.width;
        Ok(Geometry {
            page_w,
            page_h,
            margin,
            scale,
            band: content_h / scale,
        })
    }

    fn page_count(&self, height: f64) -> usize {
        ((height / self.band).ceil() as usize).max(1)
    }

    fn x(&self, x: f64) -> f64 {
        self.margin + x * self.scale
    }

    /// Canvas `y` on band `page` to PDF `y`.
    fn y(&self, y: f64, page: usize) -> f64 {
        self.page_h - self.margin - (y - page as f64 * self.band) * self.scale
    }
}

/// Produces the PDF bytes for `area`.
pub fn render_pdf(area: &PrintArea, options: &ExportOptions) -> ExportResult<Vec<u8>> {
    let geometry = Geometry::new(area, options)?;
    let page_count = geometry.page_count(area.height);

    let mut writer = PdfWriter::new();
    let catalog = writer.reserve();
    let pages = writer.reserve();

    let encoding = writer.add(encoding_dictionary());
    let regular = writer.add(font_dictionary(Face::Regular, encoding));
    let bold = writer.add(font_dictionary(Face::Bold, encoding));

    let logo_op = area.ops.iter().find_map(|op| match op {
        DrawOp::Logo { w, h, .. } => Some((*w, *h)),
        _ => None,
    });
    let logo = match (&area.logo, logo_op) {
        (Some(logo), Some((w, h))) => {
            let target = (
                w * geometry.scale * f64::from(options.capture_scale),
                h * geometry.scale * f64::from(options.capture_scale),
            );
            match encode_logo(&logo.image, target, options.jpeg_quality()) {
                Ok(object) => Some(writer.add(object)),
                Err(err) => {
                    warn!(error = %err, "Logo could not be encoded, exporting without it");
                    None
                }
            }
        }
        _ => None,
    };

    let mut resources = vec![(
        "Font".to_string(),
        PdfObject::dict([("F1", PdfObject::Ref(regular)), ("F2", PdfObject::Ref(bold))]),
    )];
    if let Some(logo) = logo {
        resources.push((
            "XObject".to_string(),
            PdfObject::dict([(LOGO_RESOURCE, PdfObject::Ref(logo))]),
        ));
    }
    let resources = PdfObject::Dict(resources);

    let mut kids = Vec::with_capacity(page_count);
    for page in 0..page_count {
        let stream = page_content(area, &geometry, page, logo.is_some());
        let contents = writer.add(PdfObject::Stream {
            dict: vec![],
            data: stream,
        });
        let page_id = writer.add(PdfObject::dict([
            ("Type", PdfObject::name("Page")),
            ("Parent", PdfObject::Ref(pages)),
            (
                "MediaBox",
                PdfObject::Array(vec![
                    PdfObject::Int(0),
                    PdfObject::Int(0),
                    PdfObject::Real(geometry.page_w),
                    PdfObject::Real(geometry.page_h),
                ]),
            ),
            ("Resources", resources.clone()),
            ("Contents", PdfObject::Ref(contents)),
        ]));
        kids.push(PdfObject::Ref(page_id));
    }

    writer.set(
        pages,
        PdfObject::dict([
            ("Type", PdfObject::name("Pages")),
            ("Count", PdfObject::Int(page_count as i64)),
            ("Kids", PdfObject::Array(kids)),
        ]),
    );
    writer.set(
        catalog,
        PdfObject::dict([
            ("Type", PdfObject::name("Catalog")),
            ("Pages", PdfObject::Ref(pages)),
        ]),
    );
    let info = writer.add(PdfObject::dict([
        ("Title", PdfObject::Text(area.title.clone())),
        ("Producer", PdfObject::Str(b"nabidka".to_vec())),
    ]));

    debug!(pages = page_count, has_logo = logo.is_some(), "PDF assembled");
    Ok(writer.finish(catalog, Some(info)))
}

fn page_content(area: &PrintArea, g: &Geometry, page: usize, has_logo: bool) -> Vec<u8> {
    let band_top = page as f64 * g.band;
    let band_bottom = band_top + g.band;

    let mut stream = ContentStreamBuilder::new();
    stream.save().clip_rect(
        g.margin,
        g.margin,
        g.page_w - 2.0 * g.margin,
        g.page_h - 2.0 * g.margin,
    );

    for op in &area.ops {
        let (top, bottom) = op.extent();
        if bottom <= band_top || top >= band_bottom {
            continue;
        }

        match op {
            DrawOp::Text { x, y, size, face, gray, text } => {
                stream.text(*face, size * g.scale, g.x(*x), g.y(*y, page), *gray, text);
            }
            DrawOp::Rule { x1, x2, y, width, gray } => {
                let y = g.y(*y, page);
                stream.line(g.x(*x1), y, g.x(*x2), y, width * g.scale, *gray);
            }
            DrawOp::Fill { x, y, w, h, gray } => {
                stream.fill_rect(g.x(*x), g.y(y + h, page), w * g.scale, h * g.scale, *gray);
            }
            DrawOp::Logo { x, y, w, h } if has_logo => {
                stream.image(LOGO_RESOURCE, g.x(*x), g.y(y + h, page), w * g.scale, h * g.scale);
            }
            DrawOp::Logo { .. } => {}
        }
    }

    stream.restore();
    stream.finish()
}

fn encoding_dictionary() -> PdfObject {
    let mut differences = Vec::with_capacity(CZECH_DIFFERENCES.len() * 2);
    for (code, _, glyph) in CZECH_DIFFERENCES {
        differences.push(PdfObject::Int(i64::from(code)));
        differences.push(PdfObject::name(glyph));
    }
    PdfObject::dict([
        ("Type", PdfObject::name("Encoding")),
        ("BaseEncoding", PdfObject::name("WinAnsiEncoding")),
        ("Differences", PdfObject::Array(differences)),
    ])
}

fn font_dictionary(face: Face, encoding: writer::ObjectId) -> PdfObject {
    PdfObject::dict([
        ("Type", PdfObject::name("Font")),
        ("Subtype", PdfObject::name("Type1")),
        ("BaseFont", PdfObject::name(face.base_font())),
        ("Encoding", PdfObject::Ref(encoding)),
    ])
}

/// Re-encodes the logo as a JPEG image XObject.
///
/// The image is downscaled to `target` pixels when it is larger, never
/// upscaled. Transparency is flattened onto white.
fn encode_logo(image: &DynamicImage, target: (f64, f64), quality: u8) -> ExportResult<PdfObject> {
    let target_w = target.0.round().max(1.0) as u32;
    let target_h = target.1.round().max(1.0) as u32;

    let resized;
    let source = if image.width() > target_w && image.height() > target_h {
        resized = image.resize_exact(target_w, target_h, FilterType::Lanczos3);
        &resized
    } else {
        image
    };

    let rgb = flatten_on_white(source);
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(Cursor::new(&mut jpeg), quality)
        .encode_image(&rgb)
        .map_err(|e| ExportError::Conversion(e.to_string()))?;

    Ok(PdfObject::Stream {
        dict: vec![
            ("Type".to_string(), PdfObject::name("XObject")),
            ("Subtype".to_string(), PdfObject::name("Image")),
            ("Width".to_string(), PdfObject::Int(i64::from(rgb.width()))),
            ("Height".to_string(), PdfObject::Int(i64::from(rgb.height()))),
            ("ColorSpace".to_string(), PdfObject::name("DeviceRGB")),
            ("BitsPerComponent".to_string(), PdfObject::Int(8)),
            ("Filter".to_string(), PdfObject::name("DCTDecode")),
        ],
        data: jpeg,
    })
}

fn flatten_on_white(image: &DynamicImage) -> RgbImage {
    let rgba = image.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = u16::from(a);
        let blend = |c: u8| ((u16::from(c) * alpha + 255 * (255 - alpha)) / 255) as u8;
        out.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    out
}
