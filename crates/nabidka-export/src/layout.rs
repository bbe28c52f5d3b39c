//! # Layout
//!
//! Lays a [`QuoteDocument`] out on a fixed-width canvas (210 mm, the width
//! of an A4 sheet). The result is the **print area**: a list of drawing
//! operations in canvas points, measured top-down, plus the total height.
//!
//! ```text
//!   x ──►  (0 .. 595.28 pt)
//! y ┌─────────────────────────┐
//! │ │ padding                 │
//! ▼ │   header                │
//!   │   parties               │
//!   │   table                 │
//!   │   totals                │
//!   │   notes / terms         │
//!   │   footer                │
//!   └─────────────────────────┘ height
//! ```
//!
//! The canvas is unpaginated. Page slicing happens in the converter.

use crate::document::{LogoImage, QuoteDocument, COLUMNS, FOOTER, NO_ITEMS, TITLE};
use crate::font::{text_width, wrap, Face};
use crate::options::POINTS_PER_MM;

/// Canvas width: 210 mm.
pub const CANVAS_WIDTH: f64 = 210.0 * POINTS_PER_MM;

const PADDING: f64 = 32.0;
const LOGO_MAX_HEIGHT: f64 = 56.0;
const LOGO_MAX_WIDTH: f64 = 180.0;
const CELL_PADDING: f64 = 8.0;

// Gray levels, 0 = black, 1 = white.
const INK: f32 = 0.12;
const MUTED: f32 = 0.42;
const FAINT: f32 = 0.62;
const RULE: f32 = 0.88;
const SHADE: f32 = 0.97;

/// Horizontal anchoring of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

/// One drawing operation on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Text with its baseline at `y`; `x` is already resolved for alignment.
    Text {
        x: f64,
        y: f64,
        size: f64,
        face: Face,
        gray: f32,
        text: String,
    },
    /// Horizontal line.
    Rule { x1: f64, x2: f64, y: f64, width: f64, gray: f32 },
    /// Filled rectangle, `y` is the top edge.
    Fill { x: f64, y: f64, w: f64, h: f64, gray: f32 },
    /// The logo, `y` is the top edge.
    Logo { x: f64, y: f64, w: f64, h: f64 },
}

impl DrawOp {
    /// Vertical extent `(top, bottom)` on the canvas.
    pub fn extent(&self) -> (f64, f64) {
        match self {
            DrawOp::Text { y, size, .. } => (y - size, y + size * 0.25),
            DrawOp::Rule { y, width, .. } => (y - width / 2.0, y + width / 2.0),
            DrawOp::Fill { y, h, .. } | DrawOp::Logo { y, h, .. } => (*y, y + h),
        }
    }
}

/// The laid-out document.
#[derive(Debug, Clone)]
pub struct PrintArea {
    pub width: f64,
    pub height: f64,
    pub ops: Vec<DrawOp>,
    pub logo: Option<LogoImage>,
    /// Document title for PDF metadata.
    pub title: String,
}

impl PrintArea {
    /// Concatenated text of every run, top to bottom. Handy for assertions.
    pub fn text(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Produces the print area for a document.
///
/// Rendering runs on the blocking pool, hence `Send + Sync`.
pub trait Renderer: Send + Sync {
    fn render(&self, document: &QuoteDocument) -> Result<PrintArea, String>;
}

/// The built-in renderer.
#[derive(Debug, Default, Clone, Copy)]
pub struct PageRenderer;

impl Renderer for PageRenderer {
    fn render(&self, document: &QuoteDocument) -> Result<PrintArea, String> {
        let mut canvas = Canvas::new();
        canvas.header(document);
        canvas.parties(document);
        canvas.table(document);
        canvas.totals(document);
        if let Some(notes) = &document.notes {
            canvas.boxed_section("Poznámky", notes, 10.0, true);
        }
        if let Some(terms) = &document.terms {
            canvas.boxed_section("Obchodní Podmínky", terms, 8.0, false);
        }
        canvas.footer();

        Ok(PrintArea {
            width: CANVAS_WIDTH,
            height: canvas.y + PADDING,
            ops: canvas.ops,
            logo: document.logo.clone(),
            title: format!("{} {}", TITLE, document.quote_number),
        })
    }
}

// =============================================================================
// Canvas
// =============================================================================

struct Canvas {
    y: f64,
    ops: Vec<DrawOp>,
}

impl Canvas {
    fn new() -> Self {
        Canvas {
            y: PADDING,
            ops: Vec::new(),
        }
    }

    fn left() -> f64 {
        PADDING
    }

    fn right() -> f64 {
        CANVAS_WIDTH - PADDING
    }

    fn content_width() -> f64 {
        Self::right() - Self::left()
    }

    /// Places a text run with its top at `top`; returns the baseline.
    #[allow(clippy::too_many_arguments)]
    fn text(&mut self, x: f64, top: f64, size: f64, face: Face, gray: f32, align: Align, text: &str) -> f64 {
        let baseline = top + size;
        let width = text_width(face, size, text);
        let x = match align {
            Align::Left => x,
            Align::Right => x - width,
            Align::Center => x - width / 2.0,
        };
        self.ops.push(DrawOp::Text {
            x,
            y: baseline,
            size,
            face,
            gray,
            text: text.to_string(),
        });
        baseline
    }

    /// Places wrapped lines starting at `top`; returns the bottom.
    #[allow(clippy::too_many_arguments)]
    fn lines(&mut self, x: f64, top: f64, size: f64, face: Face, gray: f32, align: Align, text: &str, max_width: f64) -> f64 {
        let leading = size * 1.4;
        let mut y = top;
        for line in wrap(face, size, text, max_width) {
            if !line.is_empty() {
                self.text(x, y, size, face, gray, align, &line);
            }
            y += leading;
        }
        y
    }

    fn rule(&mut self, y: f64, width: f64, gray: f32) {
        self.ops.push(DrawOp::Rule {
            x1: Self::left(),
            x2: Self::right(),
            y,
            width,
            gray,
        });
    }

    fn header(&mut self, doc: &QuoteDocument) {
        let top = self.y;
        let mut left_y = top;

        if let Some(logo) = &doc.logo {
            let (w, h) = fit(logo.width(), logo.height(), LOGO_MAX_WIDTH, LOGO_MAX_HEIGHT);
            self.ops.push(DrawOp::Logo {
                x: Self::left(),
                y: left_y,
                w,
                h,
            });
            left_y += h + 12.0;
        }

        let name_width = Self::content_width() * 0.68;
        left_y = self.lines(Self::left(), left_y, 22.0, Face::Bold, INK, Align::Left, &doc.from_name, name_width);
        left_y = self.lines(Self::left(), left_y + 4.0, 10.0, Face::Regular, MUTED, Align::Left, &doc.from_address, name_width);

        let title_bottom = self.text(Self::right(), top, 18.0, Face::Bold, FAINT, Align::Right, &TITLE.to_uppercase());

        self.y = left_y.max(title_bottom) + 12.0;
        self.rule(self.y, 2.0, RULE);
        self.y += 24.0;
    }

    fn parties(&mut self, doc: &QuoteDocument) {
        let top = self.y;
        let half = Self::content_width() / 2.0 - 16.0;

        self.text(Self::left(), top, 9.0, Face::Bold, MUTED, Align::Left, "PRO");
        let mut left_y = top + 16.0;
        left_y = self.lines(Self::left(), left_y, 11.0, Face::Bold, INK, Align::Left, &doc.to_name, half);
        left_y = self.lines(Self::left(), left_y + 2.0, 10.0, Face::Regular, MUTED, Align::Left, &doc.to_address, half);

        let number = format!("Číslo Nabídky: {}", doc.quote_number);
        let date = format!("Datum Vystavení: {}", doc.date);
        self.text(Self::right(), top, 10.0, Face::Regular, INK, Align::Right, &number);
        let right_y = self.text(Self::right(), top + 16.0, 10.0, Face::Regular, INK, Align::Right, &date);

        self.y = left_y.max(right_y) + 24.0;
    }

    /// Right edges of the numeric columns and the description width.
    fn columns() -> (f64, [f64; 3]) {
        let w = Self::content_width();
        let description = w * 0.46;
        let quantity = Self::left() + description + w * 0.14;
        let unit_price = quantity + w * 0.20;
        (description, [quantity, unit_price, Self::right()])
    }

    fn table(&mut self, doc: &QuoteDocument) {
        let (description_width, edges) = Self::columns();
        let header_height = 24.0;

        self.ops.push(DrawOp::Fill {
            x: Self::left(),
            y: self.y,
            w: Self::content_width(),
            h: header_height,
            gray: SHADE,
        });
        let text_top = self.y + (header_height - 9.0) / 2.0 - 1.0;
        self.text(Self::left() + CELL_PADDING, text_top, 9.0, Face::Bold, MUTED, Align::Left, &COLUMNS[0].to_uppercase());
        for (heading, edge) in COLUMNS[1..].iter().zip(edges) {
            self.text(edge - CELL_PADDING, text_top, 9.0, Face::Bold, MUTED, Align::Right, &heading.to_uppercase());
        }
        self.y += header_height;

        if doc.rows.is_empty() {
            let top = self.y + CELL_PADDING;
            self.text(Self::left() + Self::content_width() / 2.0, top, 10.0, Face::Regular, FAINT, Align::Center, NO_ITEMS);
            self.y = top + 10.0 * 1.4 + CELL_PADDING;
            return;
        }

        for row in &doc.rows {
            let top = self.y + CELL_PADDING;
            let bottom = self.lines(
                Self::left() + CELL_PADDING,
                top,
                10.0,
                Face::Regular,
                INK,
                Align::Left,
                &row.description,
                description_width - 2.0 * CELL_PADDING,
            );
            self.text(edges[0] - CELL_PADDING, top, 10.0, Face::Regular, MUTED, Align::Right, &row.quantity);
            self.text(edges[1] - CELL_PADDING, top, 10.0, Face::Regular, MUTED, Align::Right, &row.unit_price);
            self.text(edges[2] - CELL_PADDING, top, 10.0, Face::Bold, INK, Align::Right, &row.line_total);

            self.y = bottom + CELL_PADDING;
            self.rule(self.y, 0.75, RULE);
        }
    }

    fn totals(&mut self, doc: &QuoteDocument) {
        let block_left = Self::right() - 220.0;
        let mut y = self.y + 18.0;

        for (label, value) in [("Mezisoučet:", &doc.subtotal), (doc.tax_label.as_str(), &doc.tax_amount)] {
            self.text(block_left, y, 10.0, Face::Bold, MUTED, Align::Left, label);
            self.text(Self::right(), y, 10.0, Face::Regular, INK, Align::Right, value);
            y += 18.0;
        }

        self.ops.push(DrawOp::Rule {
            x1: block_left,
            x2: Self::right(),
            y: y + 2.0,
            width: 0.75,
            gray: RULE,
        });
        y += 10.0;
        self.text(block_left, y, 14.0, Face::Bold, INK, Align::Left, "Celkem:");
        let bottom = self.text(Self::right(), y, 14.0, Face::Bold, INK, Align::Right, &doc.total);

        self.y = bottom + 12.0;
    }

    fn boxed_section(&mut self, heading: &str, body: &str, size: f64, shaded: bool) {
        self.y += 24.0;
        self.text(Self::left(), self.y, 9.0, Face::Bold, MUTED, Align::Left, &heading.to_uppercase());
        self.y += 18.0;

        let inset = if shaded { 12.0 } else { 0.0 };
        let lines = wrap(Face::Regular, size, body, Self::content_width() - 2.0 * inset);
        let height = lines.len() as f64 * size * 1.4 + 2.0 * inset;

        if shaded {
            self.ops.push(DrawOp::Fill {
                x: Self::left(),
                y: self.y,
                w: Self::content_width(),
                h: height,
                gray: SHADE,
            });
        }

        let mut y = self.y + inset;
        for line in lines {
            if !line.is_empty() {
                self.text(Self::left() + inset, y, size, Face::Regular, MUTED, Align::Left, &line);
            }
            y += size * 1.4;
        }
        self.y += height;
    }

    fn footer(&mut self) {
        self.y += 40.0;
        let baseline = self.text(CANVAS_WIDTH / 2.0, self.y, 8.0, Face::Regular, FAINT, Align::Center, FOOTER);
        self.y = baseline;
    }
}

/// Scales `(w, h)` pixels down to fit the box, keeping aspect ratio.
fn fit(w: u32, h: u32, max_w: f64, max_h: f64) -> (f64, f64) {
    let (w, h) = (f64::from(w.max(1)), f64::from(h.max(1)));
    let scale = (max_w / w).min(max_h / h);
    (w * scale, h * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nabidka_core::{EntityId, LineItem, Quote};

    fn document(items: usize, notes: &str) -> QuoteDocument {
        let mut quote = Quote {
            quote_number: "0042".to_string(),
            tax_rate: 21.0,
            notes: notes.to_string(),
            terms: "Splatnost 14 dní.".to_string(),
            ..Quote::default()
        };
        for i in 0..items {
            quote.line_items.push(LineItem::new(
                EntityId::from(format!("li_{i}")),
                format!("Položka {i}"),
                1.0,
                100.0,
            ));
        }
        QuoteDocument::from_quote(&quote)
    }

    #[test]
    fn test_contains_every_section() {
        let area = PageRenderer.render(&document(2, "Poznámka")).unwrap();
        let text = area.text();

        assert!(text.contains("NABÍDKA"));
        assert!(text.contains("Číslo Nabídky: 0042"));
        assert!(text.contains("Položka 1"));
        assert!(text.contains("Mezisoučet:"));
        assert!(text.contains("POZNÁMKY"));
        assert!(text.contains("OBCHODNÍ PODMÍNKY"));
        assert!(text.ends_with(FOOTER));
        assert_eq!(area.title, "Nabídka 0042");
    }

    #[test]
    fn test_empty_table_placeholder() {
        let area = PageRenderer.render(&document(0, "")).unwrap();
        let text = area.text();
        assert!(text.contains(NO_ITEMS));
        assert!(!text.contains("POZNÁMKY"));
    }

    #[test]
    fn test_ops_stay_inside_canvas() {
        let area = PageRenderer.render(&document(5, "x")).unwrap();
        assert_eq!(area.width, CANVAS_WIDTH);
        for op in &area.ops {
            let (top, bottom) = op.extent();
            assert!(top >= 0.0);
            assert!(bottom <= area.height);
            if let DrawOp::Text { x, .. } = op {
                assert!(*x >= 0.0 && *x < CANVAS_WIDTH);
            }
        }
    }

    #[test]
    fn test_more_rows_make_a_taller_canvas() {
        let short = PageRenderer.render(&document(1, "")).unwrap();
        let long = PageRenderer.render(&document(60, "")).unwrap();
        assert!(long.height > short.height);
    }

    #[test]
    fn test_fit_keeps_aspect_ratio() {
        let (w, h) = fit(400, 100, 180.0, 56.0);
        assert!((w - 180.0).abs() < 1e-9 && (h - 45.0).abs() < 1e-9);

        let (w, h) = fit(100, 400, 180.0, 56.0);
        assert!((w - 14.0).abs() < 1e-9 && (h - 56.0).abs() < 1e-9);
    }
}
