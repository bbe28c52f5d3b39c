//! # Export Options
//!
//! One option set shared by both export flows (off-screen and preview).
//!
//! | Option            | Default        |
//! |-------------------|----------------|
//! | margin            | 0.5 in         |
//! | image quality     | 0.98 (JPEG)    |
//! | capture scale     | 2              |
//! | page              | A4 portrait    |

/// Points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Points per millimetre.
pub const POINTS_PER_MM: f64 = POINTS_PER_INCH / 25.4;

/// Paper size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    A4,
    Letter,
}

impl PageFormat {
    /// Portrait `(width, height)` in points.
    pub fn size_points(self) -> (f64, f64) {
        match self {
            PageFormat::A4 => (210.0 * POINTS_PER_MM, 297.0 * POINTS_PER_MM),
            PageFormat::Letter => (8.5 * POINTS_PER_INCH, 11.0 * POINTS_PER_INCH),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Export settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Page margin on every side, in inches.
    pub margin_in: f64,

    /// JPEG quality for embedded imagery, `0.0..=1.0`.
    pub image_quality: f32,

    /// Pixel density of captured imagery relative to its laid-out size.
    pub capture_scale: f32,

    pub page_format: PageFormat,
    pub orientation: Orientation,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            margin_in: 0.5,
            image_quality: 0.98,
            capture_scale: 2.0,
            page_format: PageFormat::A4,
            orientation: Orientation::Portrait,
        }
    }
}

impl ExportOptions {
    /// `Nabidka-<quote number>.pdf`, with `XXXX` for an empty number.
    pub fn file_name(quote_number: &str) -> String {
        let number = quote_number.trim();
        let number = if number.is_empty() { "XXXX" } else { number };
        let safe: String = number
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | ':' | '\0') { '-' } else { c })
            .collect();
        format!("Nabidka-{safe}.pdf")
    }

    /// Page `(width, height)` in points, honoring orientation.
    pub fn page_size(&self) -> (f64, f64) {
        let (w, h) = self.page_format.size_points();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// Margin in points.
    pub fn margin_points(&self) -> f64 {
        self.margin_in * POINTS_PER_INCH
    }

    /// JPEG quality on the encoder's 1..=100 scale.
    pub fn jpeg_quality(&self) -> u8 {
        (self.image_quality.clamp(0.01, 1.0) * 100.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        assert_eq!(ExportOptions::file_name("0007"), "Nabidka-0007.pdf");
        assert_eq!(ExportOptions::file_name(""), "Nabidka-XXXX.pdf");
        assert_eq!(ExportOptions::file_name("2024/05"), "Nabidka-2024-05.pdf");
    }

    #[test]
    fn test_defaults() {
        let options = ExportOptions::default();
        assert_eq!(options.margin_points(), 36.0);
        assert_eq!(options.jpeg_quality(), 98);

        let (w, h) = options.page_size();
        assert!((w - 595.28).abs() < 0.01);
        assert!((h - 841.89).abs() < 0.01);
    }

    #[test]
    fn test_landscape_swaps_sides() {
        let options = ExportOptions {
            orientation: Orientation::Landscape,
            ..ExportOptions::default()
        };
        let (w, h) = options.page_size();
        assert!(w > h);
    }
}
