//! Page content stream builder.
//!
//! Emits PDF drawing operators into a byte buffer. Coordinates are PDF user
//! space: points, origin at the bottom-left of the page.

use std::fmt::Write as _;

use crate::font::{encode, Face};

/// Builds the operator stream of one page.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    buf: String,
}

impl ContentStreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `q`
    pub fn save(&mut self) -> &mut Self {
        self.buf.push_str("q\n");
        self
    }

    /// `Q`
    pub fn restore(&mut self) -> &mut Self {
        self.buf.push_str("Q\n");
        self
    }

    /// Intersects the clip path with a rectangle.
    pub fn clip_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> &mut Self {
        let _ = writeln!(self.buf, "{} {} {} {} re W n", num(x), num(y), num(w), num(h));
        self
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, gray: f32) -> &mut Self {
        let _ = writeln!(
            self.buf,
            "{} g {} {} {} {} re f",
            num(f64::from(gray)),
            num(x),
            num(y),
            num(w),
            num(h)
        );
        self
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, gray: f32) -> &mut Self {
        let _ = writeln!(
            self.buf,
            "{} G {} w {} {} m {} {} l S",
            num(f64::from(gray)),
            num(width),
            num(x1),
            num(y1),
            num(x2),
            num(y2)
        );
        self
    }

    /// One text run with its baseline origin at `(x, y)`.
    pub fn text(&mut self, face: Face, size: f64, x: f64, y: f64, gray: f32, text: &str) -> &mut Self {
        self.buf.push_str("BT\n");
        let _ = writeln!(self.buf, "/{} {} Tf", face.resource(), num(size));
        let _ = writeln!(self.buf, "{} g", num(f64::from(gray)));
        let _ = writeln!(self.buf, "1 0 0 1 {} {} Tm", num(x), num(y));
        let _ = writeln!(self.buf, "({}) Tj", escape_string(&encode(text)));
        self.buf.push_str("ET\n");
        self
    }

    /// Paints an image XObject into the given rectangle.
    pub fn image(&mut self, name: &str, x: f64, y: f64, w: f64, h: f64) -> &mut Self {
        let _ = writeln!(
            self.buf,
            "q {} 0 0 {} {} {} cm /{} Do Q",
            num(w),
            num(h),
            num(x),
            num(y),
            name
        );
        self
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf.into_bytes()
    }
}

/// Formats a number with at most three decimals and no trailing zeros.
pub fn num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Escapes bytes for a literal string. Non-ASCII bytes become octal escapes
/// so the content stream stays 7-bit clean.
pub fn escape_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            b'\\' => out.push_str("\\\\"),
            0x20..=0x7E => out.push(b as char),
            _ => {
                let _ = write!(out, "\\{:03o}", b);
            }
        }
    }
    out
}
