//! # Fonts
//!
//! Metrics and encoding for the two standard PDF fonts the document uses
//! (Helvetica and Helvetica-Bold). Standard fonts need no embedding.
//!
//! ## Encoding
//! ```text
//! WinAnsiEncoding covers:  á é í ó ú ý Á É Í Ó Ú Ý š Š ž Ž
//! Missing Czech letters are remapped onto unused or rarely used codes
//! through a /Differences array:
//!
//!   0x81 č   0x8D Č   0x8F ď   0x90 Ď   0x9D ě   0x83 Ě   0x88 ň
//!   0x98 Ň   0xA4 ř   0xA6 Ř   0xA8 ť   0xAF Ť   0xB8 ů   0xB4 Ů
//! ```
//! Characters with no code at all are written as `?`.

/// Font face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Regular,
    Bold,
}

impl Face {
    /// Resource name used inside content streams.
    pub fn resource(self) -> &'static str {
        match self {
            Face::Regular => "F1",
            Face::Bold => "F2",
        }
    }

    /// PostScript base font name.
    pub fn base_font(self) -> &'static str {
        match self {
            Face::Regular => "Helvetica",
            Face::Bold => "Helvetica-Bold",
        }
    }
}

/// Czech letters outside WinAnsi: `(code, char, glyph name)`.
pub const CZECH_DIFFERENCES: [(u8, char, &str); 14] = [
    (0x81, 'č', "ccaron"),
    (0x83, 'Ě', "Ecaron"),
    (0x88, 'ň', "ncaron"),
    (0x8D, 'Č', "Ccaron"),
    (0x8F, 'ď', "dcaron"),
    (0x90, 'Ď', "Dcaron"),
    (0x98, 'Ň', "Ncaron"),
    (0x9D, 'ě', "ecaron"),
    (0xA4, 'ř', "rcaron"),
    (0xA6, 'Ř', "Rcaron"),
    (0xA8, 'ť', "tcaron"),
    (0xAF, 'Ť', "Tcaron"),
    (0xB4, 'Ů', "Uring"),
    (0xB8, 'ů', "uring"),
];

// Helvetica advance widths for 0x20..=0x7E, in 1/1000 em.
const REGULAR_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

const BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, //
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, //
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, //
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, //
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, //
];

/// Maps a character to its single-byte code in the document encoding.
pub fn encode_char(c: char) -> u8 {
    if (' '..='~').contains(&c) {
        return c as u8;
    }
    if let Some((code, _, _)) = CZECH_DIFFERENCES.iter().find(|(_, ch, _)| *ch == c) {
        return *code;
    }
    match c {
        '\u{a0}' => 0xA0,
        'Š' => 0x8A,
        'š' => 0x9A,
        'Ž' => 0x8E,
        'ž' => 0x9E,
        '€' => 0x80,
        '–' => 0x96,
        '—' => 0x97,
        '„' => 0x84,
        '“' => 0x93,
        '”' => 0x94,
        '…' => 0x85,
        '•' => 0x95,
        '°' => 0xB0,
        '§' => 0xA7,
        // Latin-1 block maps to itself in WinAnsi
        c if ('\u{c0}'..='\u{ff}').contains(&c) => c as u32 as u8,
        _ => b'?',
    }
}

/// Encodes a string for a `Tj` operand.
pub fn encode(text: &str) -> Vec<u8> {
    text.chars().map(encode_char).collect()
}

/// Advance width of one character at size 1000.
fn char_width(face: Face, c: char) -> u16 {
    let table = match face {
        Face::Regular => &REGULAR_ASCII,
        Face::Bold => &BOLD_ASCII,
    };
    let base = base_letter(c);
    if (' '..='~').contains(&base) {
        return table[base as usize - 0x20];
    }
    match c {
        '\u{a0}' => table[0],
        '–' | '•' => 556,
        '—' => 1000,
        '…' => 1000,
        _ => 556,
    }
}

/// Strips diacritics from the letters the document is likely to contain.
/// Accented Helvetica glyphs share the advance width of their base letter.
fn base_letter(c: char) -> char {
    match c {
        'á' | 'ä' => 'a',
        'Á' | 'Ä' => 'A',
        'č' | 'ç' => 'c',
        'Č' | 'Ç' => 'C',
        'ď' => 'd',
        'Ď' => 'D',
        'é' | 'ě' | 'ë' => 'e',
        'É' | 'Ě' | 'Ë' => 'E',
        'í' => 'i',
        'Í' => 'I',
        'ň' => 'n',
        'Ň' => 'N',
        'ó' | 'ö' | 'ô' => 'o',
        'Ó' | 'Ö' | 'Ô' => 'O',
        'ř' => 'r',
        'Ř' => 'R',
        'š' => 's',
        'Š' => 'S',
        'ť' => 't',
        'Ť' => 'T',
        'ú' | 'ů' | 'ü' => 'u',
        'Ú' | 'Ů' | 'Ü' => 'U',
        'ý' => 'y',
        'Ý' => 'Y',
        'ž' => 'z',
        'Ž' => 'Z',
        other => other,
    }
}

/// Width of `text` in points at `size`.
pub fn text_width(face: Face, size: f64, text: &str) -> f64 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(face, c))).sum();
    f64::from(units) * size / 1000.0
}

/// Breaks `text` into lines no wider than `max_width`.
///
/// Explicit newlines are kept. Words wider than a line are split by
/// character.
pub fn wrap(face: Face, size: f64, text: &str, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split(' ') {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line} {word}")
            };

            if text_width(face, size, &candidate) <= max_width {
                line = candidate;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }

            for c in word.chars() {
                line.push(c);
                if text_width(face, size, &line) > max_width && line.chars().count() > 1 {
                    line.pop();
                    lines.push(std::mem::take(&mut line));
                    line.push(c);
                }
            }
        }
        lines.push(line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_czech_text() {
        assert_eq!(encode("Kč"), vec![b'K', 0x81]);
        assert_eq!(encode("Děkujeme"), vec![b'D', 0x9D, b'k', b'u', b'j', b'e', b'm', b'e']);
        assert_eq!(encode("á"), vec![0xE1]);
        assert_eq!(encode("Ž"), vec![0x8E]);
        assert_eq!(encode("漢"), vec![b'?']);
    }

    #[test]
    fn test_differences_codes_are_unique() {
        let mut codes: Vec<u8> = CZECH_DIFFERENCES.iter().map(|(code, _, _)| *code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), CZECH_DIFFERENCES.len());
    }

    #[test]
    fn test_widths() {
        assert_eq!(text_width(Face::Regular, 10.0, "0"), 5.56);
        assert_eq!(text_width(Face::Regular, 10.0, "č"), text_width(Face::Regular, 10.0, "c"));
        assert!(text_width(Face::Bold, 10.0, "b") > text_width(Face::Regular, 10.0, "b"));
    }

    #[test]
    fn test_wrap_respects_width_and_newlines() {
        let lines = wrap(Face::Regular, 10.0, "aaa bbb ccc\nddd", 40.0);
        assert_eq!(lines, vec!["aaa bbb", "ccc", "ddd"]);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let lines = wrap(Face::Regular, 10.0, "0123456789", 20.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "0123456789");
    }

    #[test]
    fn test_wrap_empty_text_is_one_empty_line() {
        assert_eq!(wrap(Face::Regular, 10.0, "", 100.0), vec![String::new()]);
    }
}
