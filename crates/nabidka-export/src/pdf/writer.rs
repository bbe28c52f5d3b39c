//! PDF object model, serializer and file assembler.
//!
//! ```text
//! PdfObject tree ──► ObjectSerializer ──► "n 0 obj ... endobj"
//!                                              │
//! PdfWriter: header + objects + xref table + trailer ──► bytes
//! ```

use std::fmt::Write as _;

use super::content::{escape_string, num};

/// Object number.
pub type ObjectId = u32;

/// A PDF object.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfObject {
    Int(i64),
    Real(f64),
    Name(String),
    /// Literal string of raw bytes.
    Str(Vec<u8>),
    /// Text string, written as UTF-16BE hex with a byte-order mark.
    Text(String),
    Array(Vec<PdfObject>),
    Dict(Vec<(String, PdfObject)>),
    Ref(ObjectId),
    Stream {
        dict: Vec<(String, PdfObject)>,
        data: Vec<u8>,
    },
}

impl PdfObject {
    pub fn name(value: &str) -> Self {
        PdfObject::Name(value.to_string())
    }

    pub fn dict<const N: usize>(entries: [(&str, PdfObject); N]) -> Self {
        PdfObject::Dict(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }
}

/// Serializes objects to their textual PDF form.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectSerializer;

impl ObjectSerializer {
    pub fn new() -> Self {
        ObjectSerializer
    }

    pub fn serialize(&self, object: &PdfObject) -> Vec<u8> {
        let mut out = Vec::new();
        self.write(object, &mut out);
        out
    }

    fn write(&self, object: &PdfObject, out: &mut Vec<u8>) {
        match object {
            PdfObject::Int(v) => out.extend_from_slice(v.to_string().as_bytes()),
            PdfObject::Real(v) => out.extend_from_slice(num(*v).as_bytes()),
            PdfObject::Name(n) => {
                out.push(b'/');
                out.extend_from_slice(n.as_bytes());
            }
            PdfObject::Str(bytes) => {
                out.push(b'(');
                out.extend_from_slice(escape_string(bytes).as_bytes());
                out.push(b')');
            }
            PdfObject::Text(text) => {
                let mut hex = String::from("<FEFF");
                for unit in text.encode_utf16() {
                    let _ = write!(hex, "{:04X}", unit);
                }
                hex.push('>');
                out.extend_from_slice(hex.as_bytes());
            }
            PdfObject::Array(items) => {
                out.push(b'[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(b' ');
                    }
                    self.write(item, out);
                }
                out.push(b']');
            }
            PdfObject::Dict(entries) => self.write_dict(entries, out),
            PdfObject::Ref(id) => out.extend_from_slice(format!("{id} 0 R").as_bytes()),
            PdfObject::Stream { dict, data } => {
                let mut entries = dict.clone();
                entries.push(("Length".to_string(), PdfObject::Int(data.len() as i64)));
                self.write_dict(&entries, out);
                out.extend_from_slice(b"\nstream\n");
                out.extend_from_slice(data);
                out.extend_from_slice(b"\nendstream");
            }
        }
    }

    fn write_dict(&self, entries: &[(String, PdfObject)], out: &mut Vec<u8>) {
        out.extend_from_slice(b"<<");
        for (key, value) in entries {
            out.extend_from_slice(b" /");
            out.extend_from_slice(key.as_bytes());
            out.push(b' ');
            self.write(value, out);
        }
        out.extend_from_slice(b" >>");
    }
}

/// Assembles numbered objects into a complete file.
#[derive(Debug, Default)]
pub struct PdfWriter {
    objects: Vec<Option<PdfObject>>,
}

impl PdfWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves an object number to be filled in later.
    pub fn reserve(&mut self) -> ObjectId {
        self.objects.push(None);
        self.objects.len() as ObjectId
    }

    /// Adds an object and returns its number.
    pub fn add(&mut self, object: PdfObject) -> ObjectId {
        self.objects.push(Some(object));
        self.objects.len() as ObjectId
    }

    /// Fills a reserved object number.
    pub fn set(&mut self, id: ObjectId, object: PdfObject) {
        let index = (id as usize).checked_sub(1);
        if let Some(slot) = index.and_then(|i| self.objects.get_mut(i)) {
            *slot = Some(object);
        }
    }

    /// Writes the file. Reserved numbers never filled become `null`.
    pub fn finish(self, root: ObjectId, info: Option<ObjectId>) -> Vec<u8> {
        let serializer = ObjectSerializer::new();
        let mut out: Vec<u8> = Vec::new();
        out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        let mut offsets = Vec::with_capacity(self.objects.len());
        for (index, object) in self.objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", index + 1).as_bytes());
            match object {
                Some(object) => out.extend_from_slice(&serializer.serialize(object)),
                None => out.extend_from_slice(b"null"),
            }
            out.extend_from_slice(b"\nendobj\n");
        }

        let xref_offset = out.len();
        let size = self.objects.len() + 1;
        let mut xref = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for offset in offsets {
            let _ = writeln!(xref, "{:010} 00000 n ", offset);
        }
        out.extend_from_slice(xref.as_bytes());

        let mut trailer = vec![
            ("Size".to_string(), PdfObject::Int(size as i64)),
            ("Root".to_string(), PdfObject::Ref(root)),
        ];
        if let Some(info) = info {
            trailer.push(("Info".to_string(), PdfObject::Ref(info)));
        }
        out.extend_from_slice(b"trailer\n");
        out.extend_from_slice(&serializer.serialize(&PdfObject::Dict(trailer)));
        out.extend_from_slice(format!("\nstartxref\n{xref_offset}\n%%EOF\n").as_bytes());
        out
    }
}
