//! PDF object serialization.
//!
//! Writes [`Object`]s in PDF syntax (ISO 32000-1, section 7.3).

use crate::error::Result;
use crate::object::{Dictionary, Object, ObjectRef};
use std::io::Write;

/// Serializer for PDF objects.
#[derive(Debug, Clone, Default)]
pub struct ObjectSerializer {
    /// Whether to use compact formatting (minimal whitespace)
    compact: bool,
}

impl ObjectSerializer {
    /// Create a new object serializer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compact serializer (minimal whitespace).
    pub fn compact() -> Self {
        Self { compact: true }
    }

    /// Serialize an object to bytes.
    pub fn serialize(&self, obj: &Object) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_object(&mut buf, obj)?;
        Ok(buf)
    }

    /// Serialize an object to a string (for debugging and tests).
    pub fn serialize_to_string(&self, obj: &Object) -> Result<String> {
        Ok(String::from_utf8_lossy(&self.serialize(obj)?).into_owned())
    }

    /// Serialize an indirect object definition.
    ///
    /// Format: `{id} {gen} obj\n{object}\nendobj\n`
    pub fn serialize_indirect(&self, obj_ref: ObjectRef, obj: &Object) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        writeln!(buf, "{} {} obj", obj_ref.id, obj_ref.gen)?;
        self.write_object(&mut buf, obj)?;
        write!(buf, "\nendobj\n")?;
        Ok(buf)
    }

    fn write_object<W: Write>(&self, w: &mut W, obj: &Object) -> std::io::Result<()> {
        match obj {
            Object::Null => write!(w, "null"),
            Object::Boolean(b) => write!(w, "{}", if *b { "true" } else { "false" }),
            Object::Integer(i) => write!(w, "{}", i),
            Object::Real(r) => write_real(w, *r),
            Object::String(s) => write_string(w, s),
            Object::Name(n) => write_name(w, n),
            Object::Array(arr) => self.write_array(w, arr),
            Object::Dictionary(dict) => self.write_dictionary(w, dict),
            Object::Stream { dict, data } => self.write_stream(w, dict, data),
            Object::Reference(r) => write!(w, "{} {} R", r.id, r.gen),
        }
    }

    fn write_array<W: Write>(&self, w: &mut W, arr: &[Object]) -> std::io::Result<()> {
        write!(w, "[")?;
        for (i, obj) in arr.iter().enumerate() {
            if i > 0 {
                write!(w, " ")?;
            }
            self.write_object(w, obj)?;
        }
        write!(w, "]")
    }

    fn write_dictionary<W: Write>(&self, w: &mut W, dict: &Dictionary) -> std::io::Result<()> {
        write!(w, "<<")?;

        for (i, (key, value)) in dict.iter().enumerate() {
            if !self.compact {
                write!(w, "\n  ")?;
            } else if i > 0 {
                write!(w, " ")?;
            }
            write_name(w, key)?;
            write!(w, " ")?;
            self.write_object(w, value)?;
        }

        if !self.compact && !dict.is_empty() {
            writeln!(w)?;
        }
        write!(w, ">>")
    }

    /// `/Length` is always rewritten to match `data`.
    fn write_stream<W: Write>(&self, w: &mut W, dict: &Dictionary, data: &[u8]) -> std::io::Result<()> {
        let mut dict_with_length = dict.clone();
        dict_with_length.insert("Length".to_string(), Object::Integer(data.len() as i64));

        self.write_dictionary(w, &dict_with_length)?;
        write!(w, "\nstream\n")?;
        w.write_all(data)?;
        write!(w, "\nendstream")
    }
}

/// Format a number the way content streams and objects expect it: at most
/// five decimals, trailing zeros trimmed, integers without a point.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{:.5}", value);
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        if trimmed == "-0" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

fn write_real<W: Write>(w: &mut W, value: f64) -> std::io::Result<()> {
    write!(w, "{}", format_number(value))
}

/// Literal string syntax `(...)` for text bytes, hex `<...>` when any byte is
/// a control character. High WinAnsi bytes are written raw inside literals.
fn write_string<W: Write>(w: &mut W, data: &[u8]) -> std::io::Result<()> {
    let is_text = data
        .iter()
        .all(|&b| b == b'\n' || b == b'\r' || b == b'\t' || b >= 0x20);

    if is_text {
        write!(w, "(")?;
        write_escaped(w, data)?;
        write!(w, ")")
    } else {
        write!(w, "<")?;
        for byte in data {
            write!(w, "{:02X}", byte)?;
        }
        write!(w, ">")
    }
}

/// Escape bytes for use inside a literal string.
pub(crate) fn write_escaped<W: Write>(w: &mut W, data: &[u8]) -> std::io::Result<()> {
    for &byte in data {
        match byte {
            b'(' => write!(w, "\\(")?,
            b')' => write!(w, "\\)")?,
            b'\\' => write!(w, "\\\\")?,
            b'\n' => write!(w, "\\n")?,
            b'\r' => write!(w, "\\r")?,
            b'\t' => write!(w, "\\t")?,
            _ => w.write_all(&[byte])?,
        }
    }
    Ok(())
}

/// Names start with `/`; delimiters, whitespace and non-ASCII bytes become `#xx`.
fn write_name<W: Write>(w: &mut W, name: &str) -> std::io::Result<()> {
    write!(w, "/")?;
    for byte in name.bytes() {
        match byte {
            b'#' | b'%' | b'(' | b')' | b'/' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' => {
                write!(w, "#{:02X}", byte)?;
            },
            b'!'..=b'~' => {
                w.write_all(&[byte])?;
            },
            _ => {
                write!(w, "#{:02X}", byte)?;
            },
        }
    }
    Ok(())
}

/// Helper functions for building PDF objects.
impl ObjectSerializer {
    /// Create a Name object.
    pub fn name(s: &str) -> Object {
        Object::Name(s.to_string())
    }

    /// Create a String object from raw bytes.
    pub fn bytes(b: &[u8]) -> Object {
        Object::String(b.to_vec())
    }

    /// Create an Integer object.
    pub fn integer(i: i64) -> Object {
        Object::Integer(i)
    }

    /// Create an Array object.
    pub fn array(items: Vec<Object>) -> Object {
        Object::Array(items)
    }

    /// Create a Dictionary object, keeping entry order.
    pub fn dict(entries: Vec<(&str, Object)>) -> Object {
        Object::Dictionary(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    /// Create a Reference object.
    pub fn reference(obj_ref: ObjectRef) -> Object {
        Object::Reference(obj_ref)
    }

    /// Create a rectangle array `[llx lly urx ury]`.
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Object {
        Object::Array(vec![
            Object::Real(x),
            Object::Real(y),
            Object::Real(x + width),
            Object::Real(y + height),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact(obj: &Object) -> String {
        ObjectSerializer::compact().serialize_to_string(obj).unwrap()
    }

    #[test]
    fn test_serialize_scalars() {
        assert_eq!(compact(&Object::Null), "null");
        assert_eq!(compact(&Object::Boolean(true)), "true");
        assert_eq!(compact(&Object::Integer(-123)), "-123");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(841.889763779), "841.88976");
        assert_eq!(format_number(-0.000001), "0");
    }

    #[test]
    fn test_serialize_string() {
        assert_eq!(compact(&ObjectSerializer::bytes(b"Test (parens)")), "(Test \\(parens\\))");
        let raw = ObjectSerializer::compact()
            .serialize(&ObjectSerializer::bytes(b"R\xE9sum\xE9"))
            .unwrap();
        assert_eq!(raw, b"(R\xE9sum\xE9)".to_vec());
        assert_eq!(compact(&ObjectSerializer::bytes(&[0x00, 0xFF])), "<00FF>");
    }

    #[test]
    fn test_serialize_name_with_special_chars() {
        assert_eq!(compact(&ObjectSerializer::name("Helvetica-Bold")), "/Helvetica-Bold");
        assert_eq!(compact(&ObjectSerializer::name("A B")), "/A#20B");
        assert_eq!(compact(&ObjectSerializer::name("A(B)%")), "/A#28B#29#25");
        assert_eq!(compact(&ObjectSerializer::name("x#/y")), "/x#23#2Fy");
    }

    #[test]
    fn test_dictionary_keeps_insertion_order() {
        let dict = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Page")),
            ("Count", ObjectSerializer::integer(1)),
            ("Kids", ObjectSerializer::array(vec![ObjectSerializer::reference(ObjectRef::new(3, 0))])),
        ]);
        assert_eq!(compact(&dict), "<</Type /Page /Count 1 /Kids [3 0 R]>>");
    }

    #[test]
    fn test_serialize_indirect() {
        let bytes = ObjectSerializer::new()
            .serialize_indirect(ObjectRef::new(1, 0), &Object::Integer(42))
            .unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "1 0 obj\n42\nendobj\n");
    }

    #[test]
    fn test_serialize_stream_sets_length() {
        let mut dict = Dictionary::new();
        dict.insert("Length".to_string(), Object::Integer(999));
        let stream = Object::Stream {
            dict,
            data: bytes::Bytes::from_static(b"stream data"),
        };

        let result = compact(&stream);
        assert!(result.contains("/Length 11"));
        assert!(result.ends_with("\nstream\nstream data\nendstream"));
    }

    #[test]
    fn test_rect_helper() {
        let rect = ObjectSerializer::rect(0.0, 0.0, 595.28, 841.89);
        assert_eq!(compact(&rect), "[0 0 595.28 841.89]");
    }
}
