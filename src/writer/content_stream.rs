//! Content stream generation.
//!
//! A page's content is a flat list of [`ContentStreamOp`]s, written one
//! operator per line. Coordinates are PDF user space (points, origin at the
//! bottom-left corner).

use super::object_serializer::{format_number, write_escaped};
use crate::error::Result;
use std::io::Write;

/// A content stream operator.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font resource and size (Tf)
    SetFont(String, f32),
    /// Move to the start of the next line, offset from the current one (Td)
    MoveText(f32, f32),
    /// Show already-encoded text (Tj)
    ShowText(Vec<u8>),
    /// Set line width (w)
    SetLineWidth(f32),
    /// Begin a subpath (m)
    MoveTo(f32, f32),
    /// Append a line segment (l)
    LineTo(f32, f32),
    /// Stroke the path (S)
    Stroke,
}

/// Builder for PDF content streams.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    operations: Vec<ContentStreamOp>,
    current_line_width: Option<f32>,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation to the stream.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Operations added so far.
    pub fn operations(&self) -> &[ContentStreamOp] {
        &self.operations
    }

    /// True if nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Place one run of encoded text with its baseline origin at `(x, y)`.
    ///
    /// Each run is its own text object with an explicit font, so runs can be
    /// emitted in any order.
    pub fn text(&mut self, font_resource: &str, size: f32, x: f32, y: f32, encoded: &[u8]) -> &mut Self {
        self.op(ContentStreamOp::BeginText)
            .op(ContentStreamOp::SetFont(font_resource.to_string(), size))
            .op(ContentStreamOp::MoveText(x, y))
            .op(ContentStreamOp::ShowText(encoded.to_vec()))
            .op(ContentStreamOp::EndText)
    }

    /// Set the stroke width, skipping the operator if it is already current.
    pub fn set_line_width(&mut self, width: f32) -> &mut Self {
        if self.current_line_width != Some(width) {
            self.op(ContentStreamOp::SetLineWidth(width));
            self.current_line_width = Some(width);
        }
        self
    }

    /// Stroke a straight line.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> &mut Self {
        self.op(ContentStreamOp::MoveTo(x1, y1))
            .op(ContentStreamOp::LineTo(x2, y2))
            .op(ContentStreamOp::Stroke)
    }

    /// Build the content stream to bytes.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();

        for op in &self.operations {
            write_op(&mut buf, op)?;
            writeln!(buf)?;
        }

        Ok(buf)
    }
}

fn num(value: f32) -> String {
    format_number(value as f64)
}

fn write_op<W: Write>(w: &mut W, op: &ContentStreamOp) -> std::io::Result<()> {
    match op {
        ContentStreamOp::BeginText => write!(w, "BT"),
        ContentStreamOp::EndText => write!(w, "ET"),
        ContentStreamOp::SetFont(name, size) => write!(w, "/{} {} Tf", name, num(*size)),
        ContentStreamOp::MoveText(tx, ty) => write!(w, "{} {} Td", num(*tx), num(*ty)),
        ContentStreamOp::ShowText(text) => {
            write!(w, "(")?;
            write_escaped(w, text)?;
            write!(w, ") Tj")
        },
        ContentStreamOp::SetLineWidth(width) => write!(w, "{} w", num(*width)),
        ContentStreamOp::MoveTo(x, y) => write!(w, "{} {} m", num(*x), num(*y)),
        ContentStreamOp::LineTo(x, y) => write!(w, "{} {} l", num(*x), num(*y)),
        ContentStreamOp::Stroke => write!(w, "S"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(builder: &ContentStreamBuilder) -> String {
        String::from_utf8(builder.build().unwrap()).unwrap()
    }

    #[test]
    fn test_text_run() {
        let mut builder = ContentStreamBuilder::new();
        builder.text("F1", 10.0, 28.35, 800.5, b"Hello");
        assert_eq!(build(&builder), "BT\n/F1 10 Tf\n28.35 800.5 Td\n(Hello) Tj\nET\n");
    }

    #[test]
    fn test_text_is_escaped() {
        let mut builder = ContentStreamBuilder::new();
        builder.text("F2", 12.0, 0.0, 0.0, b"SKILLS (and) \\ OTHER");
        assert!(build(&builder).contains("(SKILLS \\(and\\) \\\\ OTHER) Tj"));
    }

    #[test]
    fn test_line() {
        let mut builder = ContentStreamBuilder::new();
        builder.set_line_width(0.85).line(28.35, 700.0, 566.93, 700.0);
        assert_eq!(build(&builder), "0.85 w\n28.35 700 m\n566.93 700 l\nS\n");
    }

    #[test]
    fn test_line_width_is_deduplicated() {
        let mut builder = ContentStreamBuilder::new();
        builder.set_line_width(0.85).set_line_width(0.85).set_line_width(1.0);
        let widths = builder
            .operations()
            .iter()
            .filter(|op| matches!(op, ContentStreamOp::SetLineWidth(_)))
            .count();
        assert_eq!(widths, 2);
    }

    #[test]
    fn test_empty_builder() {
        let builder = ContentStreamBuilder::new();
        assert!(builder.is_empty());
        assert!(builder.build().unwrap().is_empty());
    }
}
