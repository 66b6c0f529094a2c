//! PDF document writer.
//!
//! Assembles complete PDF documents with proper structure:
//! header, body, xref table, and trailer.

use super::content_stream::ContentStreamBuilder;
use super::font_manager::BaseFont;
use super::object_serializer::ObjectSerializer;
use crate::error::{Error, Result};
use crate::object::{Dictionary, Object, ObjectRef};
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeSet;
use std::io::Write;

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// PDF version (e.g., "1.4")
    pub version: String,
    /// Document title
    pub title: Option<String>,
    /// Producing application
    pub producer: Option<String>,
    /// `/CreationDate` value; omitted when `None`
    pub creation_date: Option<DateTime<FixedOffset>>,
    /// Whether to compress content streams
    pub compress: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.4".to_string(),
            title: None,
            producer: Some(format!("resume_oxide {}", env!("CARGO_PKG_VERSION"))),
            creation_date: None,
            compress: false,
        }
    }
}

impl PdfWriterConfig {
    /// Set document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the creation timestamp.
    pub fn with_creation_date(mut self, date: DateTime<FixedOffset>) -> Self {
        self.creation_date = Some(date);
        self
    }

    /// Stamp the document with the local time of the call.
    pub fn with_creation_date_now(self) -> Self {
        let now = chrono::Local::now();
        self.with_creation_date(now.with_timezone(now.offset()))
    }

    /// Enable or disable content stream compression (FlateDecode).
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// Format a timestamp as a PDF date string: `D:YYYYMMDDHHmmSS+HH'mm'`.
pub fn pdf_date(date: &DateTime<FixedOffset>) -> String {
    let offset = date.offset().local_minus_utc();
    let sign = if offset < 0 { '-' } else { '+' };
    let offset = offset.abs();
    format!(
        "D:{}{}{:02}'{:02}'",
        date.format("%Y%m%d%H%M%S"),
        sign,
        offset / 3600,
        (offset % 3600) / 60
    )
}

/// Encode an Info-dictionary text string.
///
/// Latin-1 text is written as-is (PDFDocEncoding agrees with it outside
/// 0x80..0x9F); anything else becomes UTF-16BE with a byte order mark.
fn text_string(s: &str) -> Object {
    let is_latin1 = s
        .chars()
        .all(|c| (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)));
    if is_latin1 {
        Object::String(s.chars().map(|c| c as u8).collect())
    } else {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in s.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        Object::String(bytes)
    }
}

/// Compress data using Flate/Deflate compression.
fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// A page being built.
pub struct PageBuilder<'a> {
    writer: &'a mut PdfWriter,
    page_index: usize,
}

impl<'a> PageBuilder<'a> {
    /// Add a run of WinAnsi-encoded text with its baseline origin at `(x, y)` points.
    pub fn add_text(&mut self, font: BaseFont, font_size: f32, x: f32, y: f32, encoded: &[u8]) -> &mut Self {
        self.writer.fonts_used.insert(font);
        self.writer.pages[self.page_index]
            .content_builder
            .text(font.resource_id(), font_size, x, y, encoded);
        self
    }

    /// Stroke a line between two points.
    pub fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32) -> &mut Self {
        self.writer.pages[self.page_index]
            .content_builder
            .set_line_width(width)
            .line(x1, y1, x2, y2);
        self
    }

    /// Index of this page.
    pub fn index(&self) -> usize {
        self.page_index
    }
}

/// Internal page data.
struct PageData {
    width: f32,
    height: f32,
    content_builder: ContentStreamBuilder,
}

/// PDF document writer.
///
/// Builds a complete PDF document with pages, fonts, and content. Only the
/// fonts that some page actually used get a font object.
pub struct PdfWriter {
    config: PdfWriterConfig,
    pages: Vec<PageData>,
    fonts_used: BTreeSet<BaseFont>,
}

impl PdfWriter {
    /// Create a new PDF writer with default config.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            fonts_used: BTreeSet::new(),
        }
    }

    /// The writer configuration.
    pub fn config(&self) -> &PdfWriterConfig {
        &self.config
    }

    /// Replace the document title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.config.title = Some(title.into());
    }

    /// Add a page with the given dimensions in points.
    pub fn add_page(&mut self, width: f32, height: f32) -> PageBuilder<'_> {
        let page_index = self.pages.len();
        self.pages.push(PageData {
            width,
            height,
            content_builder: ContentStreamBuilder::new(),
        });
        PageBuilder {
            writer: self,
            page_index,
        }
    }

    /// Reopen an existing page for more content.
    pub fn page(&mut self, page_index: usize) -> Option<PageBuilder<'_>> {
        if page_index < self.pages.len() {
            Some(PageBuilder {
                writer: self,
                page_index,
            })
        } else {
            None
        }
    }

    /// Number of pages added.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Build the complete PDF document.
    pub fn finish(&self) -> Result<Vec<u8>> {
        if self.pages.is_empty() {
            return Err(Error::NoPage);
        }

        let serializer = ObjectSerializer::compact();
        let mut output = Vec::new();
        let mut xref_offsets: Vec<usize> = Vec::new();
        let mut next_id = 1u32;
        let mut alloc = || {
            let r = ObjectRef::new(next_id, 0);
            next_id += 1;
            r
        };

        // Object ids: catalog, page tree, fonts, (page, contents) pairs, info
        let catalog_ref = alloc();
        let pages_ref = alloc();
        let font_refs: Vec<(BaseFont, ObjectRef)> = self.fonts_used.iter().map(|f| (*f, alloc())).collect();
        let page_refs: Vec<(ObjectRef, ObjectRef)> = self.pages.iter().map(|_| (alloc(), alloc())).collect();
        let info_ref = alloc();
        let size = info_ref.id + 1;

        writeln!(output, "%PDF-{}", self.config.version)?;
        // Binary marker
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        let mut emit = |output: &mut Vec<u8>, obj_ref: ObjectRef, obj: &Object| -> Result<()> {
            xref_offsets.push(output.len());
            output.extend_from_slice(&serializer.serialize_indirect(obj_ref, obj)?);
            Ok(())
        };

        let catalog = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Catalog")),
            ("Pages", ObjectSerializer::reference(pages_ref)),
        ]);
        emit(&mut output, catalog_ref, &catalog)?;

        let kids = page_refs
            .iter()
            .map(|(page_ref, _)| ObjectSerializer::reference(*page_ref))
            .collect();
        let pages = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Pages")),
            ("Kids", ObjectSerializer::array(kids)),
            ("Count", ObjectSerializer::integer(self.pages.len() as i64)),
        ]);
        emit(&mut output, pages_ref, &pages)?;

        let mut font_resources = Dictionary::new();
        for (font, font_ref) in &font_refs {
            let font_obj = ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Font")),
                ("Subtype", ObjectSerializer::name("Type1")),
                ("BaseFont", ObjectSerializer::name(font.name())),
                ("Encoding", ObjectSerializer::name("WinAnsiEncoding")),
            ]);
            emit(&mut output, *font_ref, &font_obj)?;
            font_resources.insert(font.resource_id().to_string(), ObjectSerializer::reference(*font_ref));
        }

        for (page_data, (page_ref, content_ref)) in self.pages.iter().zip(&page_refs) {
            let page = ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Page")),
                ("Parent", ObjectSerializer::reference(pages_ref)),
                (
                    "MediaBox",
                    ObjectSerializer::rect(0.0, 0.0, page_data.width as f64, page_data.height as f64),
                ),
                (
                    "Resources",
                    ObjectSerializer::dict(vec![("Font", Object::Dictionary(font_resources.clone()))]),
                ),
                ("Contents", ObjectSerializer::reference(*content_ref)),
            ]);
            emit(&mut output, *page_ref, &page)?;

            let raw_content = page_data.content_builder.build()?;
            let mut content_dict = Dictionary::new();
            let content_bytes = if self.config.compress {
                content_dict.insert("Filter".to_string(), ObjectSerializer::name("FlateDecode"));
                compress_data(&raw_content)?
            } else {
                raw_content
            };
            let contents = Object::Stream {
                dict: content_dict,
                data: bytes::Bytes::from(content_bytes),
            };
            emit(&mut output, *content_ref, &contents)?;
        }

        let mut info_entries = Vec::new();
        if let Some(title) = &self.config.title {
            info_entries.push(("Title", text_string(title)));
        }
        if let Some(producer) = &self.config.producer {
            info_entries.push(("Producer", text_string(producer)));
        }
        if let Some(date) = &self.config.creation_date {
            info_entries.push(("CreationDate", text_string(&pdf_date(date))));
        }
        emit(&mut output, info_ref, &ObjectSerializer::dict(info_entries))?;

        let xref_start = output.len();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", size)?;
        // Object 0 is always free
        writeln!(output, "0000000000 65535 f ")?;
        for offset in &xref_offsets {
            writeln!(output, "{:010} 00000 n ", offset)?;
        }

        let trailer = ObjectSerializer::dict(vec![
            ("Size", ObjectSerializer::integer(size as i64)),
            ("Root", ObjectSerializer::reference(catalog_ref)),
            ("Info", ObjectSerializer::reference(info_ref)),
        ]);
        writeln!(output, "trailer")?;
        output.extend_from_slice(&serializer.serialize(&trailer)?);
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        write!(output, "%%EOF")?;

        log::debug!(
            "Assembled PDF: {} page(s), {} font(s), {} bytes",
            self.pages.len(),
            font_refs.len(),
            output.len()
        );
        Ok(output)
    }

    /// Save the PDF to a file.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.finish()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn lossy(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn test_empty_document_is_error() {
        assert!(matches!(PdfWriter::new().finish(), Err(Error::NoPage)));
    }

    #[test]
    fn test_single_page_structure() {
        let mut writer = PdfWriter::new();
        writer.add_page(595.28, 841.89);
        let content = lossy(&writer.finish().unwrap());

        assert!(content.starts_with("%PDF-1.4"));
        assert!(content.contains("/Type /Catalog"));
        assert!(content.contains("/Type /Pages /Kids [3 0 R] /Count 1"));
        assert!(content.contains("/MediaBox [0 0 595.28 841.89]"));
        assert!(content.contains("xref\n0 6\n"));
        assert!(content.ends_with("%%EOF"));
        // No text placed, so no font objects
        assert!(!content.contains("/Type /Font"));
    }

    #[test]
    fn test_only_used_fonts_are_written() {
        let mut writer = PdfWriter::new();
        writer.add_page(595.28, 841.89).add_text(BaseFont::HelveticaBold, 14.0, 72.0, 720.0, b"Jane");
        let content = lossy(&writer.finish().unwrap());

        assert!(content.contains("/BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding"));
        assert!(!content.contains("/BaseFont /Helvetica "));
        assert!(content.contains("/Font <</F2 3 0 R>>"));
        assert!(content.contains("/F2 14 Tf"));
        assert!(content.contains("(Jane) Tj"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let mut writer = PdfWriter::new();
        writer.add_page(100.0, 100.0).add_text(BaseFont::Helvetica, 10.0, 1.0, 1.0, b"x");
        writer.add_page(100.0, 100.0);
        let bytes = writer.finish().unwrap();
        let content = lossy(&bytes);

        let xref = content.rfind("xref\n").unwrap();
        let entries: Vec<usize> = content[xref..]
            .lines()
            .skip(3)
            .take_while(|l| l.ends_with(" n "))
            .map(|l| l[..10].parse().unwrap())
            .collect();
        assert_eq!(entries.len(), 8);
        for (i, offset) in entries.iter().enumerate() {
            let expected = format!("{} 0 obj", i + 1);
            assert!(bytes[*offset..].starts_with(expected.as_bytes()));
        }
    }

    #[test]
    fn test_reopen_page() {
        let mut writer = PdfWriter::new();
        writer.add_page(100.0, 100.0);
        writer.add_page(100.0, 100.0);
        assert!(writer.page(2).is_none());
        writer
            .page(0)
            .unwrap()
            .draw_line(0.0, 50.0, 100.0, 50.0, 0.85);
        let content = lossy(&writer.finish().unwrap());
        assert!(content.contains("0 50 m\n100 50 l\nS"));
        assert!(content.contains("/Count 2"));
    }

    #[test]
    fn test_info_dictionary() {
        let date = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 0)
            .unwrap();
        let config = PdfWriterConfig::default()
            .with_title("Jane Doe - Résumé")
            .with_creation_date(date);
        let mut writer = PdfWriter::with_config(config);
        writer.add_page(100.0, 100.0);
        let bytes = writer.finish().unwrap();

        let title = b"/Title (Jane Doe - R\xE9sum\xE9)";
        assert!(bytes.windows(title.len()).any(|w| w == title));
        assert!(lossy(&bytes).contains("/CreationDate (D:20240309140500+02'00')"));
        assert!(lossy(&bytes).contains("/Producer (resume_oxide"));
    }

    #[test]
    fn test_non_latin_title_is_utf16() {
        assert_eq!(text_string("Ω"), Object::String(vec![0xFE, 0xFF, 0x03, 0xA9]));
        assert_eq!(text_string("é"), Object::String(vec![0xE9]));
    }

    #[test]
    fn test_compressed_content() {
        let mut writer = PdfWriter::with_config(PdfWriterConfig::default().with_compress(true));
        writer.add_page(100.0, 100.0).add_text(BaseFont::Helvetica, 10.0, 1.0, 1.0, b"hidden");
        let content = lossy(&writer.finish().unwrap());
        assert!(content.contains("/Filter /FlateDecode"));
        assert!(!content.contains("(hidden) Tj"));
    }

    #[test]
    fn test_pdf_date_negative_offset() {
        let date = FixedOffset::west_opt(5 * 3600 + 30 * 60)
            .unwrap()
            .with_ymd_and_hms(2023, 12, 31, 23, 59, 59)
            .unwrap();
        assert_eq!(pdf_date(&date), "D:20231231235959-05'30'");
    }
}
