//! Cursor-based PDF canvas.
//!
//! [`PdfCanvas`] is the PDF implementation of [`DocumentSink`]. It works in
//! millimetres from the top-left corner of an A4 page and keeps a text
//! cursor the way a typewriter does: cells are placed at the cursor and move
//! it right or down. Content that would run past the bottom margin starts a
//! new page, which re-runs the registered page header.

use super::font_manager::{BaseFont, FontManager, TextLayout};
use super::pdf_writer::{PdfWriter, PdfWriterConfig};
use crate::error::{Error, Result};
use crate::layout::sink::{Align, CursorAdvance, DocumentSink, PageHeader};
use crate::layout::style::FontRole;
use std::path::Path;

/// Points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Page size and margins, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Page width
    pub width: f32,
    /// Page height
    pub height: f32,
    /// Left margin
    pub left: f32,
    /// Top margin
    pub top: f32,
    /// Right margin
    pub right: f32,
    /// Distance from the bottom edge that triggers a page break
    pub bottom: f32,
    /// Horizontal padding inside a cell
    pub cell_margin: f32,
}

impl PageGeometry {
    /// A4 portrait, 10 mm margins, page break 20 mm from the bottom.
    pub fn a4() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            left: 10.0,
            top: 10.0,
            right: 10.0,
            bottom: 20.0,
            cell_margin: 1.0,
        }
    }

    /// Lowest y a cell may reach before a page break.
    pub fn break_trigger(&self) -> f32 {
        self.height - self.bottom
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveFont {
    role: FontRole,
    base: BaseFont,
    size: f32,
}

/// A PDF document being laid out.
pub struct PdfCanvas {
    writer: PdfWriter,
    fonts: FontManager,
    layout: TextLayout,
    geometry: PageGeometry,
    header: Option<PageHeader>,
    in_header: bool,
    current_page: Option<usize>,
    font: Option<ActiveFont>,
    x: f32,
    y: f32,
}

impl PdfCanvas {
    /// Create an A4 canvas.
    pub fn new(config: PdfWriterConfig) -> Self {
        Self::with_geometry(config, PageGeometry::a4())
    }

    /// Create a canvas with custom page geometry.
    pub fn with_geometry(config: PdfWriterConfig, geometry: PageGeometry) -> Self {
        Self {
            writer: PdfWriter::with_config(config),
            fonts: FontManager::new(),
            layout: TextLayout::new(),
            geometry,
            header: None,
            in_header: false,
            current_page: None,
            font: None,
            x: geometry.left,
            y: geometry.top,
        }
    }

    /// Page geometry in use.
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Current horizontal cursor position.
    pub fn cursor_x(&self) -> f32 {
        self.x
    }

    /// Role of the active font, if one is selected.
    pub fn active_role(&self) -> Option<FontRole> {
        self.font.map(|f| f.role)
    }

    /// Set the document title written to the Info dictionary.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.writer.set_title(title);
    }

    /// Serialize the document.
    pub fn finish(&self) -> Result<Vec<u8>> {
        self.writer.finish()
    }

    fn require_page(&self) -> Result<usize> {
        self.current_page.ok_or(Error::NoPage)
    }

    fn require_font(&self) -> Result<ActiveFont> {
        self.font.ok_or(Error::NoActiveFont)
    }

    fn width_mm(&self, encoded: &[u8], font: &ActiveFont) -> f32 {
        self.fonts.encoded_width(encoded, font.base, font.size) / PT_PER_MM
    }

    fn remaining_width(&self) -> f32 {
        self.geometry.width - self.geometry.right - self.x
    }

    /// Start a new page if a cell of `height` would cross the break line.
    ///
    /// The horizontal position survives the break. A failing page header
    /// only costs the header; the cell that triggered the break is still placed.
    fn break_if_needed(&mut self, height: f32) {
        if !self.in_header && self.y + height > self.geometry.break_trigger() {
            let x = self.x;
            log::debug!("Page break at y={:.2} on page {}", self.y, self.writer.page_count());
            if let Err(e) = self.start_page() {
                log::warn!("Page header failed on page {}: {}", self.writer.page_count(), e);
            }
            self.x = x;
        }
    }

    /// Draw one cell at the cursor without moving it.
    fn cell(&mut self, width: f32, height: f32, text: &str, align: Align) -> Result<f32> {
        let page = self.require_page()?;
        if text.is_empty() {
            self.break_if_needed(height);
            return Ok(if width == 0.0 { self.remaining_width() } else { width });
        }

        let font = self.require_font()?;
        let encoded = self.fonts.encode(text, font.base)?;
        self.break_if_needed(height);
        // The break may have opened a new page.
        let page = self.current_page.unwrap_or(page);

        let width = if width == 0.0 { self.remaining_width() } else { width };
        let text_width = self.width_mm(&encoded, &font);
        let cell_margin = self.geometry.cell_margin;
        let dx = match align {
            Align::Left => cell_margin,
            Align::Center => (width - text_width) / 2.0,
            Align::Right => width - cell_margin - text_width,
        };

        let font_size_mm = font.size / PT_PER_MM;
        let baseline = self.y + 0.5 * height + 0.3 * font_size_mm;
        let x_pt = (self.x + dx) * PT_PER_MM;
        let y_pt = (self.geometry.height - baseline) * PT_PER_MM;

        if let Some(mut builder) = self.writer.page(page) {
            builder.add_text(font.base, font.size, x_pt, y_pt, &encoded);
        }
        Ok(width)
    }

    fn advance(&mut self, start_x: f32, width: f32, height: f32, advance: CursorAdvance) {
        match advance {
            CursorAdvance::Right => self.x = start_x + width,
            CursorAdvance::NextLine => {
                self.x = self.geometry.left;
                self.y += height;
            },
        }
    }
}

impl DocumentSink for PdfCanvas {
    fn set_page_header(&mut self, header: PageHeader) {
        self.header = Some(header);
    }

    fn start_page(&mut self) -> Result<()> {
        let page = self
            .writer
            .add_page(self.geometry.width * PT_PER_MM, self.geometry.height * PT_PER_MM)
            .index();
        self.current_page = Some(page);
        self.x = self.geometry.left;
        self.y = self.geometry.top;

        let Some(mut header) = self.header.take() else {
            return Ok(());
        };
        let saved_font = self.font;
        self.in_header = true;
        let outcome = header(&mut *self as &mut dyn DocumentSink);
        self.in_header = false;
        self.header = Some(header);
        self.font = saved_font;
        outcome
    }

    fn set_font(&mut self, role: FontRole) -> Result<()> {
        let spec = role.spec();
        let base = self.fonts.select_font(&spec)?;
        self.font = Some(ActiveFont {
            role,
            base,
            size: spec.size,
        });
        Ok(())
    }

    fn place_text(
        &mut self,
        width: f32,
        height: f32,
        text: &str,
        align: Align,
        advance: CursorAdvance,
    ) -> Result<()> {
        let width = self.cell(width, height, text, align)?;
        let start_x = self.x;
        self.advance(start_x, width, height, advance);
        Ok(())
    }

    fn place_wrapped_text(
        &mut self,
        width: f32,
        height: f32,
        text: &str,
        advance: CursorAdvance,
    ) -> Result<()> {
        self.require_page()?;
        let font = self.require_font()?;

        let start_x = self.x;
        let width = if width == 0.0 { self.remaining_width() } else { width };
        let max_width_pt = (width - 2.0 * self.geometry.cell_margin) * PT_PER_MM;
        let lines = self.layout.wrap_text(text, font.base, font.size, max_width_pt)?;

        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self.y += height;
            }
            self.x = start_x;
            self.cell(width, height, line, Align::Left)?;
        }

        self.advance(start_x, width, height, advance);
        Ok(())
    }

    fn measure_text_width(&self, text: &str) -> Result<f32> {
        let font = self.require_font()?;
        let encoded = self.fonts.encode(text, font.base)?;
        Ok(self.width_mm(&encoded, &font))
    }

    fn draw_horizontal_rule(&mut self, y: f32, thickness: f32) -> Result<()> {
        let page = self.require_page()?;
        let y_pt = (self.geometry.height - y) * PT_PER_MM;
        let x1 = self.geometry.left * PT_PER_MM;
        let x2 = (self.geometry.width - self.geometry.right) * PT_PER_MM;
        if let Some(mut builder) = self.writer.page(page) {
            builder.draw_line(x1, y_pt, x2, y_pt, thickness * PT_PER_MM);
        }
        Ok(())
    }

    fn vertical_advance(&mut self, amount: f32) {
        self.x = self.geometry.left;
        self.y += amount;
    }

    fn cursor_y(&self) -> f32 {
        self.y
    }

    fn page_count(&self) -> usize {
        self.writer.page_count()
    }

    fn finalize(&mut self, path: &Path) -> Result<()> {
        self.writer.save(path)?;
        log::info!("Wrote {} page(s) to {}", self.writer.page_count(), path.display());
        Ok(())
    }
}
