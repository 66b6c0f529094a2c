//! Capability interface between the layout engine and a paginated backend.

use super::style::FontRole;
use crate::error::Result;
use std::path::Path;

/// Horizontal alignment of text inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Flush left (after the cell padding)
    #[default]
    Left,
    /// Centered in the cell
    Center,
    /// Flush right (before the cell padding)
    Right,
}

/// Where the cursor goes after a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorAdvance {
    /// Stay on the same line, immediately right of the cell
    #[default]
    Right,
    /// Back to the left margin, one cell height down
    NextLine,
}

/// Routine invoked by the sink at the top of every new page.
///
/// It receives the sink itself so it can place content; the sink restores
/// the previously active font once it returns.
pub type PageHeader = Box<dyn FnMut(&mut dyn DocumentSink) -> Result<()>>;

/// A paginated output backend.
///
/// Implementations own a cursor and an output buffer and break pages on
/// their own: any placement that would cross the bottom margin starts a new
/// page first, which re-runs the registered [`PageHeader`].
///
/// Widths of `0.0` mean "up to the right margin".
pub trait DocumentSink {
    /// Register the routine run at the top of every page.
    fn set_page_header(&mut self, header: PageHeader);

    /// Begin a new page and run the page header.
    fn start_page(&mut self) -> Result<()>;

    /// Select the font used by subsequent placements and measurements.
    fn set_font(&mut self, role: FontRole) -> Result<()>;

    /// Place a single-line cell.
    fn place_text(
        &mut self,
        width: f32,
        height: f32,
        text: &str,
        align: Align,
        advance: CursorAdvance,
    ) -> Result<()>;

    /// Place text wrapped to `width`, one cell of `height` per line.
    fn place_wrapped_text(
        &mut self,
        width: f32,
        height: f32,
        text: &str,
        advance: CursorAdvance,
    ) -> Result<()>;

    /// Rendered width of `text` in the active font.
    fn measure_text_width(&self, text: &str) -> Result<f32>;

    /// Draw a rule across the content width at vertical position `y`.
    fn draw_horizontal_rule(&mut self, y: f32, thickness: f32) -> Result<()>;

    /// Return to the left margin and move down by `amount`.
    fn vertical_advance(&mut self, amount: f32);

    /// Current vertical cursor position.
    fn cursor_y(&self) -> f32;

    /// Number of pages started so far.
    fn page_count(&self) -> usize;

    /// Serialize the document to `path`.
    fn finalize(&mut self, path: &Path) -> Result<()>;
}
