//! PDF writing module.
//!
//! ## Architecture
//!
//! ```text
//! DocumentSink calls
//!     ↓
//! [PdfCanvas] (cursor, cells, wrapping, pagination)
//!     ↓
//! [FontManager] / [TextLayout] (WinAnsi encoding, Helvetica metrics)
//!     ↓
//! [ContentStreamBuilder] (operators → content stream bytes)
//!     ↓
//! [PdfWriter] (assembles complete PDF structure)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Low-Level API (PdfWriter)
//!
//! ```ignore
//! use resume_oxide::writer::{BaseFont, FontManager, PdfWriter};
//!
//! let fonts = FontManager::new();
//! let mut writer = PdfWriter::new();
//! let text = fonts.encode("Hello, World!", BaseFont::Helvetica)?;
//! writer.add_page(595.28, 841.89).add_text(BaseFont::Helvetica, 12.0, 72.0, 720.0, &text);
//! let bytes = writer.finish()?;
//! ```

mod canvas;
mod content_stream;
mod font_manager;
pub mod object_serializer;
mod pdf_writer;

pub use canvas::{PageGeometry, PdfCanvas, PT_PER_MM};
pub use content_stream::{ContentStreamBuilder, ContentStreamOp};
pub use font_manager::{win_ansi_byte, BaseFont, FontManager, TextLayout};
pub use object_serializer::ObjectSerializer;
pub use pdf_writer::{pdf_date, PageBuilder, PdfWriter, PdfWriterConfig};
