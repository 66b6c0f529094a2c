//! Page layout.
//!
//! ```text
//! Profile
//!     ↓
//! [LayoutEngine] (section order, per-entity formatting rules)
//!     ↓
//! [DocumentSink] (cursor, measurement, pagination)
//! ```
//!
//! The engine knows nothing about the output format; [`crate::writer::PdfCanvas`]
//! is the PDF implementation of the sink.

pub mod engine;
pub mod sink;
pub mod style;

pub use engine::{render_page_header, ErrorPolicy, LayoutEngine, RenderSummary};
pub use sink::{Align, CursorAdvance, DocumentSink, PageHeader};
pub use style::{FontRole, FontSpec, FontWeight};
