// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Résumé Oxide
//!
//! Turns a section-tagged, two-column CSV record into a paginated A4 PDF
//! résumé.
//!
//! ## Core Features
//!
//! - **Tabular Input**: RFC 4180 CSV reader built on `nom`, with quoted
//!   multi-line fields and line-accurate errors
//! - **Open-Block Parser**: rows open and fill experience and education
//!   blocks; unknown keys are ignored, never fatal
//! - **Layout Engine**: fixed section order, per-block error policy, a page
//!   header repeated on every page
//! - **PDF Output**: Base-14 Helvetica with exact metrics, WinAnsi text,
//!   optional Flate compression
//!
//! ## Architecture
//!
//! ```text
//! resume_data.csv
//!     ↓
//! [record] (reader → vocabulary → parser)
//!     ↓
//! Profile
//!     ↓
//! [layout] (LayoutEngine → DocumentSink)
//!     ↓
//! [writer] (PdfCanvas → PdfWriter)
//!     ↓
//! professional_resume.pdf
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use resume_oxide::api::ResumeBuilder;
//! use resume_oxide::ResumeConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ResumeConfig::new()
//!     .with_input("resume_data.csv")
//!     .with_output("professional_resume.pdf");
//! ResumeBuilder::new().config(config).generate()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Run configuration
pub mod config;

// Data model
pub mod profile;

// Tabular input
pub mod record;

// Page layout
pub mod layout;

// PDF output
pub mod object;
pub mod writer;

// High-level API
pub mod api;

pub use config::ResumeConfig;
pub use error::{Error, Result};
pub use layout::{ErrorPolicy, LayoutEngine, RenderSummary};
pub use profile::{EducationEntry, ExperienceEntry, PersonalInfo, Profile};
pub use record::{parse_file, KeyVocabulary};
