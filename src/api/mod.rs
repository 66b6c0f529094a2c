//! High-level API: from a section-tagged CSV to a finished PDF.
//!
//! ## Quick Start
//!
//! ```ignore
//! use resume_oxide::api::{Generation, ResumeBuilder};
//! use resume_oxide::ResumeConfig;
//!
//! let config = ResumeConfig::new().with_input("resume_data.csv");
//! match ResumeBuilder::new().config(config).generate()? {
//!     Generation::Written { path, .. } => println!("wrote {}", path.display()),
//!     Generation::NoData => println!("nothing to render"),
//! }
//! ```
//!
//! ## In Memory
//!
//! ```ignore
//! use resume_oxide::api::Resume;
//! use resume_oxide::record::{parse, KeyVocabulary};
//!
//! let profile = parse([("Name", "Jane Doe"), ("Summary", "Engineer.")], KeyVocabulary::Prefixed);
//! let bytes = Resume::from_profile(&profile)?.into_bytes();
//! ```

mod resume_builder;

pub use resume_builder::{document_title, Generation, Resume, ResumeBuilder};
