//! Section-tagged tabular input.
//!
//! ```text
//! CSV text
//!     ↓
//! [reader] (records of raw fields)
//!     ↓
//! [vocabulary] (key/value normalisation, key classification)
//!     ↓
//! [parser] (open-block state machine)
//!     ↓
//! Profile
//! ```

pub mod parser;
pub mod reader;
pub mod vocabulary;

pub use parser::{parse, parse_file, parse_records, read_rows, ParserContext, Row};
pub use reader::{read_path, read_str, Record};
pub use vocabulary::{normalize_key, normalize_value, FieldOwner, KeyVocabulary, RowKey};
