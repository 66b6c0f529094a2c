//! Error types for the résumé pipeline.
//!
//! This module defines the errors that can occur while reading the tabular
//! record, laying out the document, and writing the PDF.

/// Result type alias for résumé pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while producing a résumé.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input file is not valid UTF-8
    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Malformed tabular input at a specific line
    #[error("Malformed record at line {line}: {reason}")]
    Record {
        /// 1-based line where the offending row starts
        line: usize,
        /// Reason for the failure
        reason: String,
    },

    /// Character cannot be encoded in the font's encoding
    #[error("Character {ch:?} is outside the range of characters supported by {font}")]
    UnsupportedCharacter {
        /// The offending character
        ch: char,
        /// Base font name
        font: String,
    },

    /// Placement attempted before the first page was started
    #[error("No page has been started")]
    NoPage,

    /// Placement or measurement attempted before a font was selected
    #[error("No font has been selected")]
    NoActiveFont,

    /// Layout error (generic)
    #[error("Layout error: {0}")]
    Layout(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_error() {
        let err = Error::Record {
            line: 12,
            reason: "expected ','".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("line 12"));
        assert!(msg.contains("expected ','"));
    }

    #[test]
    fn test_unsupported_character_error() {
        let err = Error::UnsupportedCharacter {
            ch: '\u{4E2D}',
            font: "Helvetica".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Helvetica"));
        assert!(msg.contains('\u{4E2D}'));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(format!("{}", err).contains("missing.csv"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
