//! Tabular record reader.
//!
//! Splits CSV text into records of fields. The dialect is the common one:
//!
//! - Fields are separated by `,`
//! - A field may be wrapped in `"`; inside it `""` is a literal quote and
//!   separators and line breaks are literal text
//! - Records end at LF, CRLF, or CR
//! - There is no header row
//! - A completely blank line is a record with zero fields
//!
//! Text following a closing quote up to the next separator is appended to the
//! field, the same leniency most CSV readers apply to `"a"b`. A quoted field
//! that is never closed takes the rest of the input as its value; the records
//! before it are kept.

use crate::error::{Error, Result};
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{is_not, tag, take_till},
    character::complete::char,
    combinator::{map, opt, value},
    multi::{many0, separated_list1},
    sequence::{preceded, terminated},
};
use std::path::Path;

/// One record of the tabular input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number where the record starts
    pub line: usize,
    /// Raw field values, unquoted but otherwise untouched
    pub fields: Vec<String>,
}

fn is_field_end(c: char) -> bool {
    matches!(c, ',' | '\r' | '\n')
}

/// Parse a line ending (CRLF, LF, or bare CR).
fn line_ending(input: &str) -> IResult<&str, &str> {
    alt((tag("\r\n"), tag("\n"), tag("\r")))(input)
}

/// Parse the body of a quoted field, up to but excluding the closing quote.
fn quoted_body(input: &str) -> IResult<&str, String> {
    map(
        many0(alt((is_not("\""), value("\"", tag("\"\""))))),
        |parts: Vec<&str>| parts.concat(),
    )(input)
}

/// A field's text, and whether its quoting was closed.
type Field = (String, bool);

/// Parse a quoted field.
///
/// A missing closing quote is not an error: the body then runs to the end
/// of the input and the field is reported as unterminated.
fn quoted_field(input: &str) -> IResult<&str, Field> {
    let (input, mut field) = preceded(char('"'), quoted_body)(input)?;
    let (input, closing) = opt(char('"'))(input)?;
    if closing.is_none() {
        return Ok((input, (field, false)));
    }
    let (input, trailing) = take_till(is_field_end)(input)?;
    field.push_str(trailing);
    Ok((input, (field, true)))
}

/// Parse an unquoted field (possibly empty).
fn unquoted_field(input: &str) -> IResult<&str, Field> {
    map(take_till(is_field_end), |s: &str| (s.to_string(), true))(input)
}

fn field(input: &str) -> IResult<&str, Field> {
    alt((quoted_field, unquoted_field))(input)
}

/// Parse one record and its terminating line ending, if any.
///
/// The flag is false when some quoted field in the record was never closed.
fn record(input: &str) -> IResult<&str, (Vec<String>, bool)> {
    if let Ok((rest, _)) = line_ending(input) {
        return Ok((rest, (Vec::new(), true)));
    }
    map(
        terminated(separated_list1(char(','), field), opt(line_ending)),
        |fields: Vec<Field>| {
            let closed = fields.iter().all(|(_, closed)| *closed);
            (fields.into_iter().map(|(text, _)| text).collect(), closed)
        },
    )(input)
}

/// Count line breaks, treating CRLF, LF and a bare CR as one each.
fn line_breaks(text: &str) -> usize {
    text.matches('\n').count() + text.matches('\r').count() - text.matches("\r\n").count()
}

/// Split CSV text into records.
///
/// # Errors
///
/// Returns [`Error::Record`] if a record cannot be split at all.
pub fn read_str(input: &str) -> Result<Vec<Record>> {
    let mut remaining = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut records = Vec::new();
    let mut line = 1;

    while !remaining.is_empty() {
        match record(remaining) {
            Ok((rest, (fields, closed))) => {
                if !closed {
                    log::warn!("Unterminated quoted field at line {}; reading it to the end of input", line);
                }
                let consumed = &remaining[..remaining.len() - rest.len()];
                records.push(Record { line, fields });
                line += line_breaks(consumed);
                remaining = rest;
            },
            Err(e) => {
                return Err(Error::Record {
                    line,
                    reason: e.to_string(),
                });
            },
        }
    }

    log::debug!("Read {} records", records.len());
    Ok(records)
}

/// Read and split a CSV file into records.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, [`Error::Utf8`] if it
/// is not UTF-8, or [`Error::Record`] if a record cannot be split.
pub fn read_path(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let bytes = std::fs::read(path.as_ref())?;
    let text = String::from_utf8(bytes)?;
    read_str(&text)
}
