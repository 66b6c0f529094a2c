//! Section-tagged record parser.
//!
//! Rebuilds a [`Profile`] from a flat sequence of `(key, value)` rows in one
//! left-to-right pass. Repeated entities (employers, degrees) are tracked by a
//! two-slot [`ParserContext`]: at most one open experience block and at most
//! one open education block.
//!
//! Transitions:
//!
//! ```text
//! company            -> begin_experience  (flushes the open experience first)
//! <education start>  -> begin_education   (flushes the open education first)
//! end of input       -> close_open_blocks (education, then experience)
//! ```
//!
//! Field rows only touch a block that is open; anything else is ignored.

use super::reader::{self, Record};
use super::vocabulary::{normalize_key, normalize_value, FieldOwner, KeyVocabulary, RowKey};
use crate::error::Result;
use crate::profile::{EducationEntry, ExperienceEntry, Profile};
use std::path::Path;

/// Separator placed between contact sub-fields.
pub const CONTACT_SEPARATOR: &str = " | ";

/// A `(key, value)` row with normalisation already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Trimmed, lower-cased key
    pub key: String,
    /// Trimmed value with one layer of surrounding quotes removed
    pub value: String,
    /// 1-based source line (0 when the row did not come from a file)
    pub line: usize,
}

impl Row {
    /// Build a row from raw key and value text.
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: normalize_key(key),
            value: normalize_value(value),
            line: 0,
        }
    }

    /// Build a row from a record; records with fewer than two fields yield `None`.
    pub fn from_record(record: &Record) -> Option<Self> {
        match record.fields.as_slice() {
            [key, value, ..] => Some(Self {
                line: record.line,
                ..Self::new(key, value)
            }),
            _ => None,
        }
    }
}

impl<K: AsRef<str>, V: AsRef<str>> From<(K, V)> for Row {
    fn from((key, value): (K, V)) -> Self {
        Row::new(key.as_ref(), value.as_ref())
    }
}

/// Mutable parsing state: the profile under construction plus the open blocks.
#[derive(Debug, Default)]
pub struct ParserContext {
    profile: Profile,
    open_experience: Option<ExperienceEntry>,
    open_education: Option<EducationEntry>,
}

impl ParserContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// The open experience block, if any.
    pub fn open_experience(&self) -> Option<&ExperienceEntry> {
        self.open_experience.as_ref()
    }

    /// The open education block, if any.
    pub fn open_education(&self) -> Option<&EducationEntry> {
        self.open_education.as_ref()
    }

    /// Flush the open experience block (if any) and open a new one.
    pub fn begin_experience(&mut self, company: &str) {
        if let Some(done) = self.open_experience.take() {
            self.profile.experiences.push(done);
        }
        self.open_experience = Some(ExperienceEntry::new(company));
    }

    /// Flush the open education block (if any) and open a new one.
    pub fn begin_education(&mut self, institution: &str) {
        if let Some(done) = self.open_education.take() {
            self.profile.education.push(done);
        }
        self.open_education = Some(EducationEntry::new(institution));
    }

    /// Flush both open blocks, education first.
    pub fn close_open_blocks(&mut self) {
        if let Some(done) = self.open_education.take() {
            self.profile.education.push(done);
        }
        if let Some(done) = self.open_experience.take() {
            self.profile.experiences.push(done);
        }
    }

    /// Apply one row under the given vocabulary.
    pub fn apply(&mut self, row: &Row, vocabulary: KeyVocabulary) {
        let value = row.value.as_str();
        let key = vocabulary.classify(&row.key);

        match key {
            RowKey::Name => self.profile.personal_info.name = value.to_string(),
            RowKey::Contact => {
                let contact = &mut self.profile.personal_info.contact_details;
                contact.push_str(value);
                contact.push_str(CONTACT_SEPARATOR);
            },
            RowKey::Summary => self.profile.summary = value.to_string(),
            RowKey::Projects => self.profile.projects = value.to_string(),
            RowKey::Skills => self.profile.skills = value.to_string(),
            RowKey::Company => self.begin_experience(value),
            RowKey::Institution => self.begin_education(value),
            RowKey::Position => {
                if let Some(exp) = self.open_experience.as_mut() {
                    exp.position = value.to_string();
                } else {
                    skip(row, "no open experience block");
                }
            },
            RowKey::Details => {
                if let Some(exp) = self.open_experience.as_mut() {
                    exp.details.push(value.to_string());
                } else {
                    skip(row, "no open experience block");
                }
            },
            RowKey::Continuation => match self.open_experience.as_mut() {
                Some(exp) if !value.is_empty() => exp.details.push(value.to_string()),
                _ => skip(row, "continuation without an open experience block"),
            },
            RowKey::Description => {
                if let Some(edu) = self.open_education.as_mut() {
                    edu.description.push_str(value);
                } else {
                    skip(row, "no open education block");
                }
            },
            RowKey::Location(owner) => {
                self.set_field(row, owner, |exp| &mut exp.location, |edu| &mut edu.location)
            },
            RowKey::Date(owner) => {
                self.set_field(row, owner, |exp| &mut exp.dates, |edu| &mut edu.date)
            },
            RowKey::Unknown => skip(row, "unrecognized key"),
        }
    }

    /// Overwrite a location/date field on whichever open block owns it.
    fn set_field(
        &mut self,
        row: &Row,
        owner: FieldOwner,
        experience_field: fn(&mut ExperienceEntry) -> &mut String,
        education_field: fn(&mut EducationEntry) -> &mut String,
    ) {
        let target = match owner {
            FieldOwner::Experience => self.open_experience.as_mut().map(experience_field),
            FieldOwner::Education => self.open_education.as_mut().map(education_field),
            FieldOwner::Shared => match self.open_education.as_mut() {
                Some(edu) => Some(education_field(edu)),
                None => self.open_experience.as_mut().map(experience_field),
            },
        };

        match target {
            Some(field) => *field = row.value.clone(),
            None => skip(row, "no open block for field"),
        }
    }

    /// Close open blocks and return the finished profile.
    pub fn finish(mut self) -> Profile {
        self.close_open_blocks();

        let contact = &mut self.profile.personal_info.contact_details;
        let trimmed_len = contact.trim_end_matches([' ', '|']).len();
        contact.truncate(trimmed_len);

        self.profile
    }
}

fn skip(row: &Row, reason: &str) {
    log::debug!("Ignoring row '{}' at line {}: {}", row.key, row.line, reason);
}

/// Parse rows into a profile.
///
/// Total over any input: unrecognised or out-of-context rows are skipped.
pub fn parse<I>(rows: I, vocabulary: KeyVocabulary) -> Profile
where
    I: IntoIterator,
    I::Item: Into<Row>,
{
    let mut context = ParserContext::new();
    for row in rows {
        context.apply(&row.into(), vocabulary);
    }
    let profile = context.finish();

    log::debug!(
        "Parsed profile: {} experience entries, {} education entries",
        profile.experiences.len(),
        profile.education.len()
    );
    profile
}

/// Parse records; records with fewer than two fields are skipped.
pub fn parse_records(records: &[Record], vocabulary: KeyVocabulary) -> Profile {
    parse(records.iter().filter_map(Row::from_record), vocabulary)
}

/// Read the rows of a CSV file.
///
/// # Errors
///
/// Propagates the reader's I/O, UTF-8, and syntax errors.
pub fn read_rows(path: impl AsRef<Path>) -> Result<Vec<Row>> {
    let records = reader::read_path(path)?;
    Ok(records.iter().filter_map(Row::from_record).collect())
}

/// Read and parse a CSV file.
///
/// Never fails: if the file cannot be read the error is logged and an empty
/// profile is returned, which callers treat as "nothing to render".
pub fn parse_file(path: impl AsRef<Path>, vocabulary: KeyVocabulary) -> Profile {
    let path = path.as_ref();
    match read_rows(path) {
        Ok(rows) => {
            log::info!("Read {} rows from {}", rows.len(), path.display());
            parse(rows, vocabulary)
        },
        Err(e) => {
            log::error!("Error reading {}: {}", path.display(), e);
            Profile::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_pairs(pairs: &[(&str, &str)]) -> Profile {
        parse(pairs.iter().copied(), KeyVocabulary::Prefixed)
    }

    #[test]
    fn test_row_normalization() {
        let row = Row::new("  Company ", " \"Acme\" ");
        assert_eq!(row.key, "company");
        assert_eq!(row.value, "Acme");
    }

    #[test]
    fn test_row_from_short_record() {
        let record = Record {
            line: 4,
            fields: vec!["orphan".to_string()],
        };
        assert!(Row::from_record(&record).is_none());

        let record = Record {
            line: 5,
            fields: vec!["name".into(), "Jane".into(), "ignored".into()],
        };
        let row = Row::from_record(&record).unwrap();
        assert_eq!(row.value, "Jane");
        assert_eq!(row.line, 5);
    }

    #[test]
    fn test_begin_experience_flushes_previous() {
        let mut ctx = ParserContext::new();
        ctx.begin_experience("A");
        ctx.begin_experience("B");
        assert_eq!(ctx.open_experience().unwrap().company, "B");
        let profile = ctx.finish();
        assert_eq!(profile.experiences.len(), 2);
        assert_eq!(profile.experiences[0].company, "A");
    }

    #[test]
    fn test_close_open_blocks_is_idempotent() {
        let mut ctx = ParserContext::new();
        ctx.begin_education("MIT");
        ctx.close_open_blocks();
        ctx.close_open_blocks();
        assert!(ctx.open_education().is_none());
        assert_eq!(ctx.finish().education.len(), 1);
    }

    #[test]
    fn test_flush_on_reopen() {
        let profile = parse_pairs(&[
            ("company", "A"),
            ("position", "X"),
            ("company", "B"),
            ("position", "Y"),
        ]);
        assert_eq!(profile.experiences.len(), 2);
        assert_eq!(profile.experiences[0].company, "A");
        assert_eq!(profile.experiences[0].position, "X");
        assert_eq!(profile.experiences[1].company, "B");
        assert_eq!(profile.experiences[1].position, "Y");
    }

    #[test]
    fn test_field_before_block_is_ignored() {
        let profile = parse_pairs(&[("location", "Nowhere"), ("details", "orphan"), ("company", "A")]);
        assert_eq!(profile.experiences.len(), 1);
        assert!(profile.experiences[0].location.is_empty());
        assert!(profile.experiences[0].details.is_empty());
    }

    #[test]
    fn test_location_alone_creates_nothing() {
        let profile = parse_pairs(&[("location", "Nowhere")]);
        assert!(profile.experiences.is_empty());
        assert!(profile.is_empty());
    }

    #[test]
    fn test_contact_assembly() {
        let profile = parse_pairs(&[("phone", "555-1234"), ("email", "a@b.com")]);
        assert_eq!(profile.personal_info.contact_details, "555-1234 | a@b.com");
    }

    #[test]
    fn test_contact_any_order_and_keys() {
        let profile = parse_pairs(&[
            ("linkedin", "linkedin.com/in/jd"),
            ("contact", "Bay Area"),
            ("phone", "555"),
        ]);
        assert_eq!(
            profile.personal_info.contact_details,
            "linkedin.com/in/jd | Bay Area | 555"
        );
    }

    #[test]
    fn test_description_concatenation() {
        let profile = parse_pairs(&[
            ("educational institute", "State U"),
            ("edu. description", "Part1"),
            ("edu. description", "Part2"),
        ]);
        assert_eq!(profile.education[0].description, "Part1Part2");
    }

    #[test]
    fn test_continuation_lines() {
        let profile = parse_pairs(&[
            ("company", "A"),
            ("details", "First bullet"),
            ("", "continued text"),
        ]);
        assert_eq!(profile.experiences[0].details, vec!["First bullet", "continued text"]);
    }

    #[test]
    fn test_empty_continuation_is_ignored() {
        let profile = parse_pairs(&[("company", "A"), ("", "   ")]);
        assert!(profile.experiences[0].details.is_empty());
    }

    #[test]
    fn test_continuation_does_not_reach_education() {
        let profile = parse_pairs(&[("educational institute", "State U"), ("", "stray")]);
        assert!(profile.education[0].description.is_empty());
        assert!(profile.experiences.is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let profile = parse_pairs(&[("summary", "first"), ("summary", "second")]);
        assert_eq!(profile.summary, "second");
    }

    #[test]
    fn test_empty_blocks_are_kept() {
        let profile = parse_pairs(&[("company", ""), ("company", "")]);
        assert_eq!(profile.experiences.len(), 2);
    }

    #[test]
    fn test_prefixed_education_fields() {
        let profile = parse_pairs(&[
            ("company", "Acme"),
            ("educational institute", "State U"),
            ("edu. location", "Boston, MA"),
            ("edu. date", "May 2008"),
            ("location", "New York, NY"),
            ("date", "2019 - Present"),
        ]);
        let edu = &profile.education[0];
        assert_eq!(edu.location, "Boston, MA");
        assert_eq!(edu.date, "May 2008");
        let exp = &profile.experiences[0];
        assert_eq!(exp.location, "New York, NY");
        assert_eq!(exp.dates, "2019 - Present");
    }

    #[test]
    fn test_unprefixed_shared_keys_prefer_open_education() {
        let rows = [
            ("company", "Acme"),
            ("location", "New York, NY"),
            ("institution", "State U"),
            ("location", "Boston, MA"),
            ("description", "B.S."),
        ];
        let profile = parse(rows.iter().copied(), KeyVocabulary::Unprefixed);
        assert_eq!(profile.experiences[0].location, "New York, NY");
        assert_eq!(profile.education[0].location, "Boston, MA");
        assert_eq!(profile.education[0].description, "B.S.");
    }

    #[test]
    fn test_other_vocabulary_keys_are_ignored() {
        let profile = parse_pairs(&[("institution", "State U"), ("description", "x")]);
        assert!(profile.education.is_empty());
    }

    #[test]
    fn test_parse_records_skips_short_records() {
        let records = reader::read_str("name,Jane\norphan\n\nskills,Rust\n").unwrap();
        let profile = parse_records(&records, KeyVocabulary::Prefixed);
        assert_eq!(profile.personal_info.name, "Jane");
        assert_eq!(profile.skills, "Rust");
    }

    #[test]
    fn test_parse_file_missing_returns_empty() {
        let profile = parse_file("/nonexistent/resume_data.csv", KeyVocabulary::Prefixed);
        assert!(profile.is_empty());
    }
}
