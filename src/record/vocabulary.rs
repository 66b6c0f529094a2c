//! Row key vocabulary.
//!
//! Normalises raw keys and values and classifies keys into [`RowKey`]s.
//! Two education vocabularies exist in the wild and they disagree, so the
//! active one is chosen explicitly per run:
//!
//! | Role | [`KeyVocabulary::Prefixed`] | [`KeyVocabulary::Unprefixed`] |
//! |---|---|---|
//! | education start | `educational institute` | `institution` |
//! | education location | `edu. location` | `location` |
//! | education date | `edu. date` | `date` |
//! | education description | `edu. description` | `description` |
//!
//! In the unprefixed vocabulary `location` and `date` are shared with the
//! experience block; they go to the open education block when there is one
//! and to the open experience block otherwise.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which education key set is recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeyVocabulary {
    /// `educational institute` + `edu. location` / `edu. date` / `edu. description`
    #[default]
    Prefixed,
    /// `institution` + `location` / `date` / `description`
    Unprefixed,
}

impl KeyVocabulary {
    /// Classify a normalised key.
    pub fn classify(&self, key: &str) -> RowKey {
        match key {
            "" => return RowKey::Continuation,
            "name" => return RowKey::Name,
            "contact" | "phone" | "email" | "linkedin" => return RowKey::Contact,
            "summary" => return RowKey::Summary,
            "projects" => return RowKey::Projects,
            "skills" => return RowKey::Skills,
            "company" => return RowKey::Company,
            "position" => return RowKey::Position,
            "details" => return RowKey::Details,
            _ => {},
        }

        match (*self, key) {
            (KeyVocabulary::Prefixed, "educational institute") => RowKey::Institution,
            (KeyVocabulary::Prefixed, "edu. location") => RowKey::Location(FieldOwner::Education),
            (KeyVocabulary::Prefixed, "edu. date") => RowKey::Date(FieldOwner::Education),
            (KeyVocabulary::Prefixed, "edu. description") => RowKey::Description,
            (KeyVocabulary::Prefixed, "location") => RowKey::Location(FieldOwner::Experience),
            (KeyVocabulary::Prefixed, "date") => RowKey::Date(FieldOwner::Experience),

            (KeyVocabulary::Unprefixed, "institution") => RowKey::Institution,
            (KeyVocabulary::Unprefixed, "location") => RowKey::Location(FieldOwner::Shared),
            (KeyVocabulary::Unprefixed, "date") => RowKey::Date(FieldOwner::Shared),
            (KeyVocabulary::Unprefixed, "description") => RowKey::Description,

            _ => RowKey::Unknown,
        }
    }
}

impl fmt::Display for KeyVocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyVocabulary::Prefixed => write!(f, "prefixed"),
            KeyVocabulary::Unprefixed => write!(f, "unprefixed"),
        }
    }
}

impl FromStr for KeyVocabulary {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prefixed" => Ok(KeyVocabulary::Prefixed),
            "unprefixed" => Ok(KeyVocabulary::Unprefixed),
            other => Err(format!("unknown key vocabulary '{}'", other)),
        }
    }
}

/// Which open block a location/date row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOwner {
    /// Only the open experience block
    Experience,
    /// Only the open education block
    Education,
    /// The open education block if any, else the open experience block
    Shared,
}

/// Classified row key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKey {
    /// `name`
    Name,
    /// `contact`, `phone`, `email`, `linkedin`
    Contact,
    /// `summary`
    Summary,
    /// `projects`
    Projects,
    /// `skills`
    Skills,
    /// `company` (starts an experience block)
    Company,
    /// `position`
    Position,
    /// `details`
    Details,
    /// Empty key: continuation of the open experience's details
    Continuation,
    /// Education start key
    Institution,
    /// A location field
    Location(FieldOwner),
    /// A date field
    Date(FieldOwner),
    /// Education description (appends)
    Description,
    /// Anything else
    Unknown,
}

/// Normalise a raw key: trim whitespace and lower-case.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalise a raw value: trim whitespace and strip one surrounding `"` on each side.
pub fn normalize_value(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.to_string()
}
