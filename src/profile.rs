//! Parsed résumé data model.
//!
//! A [`Profile`] is what the record parser produces and what the layout
//! engine consumes. Every field is plain owned text so a profile can be
//! dumped, compared, and rendered any number of times.

use serde::{Deserialize, Serialize};

/// Name and assembled contact line shown in every page header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    /// Full name
    pub name: String,
    /// Contact sub-fields joined with `" | "` in encounter order
    pub contact_details: String,
}

/// One employer block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    /// Employer name
    pub company: String,
    /// Employer location
    pub location: String,
    /// Date range, printed right-aligned
    pub dates: String,
    /// Job title
    pub position: String,
    /// Bullet lines in source order
    pub details: Vec<String>,
}

impl ExperienceEntry {
    /// Start a new block for `company`.
    pub fn new(company: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            ..Self::default()
        }
    }
}

/// One degree / institution block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    /// Institution name
    pub institution: String,
    /// Institution location
    pub location: String,
    /// Graduation date, printed right-aligned
    pub date: String,
    /// Concatenation of every description row, no separator inserted
    pub description: String,
}

impl EducationEntry {
    /// Start a new block for `institution`.
    pub fn new(institution: impl Into<String>) -> Self {
        Self {
            institution: institution.into(),
            ..Self::default()
        }
    }
}

/// Complete parsed résumé.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Header information
    pub personal_info: PersonalInfo,
    /// Summary paragraph (empty = section omitted)
    pub summary: String,
    /// Employer blocks in source order
    pub experiences: Vec<ExperienceEntry>,
    /// Education blocks in source order
    pub education: Vec<EducationEntry>,
    /// Skills paragraph (empty = section omitted)
    pub skills: String,
    /// Projects paragraph (empty = section omitted)
    pub projects: String,
}

impl Profile {
    /// True when nothing at all was parsed.
    ///
    /// This is what an unreadable input produces; callers skip rendering.
    pub fn is_empty(&self) -> bool {
        self.personal_info.name.is_empty()
            && self.personal_info.contact_details.is_empty()
            && self.summary.is_empty()
            && self.experiences.is_empty()
            && self.education.is_empty()
            && self.skills.is_empty()
            && self.projects.is_empty()
    }
}
