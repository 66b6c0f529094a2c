//! Fixed typographic rules.
//!
//! All lengths are in document units (millimetres). None of this is
//! runtime-configurable.

/// Element class that selects a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontRole {
    /// Name line in the page header
    Header,
    /// Section titles and the first column of entry rows
    Subheader,
    /// Job title line
    Position,
    /// Everything else
    Body,
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    /// Regular
    Normal,
    /// Bold
    Bold,
}

/// A family / weight / size triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    /// Font family name
    pub family: &'static str,
    /// Weight
    pub weight: FontWeight,
    /// Size in points
    pub size: f32,
}

impl FontSpec {
    /// True for bold weights.
    pub fn is_bold(&self) -> bool {
        self.weight == FontWeight::Bold
    }
}

/// Name line.
pub const FONT_HEADER: FontSpec = FontSpec {
    family: "Helvetica",
    weight: FontWeight::Bold,
    size: 14.0,
};

/// Section titles, company and institution names.
pub const FONT_SUBHEADER: FontSpec = FontSpec {
    family: "Helvetica",
    weight: FontWeight::Bold,
    size: 12.0,
};

/// Job titles.
pub const FONT_POSITION: FontSpec = FontSpec {
    family: "Helvetica",
    weight: FontWeight::Bold,
    size: 10.0,
};

/// Paragraphs, bullets, contact line, locations and dates.
pub const FONT_BODY: FontSpec = FontSpec {
    family: "Helvetica",
    weight: FontWeight::Normal,
    size: 10.0,
};

impl FontRole {
    /// The font bound to this role.
    pub fn spec(self) -> FontSpec {
        match self {
            FontRole::Header => FONT_HEADER,
            FontRole::Subheader => FONT_SUBHEADER,
            FontRole::Position => FONT_POSITION,
            FontRole::Body => FONT_BODY,
        }
    }
}

/// Small vertical gap.
pub const SPACING_SMALL: f32 = 2.0;
/// Medium vertical gap; also the height of single-line rows.
pub const SPACING_MEDIUM: f32 = 5.0;
/// Large gap; height of the name line.
pub const SPACING_LARGE: f32 = 8.0;

/// Width of the bullet marker cell.
pub const BULLET_INDENT: f32 = 8.0;
/// Line height of wrapped bullet text.
pub const BULLET_LINE_HEIGHT: f32 = SPACING_SMALL + 3.0;
/// Bullet marker text.
pub const BULLET_MARKER: &str = " -";

/// Thickness of the rule under section titles.
pub const RULE_THICKNESS: f32 = 0.3;
/// Gap after a section title's rule.
pub const RULE_GAP: f32 = SPACING_SMALL;
/// Gap between a position line and its bullets.
pub const POSITION_GAP: f32 = 1.0;

/// Section titles, in output order.
pub const TITLE_SUMMARY: &str = "SUMMARY";
/// Experience section title.
pub const TITLE_EXPERIENCE: &str = "PROFESSIONAL EXPERIENCE";
/// Education section title.
pub const TITLE_EDUCATION: &str = "EDUCATION";
/// Skills section title.
pub const TITLE_SKILLS: &str = "SKILLS & OTHER";
/// Projects section title.
pub const TITLE_PROJECTS: &str = "PROJECTS";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_bindings() {
        assert_eq!(FontRole::Header.spec().size, 14.0);
        assert!(FontRole::Subheader.spec().is_bold());
        assert!(FontRole::Position.spec().is_bold());
        assert!(!FontRole::Body.spec().is_bold());
        assert_eq!(FontRole::Body.spec().family, "Helvetica");
    }

    #[test]
    fn test_spacing_scale() {
        assert!(SPACING_SMALL < SPACING_MEDIUM && SPACING_MEDIUM < SPACING_LARGE);
        assert_eq!(BULLET_LINE_HEIGHT, 5.0);
    }
}
