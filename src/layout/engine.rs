//! Profile → layout commands.
//!
//! The engine walks a [`Profile`] in fixed section order and drives a
//! [`DocumentSink`]. Every block (page header, section title, entry,
//! paragraph) is placed as a unit; what happens when a sink call inside a
//! block fails is decided by the [`ErrorPolicy`].

use super::sink::{Align, CursorAdvance, DocumentSink};
use super::style::{self, FontRole};
use crate::error::Result;
use crate::profile::{EducationEntry, ExperienceEntry, PersonalInfo, Profile};
use serde::{Deserialize, Serialize};

/// What to do when a sink call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorPolicy {
    /// Log the failure, abandon the current block, and carry on with the next one
    #[default]
    BestEffort,
    /// Abort rendering with the first failure
    Strict,
}

/// Outcome of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    /// Blocks placed without error
    pub blocks_rendered: usize,
    /// Blocks abandoned under [`ErrorPolicy::BestEffort`]
    pub failures: usize,
}

impl RenderSummary {
    /// True if every block was placed.
    pub fn is_complete(&self) -> bool {
        self.failures == 0
    }
}

/// Lays a profile out on a sink.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    policy: ErrorPolicy,
}

impl LayoutEngine {
    /// Create an engine with the best-effort policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error policy.
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The active error policy.
    pub fn error_policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Render `profile` onto `sink`.
    ///
    /// Registers the page header with the sink, starts the first page, and
    /// emits SUMMARY, PROFESSIONAL EXPERIENCE, EDUCATION, SKILLS & OTHER and
    /// PROJECTS in that order. Empty sections are skipped entirely.
    ///
    /// # Errors
    ///
    /// Only under [`ErrorPolicy::Strict`]; best-effort failures are counted
    /// in the returned [`RenderSummary`] instead.
    pub fn render(&self, profile: &Profile, sink: &mut dyn DocumentSink) -> Result<RenderSummary> {
        let mut run = BlockRunner::new(self.policy);

        let info = profile.personal_info.clone();
        sink.set_page_header(Box::new(move |sink: &mut dyn DocumentSink| {
            render_page_header(sink, &info)
        }));

        run.block("page header", sink.start_page())?;

        if !profile.summary.is_empty() {
            run.block("summary title", section_title(sink, style::TITLE_SUMMARY))?;
            run.block("summary", paragraph(sink, &profile.summary))?;
        }

        if !profile.experiences.is_empty() {
            run.block("experience title", section_title(sink, style::TITLE_EXPERIENCE))?;
            for exp in &profile.experiences {
                run.block(&exp.company, experience(sink, exp))?;
            }
        }

        if !profile.education.is_empty() {
            run.block("education title", section_title(sink, style::TITLE_EDUCATION))?;
            for edu in &profile.education {
                run.block(&edu.institution, education(sink, edu))?;
            }
        }

        if !profile.skills.is_empty() {
            run.block("skills title", section_title(sink, style::TITLE_SKILLS))?;
            run.block("skills", paragraph(sink, &profile.skills))?;
        }

        if !profile.projects.is_empty() {
            run.block("projects title", section_title(sink, style::TITLE_PROJECTS))?;
            run.block("projects", paragraph(sink, &profile.projects))?;
        }

        log::info!(
            "Rendered {} blocks on {} page(s), {} failed",
            run.summary.blocks_rendered,
            sink.page_count(),
            run.summary.failures
        );
        Ok(run.summary)
    }
}

/// Applies the error policy to block outcomes.
struct BlockRunner {
    policy: ErrorPolicy,
    summary: RenderSummary,
}

impl BlockRunner {
    fn new(policy: ErrorPolicy) -> Self {
        Self {
            policy,
            summary: RenderSummary::default(),
        }
    }

    fn block(&mut self, name: &str, outcome: Result<()>) -> Result<()> {
        match outcome {
            Ok(()) => {
                log::debug!("Placed block '{}'", name);
                self.summary.blocks_rendered += 1;
                Ok(())
            },
            Err(e) => match self.policy {
                ErrorPolicy::Strict => Err(e),
                ErrorPolicy::BestEffort => {
                    log::warn!("Skipping block '{}': {}", name, e);
                    self.summary.failures += 1;
                    Ok(())
                },
            },
        }
    }
}

/// Centered name and contact line, then a medium gap.
pub fn render_page_header(sink: &mut dyn DocumentSink, info: &PersonalInfo) -> Result<()> {
    sink.set_font(FontRole::Header)?;
    sink.place_text(0.0, style::SPACING_LARGE, &info.name, Align::Center, CursorAdvance::NextLine)?;
    sink.set_font(FontRole::Body)?;
    sink.place_text(
        0.0,
        style::SPACING_MEDIUM,
        &info.contact_details,
        Align::Center,
        CursorAdvance::NextLine,
    )?;
    sink.vertical_advance(style::SPACING_MEDIUM);
    Ok(())
}

fn section_title(sink: &mut dyn DocumentSink, title: &str) -> Result<()> {
    sink.set_font(FontRole::Subheader)?;
    sink.place_text(0.0, style::SPACING_MEDIUM, title, Align::Left, CursorAdvance::NextLine)?;
    let y = sink.cursor_y();
    sink.draw_horizontal_rule(y, style::RULE_THICKNESS)?;
    sink.vertical_advance(style::RULE_GAP);
    Ok(())
}

fn paragraph(sink: &mut dyn DocumentSink, text: &str) -> Result<()> {
    sink.set_font(FontRole::Body)?;
    sink.place_wrapped_text(0.0, style::BULLET_LINE_HEIGHT, text, CursorAdvance::NextLine)?;
    sink.vertical_advance(style::SPACING_MEDIUM);
    Ok(())
}

fn bullet(sink: &mut dyn DocumentSink, text: &str) -> Result<()> {
    sink.set_font(FontRole::Body)?;
    sink.place_text(
        style::BULLET_INDENT,
        style::BULLET_LINE_HEIGHT,
        style::BULLET_MARKER,
        Align::Left,
        CursorAdvance::Right,
    )?;
    sink.place_wrapped_text(0.0, style::BULLET_LINE_HEIGHT, text, CursorAdvance::NextLine)
}

/// `<label>,` in subheader font, then location in body font, then the date
/// right-aligned in the remaining width.
///
/// Column widths are measured in the font the column is placed in.
fn entry_row(sink: &mut dyn DocumentSink, label: &str, location: &str, date: &str) -> Result<()> {
    let height = style::BULLET_LINE_HEIGHT;

    sink.set_font(FontRole::Subheader)?;
    let label_width = sink.measure_text_width(&format!("{}, ", label))?;
    sink.place_text(label_width, height, &format!("{},", label), Align::Left, CursorAdvance::Right)?;

    sink.set_font(FontRole::Body)?;
    let location_width = sink.measure_text_width(location)?;
    sink.place_text(location_width, height, location, Align::Left, CursorAdvance::Right)?;

    sink.place_text(0.0, height, date, Align::Right, CursorAdvance::NextLine)
}

fn experience(sink: &mut dyn DocumentSink, exp: &ExperienceEntry) -> Result<()> {
    entry_row(sink, &exp.company, &exp.location, &exp.dates)?;

    sink.set_font(FontRole::Position)?;
    sink.place_text(
        0.0,
        style::BULLET_LINE_HEIGHT,
        &exp.position,
        Align::Left,
        CursorAdvance::NextLine,
    )?;
    sink.vertical_advance(style::POSITION_GAP);

    for detail in &exp.details {
        bullet(sink, detail)?;
    }
    sink.vertical_advance(style::SPACING_MEDIUM);
    Ok(())
}

fn education(sink: &mut dyn DocumentSink, edu: &EducationEntry) -> Result<()> {
    entry_row(sink, &edu.institution, &edu.location, &edu.date)?;
    sink.place_wrapped_text(0.0, style::BULLET_LINE_HEIGHT, &edu.description, CursorAdvance::NextLine)?;
    sink.vertical_advance(style::SPACING_MEDIUM);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::layout::sink::PageHeader;
    use std::path::Path;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        StartPage,
        Font(FontRole),
        Text { width: f32, text: String, align: Align, advance: CursorAdvance },
        Wrapped { text: String },
        Rule,
        Advance(f32),
    }

    /// Records every call; fails any placement whose text contains `poison`.
    #[derive(Default)]
    struct RecordingSink {
        ops: Vec<Op>,
        header: Option<PageHeader>,
        pages: usize,
        y: f32,
        poison: Option<&'static str>,
    }

    impl RecordingSink {
        fn check(&self, text: &str) -> Result<()> {
            match self.poison {
                Some(p) if text.contains(p) => Err(Error::UnsupportedCharacter {
                    ch: '?',
                    font: "Helvetica".to_string(),
                }),
                _ => Ok(()),
            }
        }

        fn texts(&self) -> Vec<String> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text { text, .. } | Op::Wrapped { text } => Some(text.clone()),
                    _ => None,
                })
                .collect()
        }

        fn position_of(&self, text: &str) -> Option<usize> {
            self.texts().iter().position(|t| t == text)
        }
    }

    impl DocumentSink for RecordingSink {
        fn set_page_header(&mut self, header: PageHeader) {
            self.header = Some(header);
        }

        fn start_page(&mut self) -> Result<()> {
            self.pages += 1;
            self.y = 10.0;
            self.ops.push(Op::StartPage);
            if let Some(mut header) = self.header.take() {
                let outcome = header(&mut *self as &mut dyn DocumentSink);
                self.header = Some(header);
                outcome?;
            }
            Ok(())
        }

        fn set_font(&mut self, role: FontRole) -> Result<()> {
            self.ops.push(Op::Font(role));
            Ok(())
        }

        fn place_text(
            &mut self,
            width: f32,
            height: f32,
            text: &str,
            align: Align,
            advance: CursorAdvance,
        ) -> Result<()> {
            self.check(text)?;
            if advance == CursorAdvance::NextLine {
                self.y += height;
            }
            self.ops.push(Op::Text {
                width,
                text: text.to_string(),
                align,
                advance,
            });
            Ok(())
        }

        fn place_wrapped_text(
            &mut self,
            _width: f32,
            height: f32,
            text: &str,
            _advance: CursorAdvance,
        ) -> Result<()> {
            self.check(text)?;
            self.y += height;
            self.ops.push(Op::Wrapped {
                text: text.to_string(),
            });
            Ok(())
        }

        fn measure_text_width(&self, text: &str) -> Result<f32> {
            Ok(text.chars().count() as f32 * 2.0)
        }

        fn draw_horizontal_rule(&mut self, _y: f32, _thickness: f32) -> Result<()> {
            self.ops.push(Op::Rule);
            Ok(())
        }

        fn vertical_advance(&mut self, amount: f32) {
            self.y += amount;
            self.ops.push(Op::Advance(amount));
        }

        fn cursor_y(&self) -> f32 {
            self.y
        }

        fn page_count(&self) -> usize {
            self.pages
        }

        fn finalize(&mut self, _path: &Path) -> Result<()> {
            Ok(())
        }
    }

    fn sample_profile() -> Profile {
        let mut profile = Profile::default();
        profile.personal_info.name = "Jane Doe".to_string();
        profile.personal_info.contact_details = "555-1234 | jane@example.com".to_string();
        profile.summary = "Systems engineer.".to_string();

        let mut exp = ExperienceEntry::new("Acme");
        exp.location = "New York, NY".to_string();
        exp.dates = "2019 - Present".to_string();
        exp.position = "Engineer".to_string();
        exp.details = vec!["Built things".to_string(), "Fixed things".to_string()];
        profile.experiences.push(exp);

        let mut edu = EducationEntry::new("State U");
        edu.location = "Boston, MA".to_string();
        edu.date = "2012".to_string();
        edu.description = "B.S. Computer Science".to_string();
        profile.education.push(edu);

        profile.skills = "Rust, C".to_string();
        profile
    }

    #[test]
    fn test_section_order() {
        let mut sink = RecordingSink::default();
        let summary = LayoutEngine::new().render(&sample_profile(), &mut sink).unwrap();
        assert!(summary.is_complete());

        let order: Vec<usize> = [
            "Jane Doe",
            "SUMMARY",
            "PROFESSIONAL EXPERIENCE",
            "EDUCATION",
            "SKILLS & OTHER",
        ]
        .iter()
        .map(|t| sink.position_of(t).unwrap())
        .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
        assert!(sink.position_of("PROJECTS").is_none());
    }

    #[test]
    fn test_every_title_is_underlined() {
        let mut sink = RecordingSink::default();
        LayoutEngine::new().render(&sample_profile(), &mut sink).unwrap();

        for (i, op) in sink.ops.iter().enumerate() {
            if let Op::Text { text, .. } = op {
                if text.chars().all(|c| c.is_ascii_uppercase() || c == ' ' || c == '&') && text.len() > 3 {
                    assert_eq!(sink.ops[i + 1], Op::Rule, "title {} not underlined", text);
                    assert_eq!(sink.ops[i + 2], Op::Advance(style::RULE_GAP));
                }
            }
        }
        let rules = sink.ops.iter().filter(|op| **op == Op::Rule).count();
        assert_eq!(rules, 4);
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let mut profile = sample_profile();
        profile.summary.clear();
        profile.projects.clear();

        let mut sink = RecordingSink::default();
        LayoutEngine::new().render(&profile, &mut sink).unwrap();
        assert!(sink.position_of("SUMMARY").is_none());
        assert!(sink.position_of("PROJECTS").is_none());
        assert!(sink.position_of("PROFESSIONAL EXPERIENCE").is_some());
    }

    #[test]
    fn test_header_runs_on_start_page() {
        let mut sink = RecordingSink::default();
        LayoutEngine::new().render(&Profile::default(), &mut sink).unwrap();
        assert_eq!(sink.pages, 1);
        assert_eq!(sink.ops[0], Op::StartPage);
        assert_eq!(sink.ops[1], Op::Font(FontRole::Header));
        match &sink.ops[2] {
            Op::Text { align, advance, .. } => {
                assert_eq!(*align, Align::Center);
                assert_eq!(*advance, CursorAdvance::NextLine);
            },
            other => panic!("unexpected op {:?}", other),
        }

        // A second page re-runs the registered header.
        sink.start_page().unwrap();
        let headers = sink.ops.iter().filter(|op| **op == Op::Font(FontRole::Header)).count();
        assert_eq!(headers, 2);
    }

    #[test]
    fn test_entry_row_uses_measured_widths() {
        let mut sink = RecordingSink::default();
        LayoutEngine::new().render(&sample_profile(), &mut sink).unwrap();

        let company = sink
            .ops
            .iter()
            .find_map(|op| match op {
                Op::Text { width, text, .. } if text == "Acme," => Some(*width),
                _ => None,
            })
            .unwrap();
        assert_eq!(company, "Acme, ".len() as f32 * 2.0);

        let date = sink
            .ops
            .iter()
            .find_map(|op| match op {
                Op::Text { width, text, align, .. } if text == "2019 - Present" => Some((*width, *align)),
                _ => None,
            })
            .unwrap();
        assert_eq!(date, (0.0, Align::Right));
    }

    #[test]
    fn test_bullets_follow_position() {
        let mut sink = RecordingSink::default();
        LayoutEngine::new().render(&sample_profile(), &mut sink).unwrap();

        let position = sink.position_of("Engineer").unwrap();
        let texts = sink.texts();
        assert_eq!(texts[position + 1], style::BULLET_MARKER);
        assert_eq!(texts[position + 2], "Built things");
        assert_eq!(texts[position + 3], style::BULLET_MARKER);
        assert_eq!(texts[position + 4], "Fixed things");
    }

    #[test]
    fn test_best_effort_skips_failing_block() {
        let mut profile = sample_profile();
        profile.experiences[0].details.push("POISON".to_string());

        let mut sink = RecordingSink {
            poison: Some("POISON"),
            ..Default::default()
        };
        let summary = LayoutEngine::new().render(&profile, &mut sink).unwrap();
        assert_eq!(summary.failures, 1);
        assert!(sink.position_of("EDUCATION").is_some());
        assert!(sink.position_of("Rust, C").is_some());
    }

    #[test]
    fn test_strict_aborts() {
        let mut profile = sample_profile();
        profile.skills = "POISON".to_string();

        let mut sink = RecordingSink {
            poison: Some("POISON"),
            ..Default::default()
        };
        let engine = LayoutEngine::new().with_error_policy(ErrorPolicy::Strict);
        let result = engine.render(&profile, &mut sink);
        assert!(matches!(result, Err(Error::UnsupportedCharacter { .. })));
    }

    #[test]
    fn test_failing_header_is_one_failure() {
        let mut profile = sample_profile();
        profile.personal_info.name = "POISON".to_string();

        let mut sink = RecordingSink {
            poison: Some("POISON"),
            ..Default::default()
        };
        let summary = LayoutEngine::new().render(&profile, &mut sink).unwrap();
        assert_eq!(summary.failures, 1);
        assert!(sink.position_of("SUMMARY").is_some());
    }
}
