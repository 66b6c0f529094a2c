//! High-level résumé builder and document type.
//!
//! Provides `Resume` for the finished document and `ResumeBuilder` for
//! rendering a [`Profile`] with a given [`ResumeConfig`].

use crate::config::ResumeConfig;
use crate::error::Result;
use crate::layout::{DocumentSink, LayoutEngine, RenderSummary};
use crate::profile::Profile;
use crate::record::parse_file;
use crate::writer::{PdfCanvas, PdfWriterConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// Document title for a profile: `"<name> - Résumé"`.
pub fn document_title(profile: &Profile) -> String {
    let name = profile.personal_info.name.trim();
    if name.is_empty() {
        "Résumé".to_string()
    } else {
        format!("{} - Résumé", name)
    }
}

/// A rendered résumé.
#[derive(Debug, Clone)]
pub struct Resume {
    bytes: Vec<u8>,
    summary: RenderSummary,
    page_count: usize,
}

impl Resume {
    /// Render a profile with default settings.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use resume_oxide::api::Resume;
    ///
    /// let resume = Resume::from_profile(&profile)?;
    /// resume.save("resume.pdf")?;
    /// ```
    pub fn from_profile(profile: &Profile) -> Result<Self> {
        ResumeBuilder::new().build(profile)
    }

    /// Get the PDF bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Convert to PDF bytes, consuming the Resume.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Blocks placed and abandoned during layout.
    pub fn summary(&self) -> &RenderSummary {
        &self.summary
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Save the PDF to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), &self.bytes)?;
        log::info!("Wrote {} page(s) to {}", self.page_count, path.as_ref().display());
        Ok(())
    }
}

/// Result of a full input-to-file run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// The PDF was written.
    Written {
        /// Output path
        path: PathBuf,
        /// Layout outcome
        summary: RenderSummary,
        /// Pages in the document
        page_count: usize,
    },
    /// The input held nothing to render; no file was written.
    NoData,
}

/// Builder for rendering résumés with custom configuration.
///
/// # Example
///
/// ```ignore
/// use resume_oxide::api::ResumeBuilder;
/// use resume_oxide::ResumeConfig;
///
/// let outcome = ResumeBuilder::new()
///     .config(ResumeConfig::new().with_input("me.csv").with_compress(true))
///     .generate()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResumeBuilder {
    config: ResumeConfig,
}

impl ResumeBuilder {
    /// Create a builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the configuration.
    pub fn config(mut self, config: ResumeConfig) -> Self {
        self.config = config;
        self
    }

    /// The configuration in use.
    pub fn get_config(&self) -> &ResumeConfig {
        &self.config
    }

    fn writer_config(&self, profile: &Profile) -> PdfWriterConfig {
        let config = PdfWriterConfig::default()
            .with_title(document_title(profile))
            .with_compress(self.config.compress);
        if self.config.timestamp {
            config.with_creation_date_now()
        } else {
            config
        }
    }

    fn render(&self, profile: &Profile) -> Result<(PdfCanvas, RenderSummary)> {
        let mut canvas = PdfCanvas::new(self.writer_config(profile));
        let engine = LayoutEngine::new().with_error_policy(self.config.error_policy);
        let summary = engine.render(profile, &mut canvas)?;
        if !summary.is_complete() {
            log::warn!("{} block(s) could not be rendered", summary.failures);
        }
        Ok((canvas, summary))
    }

    /// Lay out `profile` and assemble the PDF in memory.
    pub fn build(&self, profile: &Profile) -> Result<Resume> {
        let (canvas, summary) = self.render(profile)?;
        let bytes = canvas.finish()?;
        Ok(Resume {
            bytes,
            summary,
            page_count: canvas.page_count(),
        })
    }

    /// Read the configured input, render it, and write the configured output.
    ///
    /// An unreadable or empty input yields [`Generation::NoData`] and leaves
    /// the output untouched.
    pub fn generate(&self) -> Result<Generation> {
        let profile = parse_file(&self.config.input, self.config.vocabulary);
        if profile.is_empty() {
            log::warn!("No data parsed from {}", self.config.input.display());
            return Ok(Generation::NoData);
        }

        let (mut canvas, summary) = self.render(&profile)?;
        canvas.finalize(&self.config.output)?;
        Ok(Generation::Written {
            path: self.config.output.clone(),
            summary,
            page_count: canvas.page_count(),
        })
    }
}
