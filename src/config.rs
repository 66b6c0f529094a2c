//! Run configuration.

use crate::layout::ErrorPolicy;
use crate::record::KeyVocabulary;
use std::path::PathBuf;

/// Default input file name.
pub const DEFAULT_INPUT: &str = "resume_data.csv";

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "professional_resume.pdf";

/// Options for one résumé generation run.
#[derive(Debug, Clone)]
pub struct ResumeConfig {
    /// Section-tagged CSV to read.
    pub input: PathBuf,

    /// Where the PDF is written.
    pub output: PathBuf,

    /// Key vocabulary used to classify rows.
    pub vocabulary: KeyVocabulary,

    /// What to do when a block fails to render.
    pub error_policy: ErrorPolicy,

    /// Flate-compress page content streams.
    pub compress: bool,

    /// Write `/CreationDate` into the document info.
    pub timestamp: bool,
}

impl Default for ResumeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            vocabulary: KeyVocabulary::default(),
            error_policy: ErrorPolicy::default(),
            compress: false,
            timestamp: true,
        }
    }

    /// Set the input path.
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    /// Set the output path.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Select the key vocabulary.
    pub fn with_vocabulary(mut self, vocabulary: KeyVocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Select the render error policy.
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Enable content stream compression.
    pub fn with_compress(mut self, enable: bool) -> Self {
        self.compress = enable;
        self
    }

    /// Enable the creation timestamp.
    pub fn with_timestamp(mut self, enable: bool) -> Self {
        self.timestamp = enable;
        self
    }
}
