//! Render a résumé PDF from a section-tagged CSV.
//!
//! Usage:
//!   cargo run --release --bin resume_oxide
//!   cargo run --release --bin resume_oxide -- -i me.csv -o me.pdf --compress
//!   cargo run --release --bin resume_oxide -- --dump

use clap::Parser;
use resume_oxide::api::{Generation, ResumeBuilder};
use resume_oxide::config::{DEFAULT_INPUT, DEFAULT_OUTPUT};
use resume_oxide::{parse_file, ErrorPolicy, KeyVocabulary, ResumeConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "resume_oxide", version, about = "Turn a section-tagged CSV into a PDF résumé")]
struct Cli {
    /// Section-tagged CSV to read
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Where to write the PDF
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Education key set (prefixed or unprefixed)
    #[arg(long, default_value = "prefixed")]
    vocabulary: KeyVocabulary,

    /// Abort on the first block that cannot be rendered
    #[arg(long)]
    strict: bool,

    /// Flate-compress page content
    #[arg(long)]
    compress: bool,

    /// Leave /CreationDate out of the document info
    #[arg(long)]
    no_timestamp: bool,

    /// Print the parsed profile as JSON and exit without writing a PDF
    #[arg(long)]
    dump: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> ResumeConfig {
        let policy = if self.strict {
            ErrorPolicy::Strict
        } else {
            ErrorPolicy::BestEffort
        };
        ResumeConfig::new()
            .with_input(&self.input)
            .with_output(&self.output)
            .with_vocabulary(self.vocabulary)
            .with_error_policy(policy)
            .with_compress(self.compress)
            .with_timestamp(!self.no_timestamp)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let config = cli.config();

    if cli.dump {
        let profile = parse_file(&config.input, config.vocabulary);
        return match serde_json::to_string_pretty(&profile) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            },
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            },
        };
    }

    match ResumeBuilder::new().config(config).generate() {
        Ok(Generation::Written { path, summary, .. }) => {
            if !summary.is_complete() {
                eprintln!("Warning: {} block(s) were skipped", summary.failures);
            }
            println!("PDF generated successfully: {}", path.display());
            ExitCode::SUCCESS
        },
        Ok(Generation::NoData) => {
            println!("No data to generate the PDF.");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}
