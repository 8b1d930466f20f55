//! Scan command implementation
//!
//! Detects PII in a file or stdin and prints a report without changing the
//! input.

use super::{build_pipeline, load_command_config, read_input, EXIT_CONFIG_ERROR};
use crate::config::{PiiGuardConfig, PiiTypeConfig};
use crate::core::report::ScanReport;
use crate::domain::PiiType;
use clap::{Args, ValueEnum};

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable report
    Console,
    /// Pretty-printed JSON
    Json,
    /// One row per match
    Csv,
}

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Input file (reads stdin when omitted)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "console")]
    pub format: ReportFormat,

    /// Only detect these types (comma-separated tags, e.g. email,phone)
    #[arg(short, long, value_delimiter = ',')]
    pub types: Vec<String>,
}

impl ScanArgs {
    /// Execute the scan command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let Some(mut config) = load_command_config(config_path) else {
            return Ok(EXIT_CONFIG_ERROR);
        };
        if !self.types.is_empty() {
            restrict_types(&mut config, &self.types);
        }

        let Some(pipeline) = build_pipeline(&config) else {
            return Ok(EXIT_CONFIG_ERROR);
        };

        let (source, text) = read_input(self.input.as_deref())?;
        tracing::info!(source = %source, bytes = text.len(), "Scanning input");

        let matches = pipeline.scan(&text)?;
        let report = ScanReport::new(source, &text, matches);

        match self.format {
            ReportFormat::Console => print!("{}", report.format_console()),
            ReportFormat::Json => println!("{}", report.format_json()?),
            ReportFormat::Csv => print!("{}", report.format_csv()),
        }

        crate::log_processing_complete!(report.source, report.stats.total_matches, 0);
        Ok(0)
    }
}

/// Enable exactly the listed types
fn restrict_types(config: &mut PiiGuardConfig, tags: &[String]) {
    let wanted: Vec<PiiType> = tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(PiiType::from_tag)
        .collect();

    let known: Vec<PiiType> = PiiType::BUILTIN
        .iter()
        .cloned()
        .chain(config.pii_types.keys().map(|k| PiiType::from_tag(k)))
        .chain(wanted.iter().cloned())
        .collect();

    for pii_type in known {
        let entry = config
            .pii_types
            .entry(pii_type.as_str().to_string())
            .or_insert(PiiTypeConfig {
                enabled: false,
                confidence: None,
            });
        entry.enabled = wanted.contains(&pii_type);
    }
}
