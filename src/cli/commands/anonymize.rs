//! Anonymize command implementation
//!
//! Rewrites PII in a file or stdin and writes the result to a file or
//! stdout. Status lines go to stderr so piped output stays clean.

use super::{
    build_pipeline, load_command_config, parse_strategy_arg, read_input, EXIT_CONFIG_ERROR,
};
use crate::anonymization::ResidualScanner;
use anyhow::Context;
use clap::Args;

/// Exit code when `--verify` finds residual PII
pub const EXIT_RESIDUAL_PII: i32 = 1;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Input file (reads stdin when omitted)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output file (writes stdout when omitted)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Strategy (mask, redact, hash, replace, synthetic); overrides the configuration
    #[arg(short, long)]
    pub strategy: Option<String>,

    /// Scan the output for residual PII and fail if any is found
    #[arg(long)]
    pub verify: bool,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let Some(config) = load_command_config(config_path) else {
            return Ok(EXIT_CONFIG_ERROR);
        };
        let Ok(strategy) = parse_strategy_arg(self.strategy.as_deref()) else {
            return Ok(EXIT_CONFIG_ERROR);
        };

        let Some(pipeline) = build_pipeline(&config) else {
            return Ok(EXIT_CONFIG_ERROR);
        };

        let (source, text) = read_input(self.input.as_deref())?;
        tracing::info!(source = %source, bytes = text.len(), "Anonymizing input");

        let result = pipeline.process(&text, true, strategy)?;
        let anonymized = result.anonymized.unwrap_or_default();

        match &self.output {
            Some(path) => {
                std::fs::write(path, &anonymized)
                    .with_context(|| format!("Failed to write output file: {path}"))?;
                eprintln!("✅ Anonymized output written to {path}");
            }
            None => print!("{anonymized}"),
        }

        eprintln!(
            "   {} match(es) replaced, {} dropped",
            result.matches.len() - result.dropped,
            result.dropped
        );
        crate::log_processing_complete!(source, result.matches.len(), result.dropped);

        if self.verify {
            let findings = ResidualScanner::new()?.scan(&anonymized);
            if !findings.is_empty() {
                eprintln!("⚠️  Residual PII found in output: {} finding(s)", findings.len());
                for finding in &findings {
                    eprintln!(
                        "   [{}..{}] {:?} \"{}\"",
                        finding.start, finding.end, finding.kind, finding.value
                    );
                }
                return Ok(EXIT_RESIDUAL_PII);
            }
            eprintln!("✅ No residual PII found");
        }

        Ok(0)
    }
}
