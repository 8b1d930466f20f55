//! Batch command implementation
//!
//! Anonymizes many files in parallel and writes `<file>.anon` next to each
//! input.

use super::{build_pipeline, load_command_config, parse_strategy_arg, EXIT_CONFIG_ERROR};
use crate::core::batch::{process_batch, BatchOptions, BatchSummary};
use crate::domain::PiiError;
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;

/// Exit code when one or more files failed
pub const EXIT_PARTIAL_FAILURE: i32 = 5;

/// Arguments for the batch command
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Files to anonymize
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Strategy (mask, redact, hash, replace, synthetic); overrides the configuration
    #[arg(short, long)]
    pub strategy: Option<String>,

    /// Maximum files processed at once; overrides performance.max_parallel
    #[arg(short = 'j', long)]
    pub parallel: Option<usize>,
}

impl BatchArgs {
    /// Execute the batch command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let Some(config) = load_command_config(config_path) else {
            return Ok(EXIT_CONFIG_ERROR);
        };
        let Ok(strategy) = parse_strategy_arg(self.strategy.as_deref()) else {
            return Ok(EXIT_CONFIG_ERROR);
        };

        let Some(pipeline) = build_pipeline(&config) else {
            return Ok(EXIT_CONFIG_ERROR);
        };
        let pipeline = Arc::new(pipeline);

        let mut options = BatchOptions::from_config(&config);
        options.strategy = strategy;
        if let Some(parallel) = self.parallel {
            options.max_parallel = parallel;
        }

        println!("📦 Anonymizing {} file(s)", self.files.len());
        println!();

        // Unreadable files are reported in place; the rest still run.
        let mut texts = Vec::with_capacity(self.files.len());
        let mut read_errors = Vec::with_capacity(self.files.len());
        for path in &self.files {
            match tokio::fs::read_to_string(path).await {
                Ok(text) => {
                    texts.push(text);
                    read_errors.push(None);
                }
                Err(e) => {
                    texts.push(String::new());
                    read_errors.push(Some(PiiError::from(e)));
                }
            }
        }

        let mut results = process_batch(pipeline, texts, options, Some(shutdown_signal)).await;
        for (result, read_error) in results.iter_mut().zip(read_errors) {
            if let Some(e) = read_error {
                *result = Err(e);
            }
        }

        for (path, result) in self.files.iter().zip(results.iter_mut()) {
            let written = match result {
                Ok(processed) => {
                    let output = anon_path(path);
                    let text = processed.anonymized.as_deref().unwrap_or_default();
                    match tokio::fs::write(&output, text).await {
                        Ok(()) => {
                            println!(
                                "✅ {} -> {} ({} match(es))",
                                path.display(),
                                output.display(),
                                processed.matches.len()
                            );
                            Ok(())
                        }
                        Err(e) => Err(PiiError::Io(format!(
                            "failed to write {}: {e}",
                            output.display()
                        ))),
                    }
                }
                Err(_) => Ok(()),
            };

            // A failed write counts against this file only
            if let Err(e) = written {
                *result = Err(e);
            }
            if let Err(e) = result {
                crate::log_error_with_context!(e, path.display().to_string());
                println!("❌ {}: {e}", path.display());
            }
        }

        let summary = BatchSummary::from_results(&results);
        println!();
        println!("Batch Summary:");
        println!("  Successful: {}", summary.successful);
        println!("  Failed: {}", summary.failed);
        println!("  Total Matches: {}", summary.total_matches);
        println!();

        if summary.failed > 0 {
            return Ok(EXIT_PARTIAL_FAILURE);
        }
        Ok(0)
    }
}

/// Output path for an anonymized file: the input path with `.anon` appended
pub fn anon_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".anon");
    PathBuf::from(name)
}
