//! CLI command implementations
//!
//! This module contains all CLI command implementations and the input and
//! configuration helpers they share.

pub mod anonymize;
pub mod batch;
pub mod init;
pub mod scan;
pub mod validate;

use crate::anonymization::AnonymizationStrategy;
use crate::config::{load_config_or_default, PiiGuardConfig};
use crate::core::pipeline::Pipeline;
use anyhow::Context;
use std::io::Read;
use std::str::FromStr;

/// Exit code for a configuration or argument error
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Load the configuration for a command, printing the failure if any
///
/// A missing file yields the defaults.
pub(crate) fn load_command_config(config_path: &str) -> Option<PiiGuardConfig> {
    match load_config_or_default(config_path) {
        Ok(config) => Some(config),
        Err(e) => {
            crate::log_error_with_context!(e, "Failed to load configuration");
            eprintln!("❌ Failed to load configuration: {config_path}");
            eprintln!("   Error: {e}");
            None
        }
    }
}

/// Build the detection pipeline for a command, printing the failure if any
pub(crate) fn build_pipeline(config: &PiiGuardConfig) -> Option<Pipeline> {
    match Pipeline::from_config(config) {
        Ok(pipeline) => Some(pipeline),
        Err(e) => {
            crate::log_error_with_context!(e, "Failed to build detection pipeline");
            eprintln!("❌ Failed to build detection pipeline");
            eprintln!("   Error: {e}");
            None
        }
    }
}

/// Parse a `--strategy` argument, printing the failure if any
pub(crate) fn parse_strategy_arg(name: Option<&str>) -> Result<Option<AnonymizationStrategy>, ()> {
    let Some(name) = name else {
        return Ok(None);
    };
    match AnonymizationStrategy::from_str(name) {
        Ok(strategy) => Ok(Some(strategy)),
        Err(e) => {
            eprintln!("❌ {e}");
            let names: Vec<&str> = AnonymizationStrategy::ALL.iter().map(|s| s.as_str()).collect();
            eprintln!("   Valid strategies: {}", names.join(", "));
            Err(())
        }
    }
}

/// Read the input text from a file, or from stdin when no path is given
///
/// Returns the source name alongside the text.
pub(crate) fn read_input(path: Option<&str>) -> anyhow::Result<(String, String)> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {path}"))?;
            Ok((path.to_string(), text))
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(("stdin".to_string(), text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_build_pipeline_reports_bad_library() {
        let dir = TempDir::new().unwrap();
        let library = dir.path().join("patterns.toml");
        std::fs::write(&library, "[[rules]]\npii_type = \"bad\"\npattern = \"(\"\n").unwrap();

        let mut config = PiiGuardConfig::default();
        assert!(build_pipeline(&config).is_some());

        config.detection.pattern_library = Some(library);
        assert!(build_pipeline(&config).is_none());
    }

    #[test]
    fn test_load_command_config_reports_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("piiguard.toml");
        std::fs::write(&path, "[detection]\nconfidence_threshold = 3.0\n").unwrap();

        assert!(load_command_config(&path.to_string_lossy()).is_none());
        assert!(load_command_config(&dir.path().join("absent.toml").to_string_lossy()).is_some());
    }

    #[test]
    fn test_parse_strategy_arg() {
        assert_eq!(parse_strategy_arg(None), Ok(None));
        assert_eq!(
            parse_strategy_arg(Some("hash")),
            Ok(Some(AnonymizationStrategy::Hash))
        );
        assert!(parse_strategy_arg(Some("scramble")).is_err());
    }
}
