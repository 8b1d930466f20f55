//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the piiguard configuration file and its pattern library.

use super::EXIT_CONFIG_ERROR;
use crate::anonymization::AnonymizationStrategy;
use crate::config::load_config;
use crate::core::pipeline::Pipeline;
use crate::domain::PiiType;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let pipeline = match Pipeline::from_config(&config) {
            Ok(p) => {
                println!("✅ Detection patterns compiled");
                p
            }
            Err(e) => {
                println!("❌ Detection patterns failed to compile");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let strategy = AnonymizationStrategy::resolve(&config.anonymization.default_strategy);
        let enabled: Vec<&str> = PiiType::BUILTIN
            .iter()
            .filter(|t| config.is_type_enabled(t))
            .map(|t| t.as_str())
            .collect();

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Detectors: {}", pipeline.detector_names().join(", "));
        println!(
            "  Confidence Threshold: {}",
            config.detection.confidence_threshold
        );
        println!("  Enabled Types: {}", enabled.join(", "));
        if let Some(library) = &config.detection.pattern_library {
            println!("  Pattern Library: {}", library.display());
        }
        println!("  Strategy: {strategy}");
        println!("  Mask Character: {}", config.anonymization.mask_character);
        println!("  Preserve Length: {}", config.anonymization.preserve_length);
        println!("  Preserve Format: {}", config.anonymization.preserve_format);
        println!("  Region: {}", config.compliance.region);
        println!("  Max Text Length: {}", config.performance.max_text_length);
        println!("  Max Parallel: {}", config.performance.max_parallel);
        println!("  Log Level: {}", config.logging.level);
        println!();
        Ok(0)
    }
}
