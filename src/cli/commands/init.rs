//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::EXIT_CONFIG_ERROR;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "piiguard.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing piiguard configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG_ERROR);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set PIIGUARD_HASH_SALT in your environment or .env file");
                println!("  3. Validate configuration: piiguard validate-config");
                println!("  4. Try it: echo 'mail jo@example.org' | piiguard anonymize");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate the sample configuration
    fn generate_config() -> String {
        r#"# piiguard Configuration File
#
# Every setting has a default; remove anything you do not need to change.

# ============================================================================
# Detection
# ============================================================================
[detection]
# Minimum confidence a match needs to be reported (0.0 - 1.0)
confidence_threshold = 0.4

# Characters of surrounding text kept with each match
context_window = 50

# Detectors to run: pattern, context
enabled_detectors = ["pattern", "context"]

# Optional TOML file with extra [[rules]] entries
# pattern_library = "patterns.toml"

# ============================================================================
# PII Types
# ============================================================================
# Switch types on or off and override their base confidence.
# passport and driver_license are off unless enabled here.
[pii_types.email]
enabled = true

[pii_types.phone]
enabled = true

[pii_types.ssn]
enabled = true

[pii_types.credit_card]
enabled = true

[pii_types.ip_address]
enabled = true

[pii_types.name]
enabled = true
confidence = 0.6

[pii_types.address]
enabled = true

[pii_types.date]
enabled = true

[pii_types.passport]
enabled = false

[pii_types.driver_license]
enabled = false

# ============================================================================
# Anonymization
# ============================================================================
[anonymization]
# mask | redact | hash | replace | synthetic
default_strategy = "mask"
mask_character = "*"
preserve_length = true
preserve_format = false

# Salt for the hash strategy (use an environment variable)
hash_salt = "${PIIGUARD_HASH_SALT}"

[anonymization.replacement_patterns]
email = "[EMAIL]"
phone = "[PHONE]"
ssn = "[SSN]"
credit_card = "[CREDIT_CARD]"
name = "[NAME]"
address = "[ADDRESS]"

# ============================================================================
# Compliance
# ============================================================================
[compliance]
region = "US"
gdpr_mode = false
ccpa_mode = false
strict_mode = false

# ============================================================================
# Performance
# ============================================================================
[performance]
# Inputs larger than this many bytes are rejected
max_text_length = 1000000

# Texts processed at once by the batch command
max_parallel = 4

# ============================================================================
# Logging
# ============================================================================
[logging]
# trace | debug | info | warn | error
level = "info"
local_enabled = false
local_path = "/var/log/piiguard"
# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "piiguard.toml".to_string(),
            force: false,
        };

        assert_eq!(args.output, "piiguard.toml");
        assert!(!args.force);
    }

    #[test]
    fn test_generated_config_parses() {
        std::env::set_var("PIIGUARD_HASH_SALT", "init-test-salt");
        let config = crate::config::parse_config(&InitArgs::generate_config()).unwrap();

        assert_eq!(config.detection.confidence_threshold, 0.4);
        assert_eq!(config.anonymization.default_strategy, "mask");
        assert!(!config.is_type_enabled(&crate::domain::PiiType::Passport));
    }

    #[tokio::test]
    async fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("piiguard.toml");
        fs::write(&path, "# existing").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), EXIT_CONFIG_ERROR);
        assert_eq!(fs::read_to_string(&path).unwrap(), "# existing");

        let forced = InitArgs {
            output: path.to_string_lossy().to_string(),
            force: true,
        };
        assert_eq!(forced.execute().await.unwrap(), 0);
        assert!(fs::read_to_string(&path).unwrap().contains("[detection]"));
    }
}
