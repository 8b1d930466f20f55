//! Configuration management for piiguard.
//!
//! TOML-based configuration loading, parsing and validation.
//!
//! # Overview
//!
//! piiguard configuration files support:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting
//! - `PIIGUARD_*` environment overrides
//! - Dotted-key lookup via [`PiiGuardConfig::get`]
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use piiguard::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("piiguard.toml")?;
//!
//! println!("Threshold: {}", config.detection.confidence_threshold);
//! println!("Strategy: {}", config.anonymization.default_strategy);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [detection]
//! confidence_threshold = 0.5
//! enabled_detectors = ["pattern", "context"]
//!
//! [pii_types.passport]
//! enabled = true
//!
//! [anonymization]
//! default_strategy = "hash"
//! hash_salt = "${PIIGUARD_HASH_SALT}"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_or_default, parse_config};
pub use schema::{
    AnonymizationConfig, ComplianceConfig, DetectionConfig, LoggingConfig, PerformanceConfig,
    PiiGuardConfig, PiiTypeConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
