//! Configuration schema types
//!
//! This module defines the configuration structure for piiguard. Every section
//! has defaults, so an empty file (or no file at all) is a valid configuration.

use crate::anonymization::AnonymizationStrategy;
use crate::config::{secret_string, SecretString};
use crate::domain::PiiType;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

/// Main piiguard configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PiiGuardConfig {
    /// Detection settings
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Per-type switches and confidence overrides, keyed by type tag
    #[serde(default = "default_pii_types")]
    pub pii_types: BTreeMap<String, PiiTypeConfig>,

    /// Anonymization settings
    #[serde(default)]
    pub anonymization: AnonymizationConfig,

    /// Regional compliance flags
    #[serde(default)]
    pub compliance: ComplianceConfig,

    /// Resource limits
    #[serde(default)]
    pub performance: PerformanceConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PiiGuardConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.detection.validate()?;
        for (tag, type_config) in &self.pii_types {
            type_config.validate(tag)?;
        }
        self.anonymization.validate()?;
        self.performance.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Whether detection of `pii_type` is switched on
    ///
    /// Types without an entry fall back to their built-in default.
    pub fn is_type_enabled(&self, pii_type: &PiiType) -> bool {
        self.pii_types
            .get(pii_type.as_str())
            .map_or_else(|| enabled_by_default(pii_type), |c| c.enabled)
    }

    /// Look up a value by dotted key, e.g. `anonymization.mask_character`
    ///
    /// Secrets are not reachable this way: `anonymization.hash_salt` always
    /// yields `None`.
    pub fn get(&self, key: &str) -> Option<toml::Value> {
        let mut root = toml::Value::try_from(self).ok()?;
        if let Some(anonymization) = root
            .get_mut("anonymization")
            .and_then(toml::Value::as_table_mut)
        {
            anonymization.remove("hash_salt");
        }
        key.split('.')
            .try_fold(&root, |value, part| value.get(part))
            .cloned()
    }

    /// Look up a value by dotted key, falling back to `default` when the key
    /// is missing or holds a different type
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key)
            .and_then(|value| value.try_into().ok())
            .unwrap_or(default)
    }
}

impl Default for PiiGuardConfig {
    fn default() -> Self {
        Self {
            detection: DetectionConfig::default(),
            pii_types: default_pii_types(),
            anonymization: AnonymizationConfig::default(),
            compliance: ComplianceConfig::default(),
            performance: PerformanceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Minimum confidence a match needs to be reported
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,

    /// Characters of surrounding text captured on each side of a match
    #[serde(default = "default_context_window")]
    pub context_window: usize,

    /// Detectors to run (pattern, context)
    #[serde(default = "default_enabled_detectors")]
    pub enabled_detectors: Vec<String>,

    /// Optional TOML pattern library layered on top of the built-in rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_library: Option<PathBuf>,
}

impl DetectionConfig {
    fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(format!(
                "detection.confidence_threshold must be between 0.0 and 1.0, got {}",
                self.confidence_threshold
            ));
        }

        let valid_detectors = ["pattern", "context"];
        for name in &self.enabled_detectors {
            if !valid_detectors.contains(&name.as_str()) {
                return Err(format!(
                    "Invalid detection.enabled_detectors entry '{}'. Must be one of: {}",
                    name,
                    valid_detectors.join(", ")
                ));
            }
        }
        Ok(())
    }

    /// Whether the named detector should run
    pub fn detector_enabled(&self, name: &str) -> bool {
        self.enabled_detectors.iter().any(|d| d == name)
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            context_window: default_context_window(),
            enabled_detectors: default_enabled_detectors(),
            pattern_library: None,
        }
    }
}

/// Per-type detection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiiTypeConfig {
    /// Detect this type
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Replaces the rule's base confidence when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl PiiTypeConfig {
    fn validate(&self, tag: &str) -> Result<(), String> {
        match self.confidence {
            Some(c) if !(0.0..=1.0).contains(&c) => Err(format!(
                "pii_types.{tag}.confidence must be between 0.0 and 1.0, got {c}"
            )),
            _ => Ok(()),
        }
    }
}

/// Anonymization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizationConfig {
    /// Strategy name (mask, redact, hash, replace, synthetic)
    ///
    /// Kept as a string: an unknown name falls back to `mask` at use.
    #[serde(default = "default_strategy")]
    pub default_strategy: String,

    /// Character used by the mask strategy
    #[serde(default = "default_mask_character")]
    pub mask_character: char,

    /// Mask character by character instead of a fixed-width mask
    #[serde(default = "default_true")]
    pub preserve_length: bool,

    /// Keep the shape of SSNs, phone numbers and card numbers when masking
    #[serde(default)]
    pub preserve_format: bool,

    /// Replacement tag per type tag
    #[serde(default = "default_replacement_patterns")]
    pub replacement_patterns: BTreeMap<String, String>,

    /// Salt mixed into hashed values
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default = "default_hash_salt")]
    pub hash_salt: SecretString,
}

impl AnonymizationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.mask_character.is_whitespace() || self.mask_character.is_control() {
            return Err(format!(
                "anonymization.mask_character must be a visible character, got {:?}",
                self.mask_character
            ));
        }

        // Unknown strategies degrade to mask at use; flag them early
        if AnonymizationStrategy::from_str(&self.default_strategy).is_err() {
            tracing::warn!(
                strategy = %self.default_strategy,
                "Unknown anonymization.default_strategy, mask will be used"
            );
        }
        Ok(())
    }
}

impl Default for AnonymizationConfig {
    fn default() -> Self {
        Self {
            default_strategy: default_strategy(),
            mask_character: default_mask_character(),
            preserve_length: true,
            preserve_format: false,
            replacement_patterns: default_replacement_patterns(),
            hash_salt: default_hash_salt(),
        }
    }
}

/// Regional compliance flags
///
/// Recorded and reported only; no rule enforces them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceConfig {
    /// Region code (US, EU, CA, ...)
    #[serde(default = "default_region")]
    pub region: String,

    /// GDPR mode
    #[serde(default)]
    pub gdpr_mode: bool,

    /// CCPA mode
    #[serde(default)]
    pub ccpa_mode: bool,

    /// Conservative detection requested
    #[serde(default)]
    pub strict_mode: bool,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            gdpr_mode: false,
            ccpa_mode: false,
            strict_mode: false,
        }
    }
}

/// Resource limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Largest accepted input, in bytes
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,

    /// Texts processed concurrently in batch mode
    #[serde(default = "default_max_parallel")]
    pub max_parallel: usize,
}

impl PerformanceConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("performance.max_text_length must be greater than 0".to_string());
        }
        if self.max_parallel == 0 || self.max_parallel > 256 {
            return Err(format!(
                "performance.max_parallel must be between 1 and 256, got {}",
                self.max_parallel
            ));
        }
        Ok(())
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            max_text_length: default_max_text_length(),
            max_parallel: default_max_parallel(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid logging.level '{}'. Must be one of: {}",
                self.level,
                valid_levels.join(", ")
            ));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled is true".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn enabled_by_default(pii_type: &PiiType) -> bool {
    !matches!(pii_type, PiiType::Passport | PiiType::DriverLicense)
}

fn default_pii_types() -> BTreeMap<String, PiiTypeConfig> {
    PiiType::BUILTIN
        .iter()
        .map(|pii_type| {
            (
                pii_type.as_str().to_string(),
                PiiTypeConfig {
                    enabled: enabled_by_default(pii_type),
                    confidence: None,
                },
            )
        })
        .collect()
}

fn default_replacement_patterns() -> BTreeMap<String, String> {
    PiiType::BUILTIN
        .iter()
        .map(|pii_type| (pii_type.as_str().to_string(), format!("[{}]", pii_type.label())))
        .collect()
}

fn default_true() -> bool {
    true
}

fn default_confidence_threshold() -> f32 {
    0.4
}

fn default_context_window() -> usize {
    50
}

fn default_enabled_detectors() -> Vec<String> {
    vec!["pattern".to_string(), "context".to_string()]
}

fn default_strategy() -> String {
    "mask".to_string()
}

fn default_mask_character() -> char {
    '*'
}

fn default_hash_salt() -> SecretString {
    secret_string("piiguard".to_string())
}

fn default_region() -> String {
    "US".to_string()
}

fn default_max_text_length() -> usize {
    1_000_000
}

fn default_max_parallel() -> usize {
    4
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_local_path() -> String {
    "/var/log/piiguard".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
