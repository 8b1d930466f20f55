//! Anonymization strategy module
//!
//! A closed set of strategies, each turning one matched value into its
//! replacement text. [`AnonymizationPolicy`] carries the knobs the strategies
//! read.

pub mod hashing;
pub mod masking;
pub mod redaction;
pub mod synthetic;

use crate::config::{secret_string, AnonymizationConfig, SecretString};
use crate::domain::{PiiError, PiiMatch, PiiType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Anonymization strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnonymizationStrategy {
    /// Overwrite characters with the mask character
    #[default]
    Mask,
    /// Emit `[REDACTED]`
    Redact,
    /// Emit a salted, truncated SHA-256 digest
    Hash,
    /// Emit the per-type replacement tag
    Replace,
    /// Emit a fixed fake value of the same type
    Synthetic,
}

impl AnonymizationStrategy {
    /// All strategies
    pub const ALL: [AnonymizationStrategy; 5] = [
        Self::Mask,
        Self::Redact,
        Self::Hash,
        Self::Replace,
        Self::Synthetic,
    ];

    /// Strategy name as used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mask => "mask",
            Self::Redact => "redact",
            Self::Hash => "hash",
            Self::Replace => "replace",
            Self::Synthetic => "synthetic",
        }
    }

    /// Parse a strategy name, falling back to [`Mask`](Self::Mask) for unknown names
    pub fn resolve(name: &str) -> Self {
        name.parse().unwrap_or_else(|e: PiiError| {
            tracing::warn!(error = %e, "Falling back to mask strategy");
            Self::Mask
        })
    }
}

impl fmt::Display for AnonymizationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnonymizationStrategy {
    type Err = PiiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mask" => Ok(Self::Mask),
            "redact" => Ok(Self::Redact),
            "hash" => Ok(Self::Hash),
            "replace" => Ok(Self::Replace),
            "synthetic" => Ok(Self::Synthetic),
            _ => Err(PiiError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Settings consumed by the strategies
#[derive(Debug, Clone)]
pub struct AnonymizationPolicy {
    /// Strategy used when a call does not override it
    pub strategy: AnonymizationStrategy,
    /// Character used by the mask strategy
    pub mask_character: char,
    /// Mask character by character
    pub preserve_length: bool,
    /// Keep identifier shapes when masking
    pub preserve_format: bool,
    /// Replacement tag per type
    pub replacement_patterns: HashMap<PiiType, String>,
    /// Salt mixed into hashed values
    pub hash_salt: SecretString,
}

impl AnonymizationPolicy {
    /// Build a policy from configuration
    ///
    /// Replacement tags from the configuration are layered over the built-in
    /// tags, so a partial table only changes the types it names.
    pub fn from_config(config: &AnonymizationConfig) -> Self {
        let mut replacement_patterns = default_replacements();
        for (tag, replacement) in &config.replacement_patterns {
            replacement_patterns.insert(PiiType::from_tag(tag), replacement.clone());
        }

        Self {
            strategy: AnonymizationStrategy::resolve(&config.default_strategy),
            mask_character: config.mask_character,
            preserve_length: config.preserve_length,
            preserve_format: config.preserve_format,
            replacement_patterns,
            hash_salt: config.hash_salt.clone(),
        }
    }

    /// Same policy with a different default strategy
    pub fn with_strategy(mut self, strategy: AnonymizationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replacement text for a match under `strategy`
    pub fn render(&self, pii_match: &PiiMatch, strategy: AnonymizationStrategy) -> String {
        let pii_type = pii_match.pii_type();
        let value = pii_match.value();

        match strategy {
            AnonymizationStrategy::Mask => masking::mask_value(pii_type, value, self),
            AnonymizationStrategy::Redact => redaction::REDACTED.to_string(),
            AnonymizationStrategy::Hash => hashing::hash_value(value, &self.hash_salt),
            AnonymizationStrategy::Replace => redaction::replacement_tag(pii_type, value, self),
            AnonymizationStrategy::Synthetic => synthetic::synthetic_value(pii_type, value)
                .unwrap_or_else(|| redaction::replacement_tag(pii_type, value, self)),
        }
    }
}

impl Default for AnonymizationPolicy {
    fn default() -> Self {
        Self {
            strategy: AnonymizationStrategy::Mask,
            mask_character: '*',
            preserve_length: true,
            preserve_format: false,
            replacement_patterns: default_replacements(),
            hash_salt: secret_string("piiguard".to_string()),
        }
    }
}

fn default_replacements() -> HashMap<PiiType, String> {
    PiiType::BUILTIN
        .iter()
        .map(|pii_type| (pii_type.clone(), format!("[{}]", pii_type.label())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_from_str() {
        assert_eq!(
            "Redact".parse::<AnonymizationStrategy>().unwrap(),
            AnonymizationStrategy::Redact
        );
        assert!(matches!(
            "scramble".parse::<AnonymizationStrategy>(),
            Err(PiiError::UnknownStrategy(ref s)) if s == "scramble"
        ));
    }

    #[test]
    fn test_strategy_round_trips_through_name() {
        for strategy in AnonymizationStrategy::ALL {
            assert_eq!(strategy.as_str().parse::<AnonymizationStrategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_resolve_unknown_falls_back_to_mask() {
        assert_eq!(
            AnonymizationStrategy::resolve("scramble"),
            AnonymizationStrategy::Mask
        );
        assert_eq!(
            AnonymizationStrategy::resolve("hash"),
            AnonymizationStrategy::Hash
        );
    }

    #[test]
    fn test_policy_from_config_layers_replacements() {
        let mut config = AnonymizationConfig::default();
        config.default_strategy = "synthetic".to_string();
        config.replacement_patterns.clear();
        config
            .replacement_patterns
            .insert("email".to_string(), "<mail>".to_string());
        config
            .replacement_patterns
            .insert("badge".to_string(), "[BADGE]".to_string());

        let policy = AnonymizationPolicy::from_config(&config);
        assert_eq!(policy.strategy, AnonymizationStrategy::Synthetic);
        assert_eq!(policy.replacement_patterns[&PiiType::Email], "<mail>");
        assert_eq!(policy.replacement_patterns[&PiiType::Phone], "[PHONE]");
        assert_eq!(
            policy.replacement_patterns[&PiiType::from_tag("badge")],
            "[BADGE]"
        );
    }

    #[test]
    fn test_render_dispatch() {
        let policy = AnonymizationPolicy::default();
        let ssn = PiiMatch::new(PiiType::Ssn, "123-45-6789", 0, 11, 0.95, "pattern");

        assert_eq!(policy.render(&ssn, AnonymizationStrategy::Redact), "[REDACTED]");
        assert_eq!(policy.render(&ssn, AnonymizationStrategy::Replace), "[SSN]");
        assert_eq!(
            policy.render(&ssn, AnonymizationStrategy::Synthetic),
            "111-11-1111"
        );
        assert_eq!(policy.render(&ssn, AnonymizationStrategy::Mask), "***-**-****");
        assert!(policy
            .render(&ssn, AnonymizationStrategy::Hash)
            .starts_with("[HASH:"));
    }

    #[test]
    fn test_synthetic_falls_back_to_replace() {
        let policy = AnonymizationPolicy::default();
        let ip = PiiMatch::new(PiiType::IpAddress, "10.0.0.1", 0, 8, 0.8, "pattern");
        assert_eq!(
            policy.render(&ip, AnonymizationStrategy::Synthetic),
            "[IP_ADDRESS]"
        );
    }
}
