//! Pattern library for PII detection
//!
//! A [`PatternRegistry`] owns the ordered list of detection rules. Rules are
//! compiled when they are registered, so a bad pattern fails immediately
//! rather than silently matching nothing later.

use crate::domain::{PiiError, PiiType, Result};
use serde::Deserialize;
use std::ops::Range;
use std::path::Path;

/// Built-in rules: (type, pattern, base confidence, validate)
const BUILTIN_RULES: &[(PiiType, &str, f32, bool)] = &[
    (
        PiiType::Email,
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
        0.9,
        true,
    ),
    (
        PiiType::Phone,
        r"(?:\+?\b1[-.\s]?)?(?:\(\d{3}\)|\b\d{3})[-.\s]?\d{3}[-.\s]?\d{4}\b",
        0.8,
        true,
    ),
    (PiiType::Ssn, r"\b\d{3}[-.]?\d{2}[-.]?\d{4}\b", 0.95, true),
    (
        PiiType::CreditCard,
        r"\b\d{4}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4}\b",
        0.85,
        true,
    ),
    (
        PiiType::IpAddress,
        r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b",
        0.8,
        true,
    ),
    // Capitalization is the only signal for names, so this rule opts out of
    // case-insensitive matching.
    (
        PiiType::Name,
        r"(?-i:\b[A-Z][a-z]{1,15}\s+[A-Z][a-z]{1,15}\b)",
        0.6,
        false,
    ),
    (
        PiiType::Address,
        r"\b\d+\s+[A-Za-z\s]+(?:Street|St|Avenue|Ave|Road|Rd|Drive|Dr|Lane|Ln|Boulevard|Blvd|Apartment|Apt)\b",
        0.7,
        false,
    ),
    (
        PiiType::Date,
        r"\b(?:0[1-9]|1[0-2])[-/](?:0[1-9]|[12]\d|3[01])[-/](?:19|20)\d{2}\b",
        0.8,
        false,
    ),
    (
        PiiType::DriverLicense,
        r"\b[A-Z]\d{7,8}\b|\b\d{8,9}\b",
        0.5,
        false,
    ),
    (PiiType::Passport, r"\b[A-Z]{1,2}\d{6,9}\b", 0.7, false),
];

/// A compiled pattern
///
/// Patterns go through the finite-automaton engine when possible. Patterns
/// that need look-around or backreferences fall back to the backtracking
/// engine.
#[derive(Debug, Clone)]
pub enum CompiledPattern {
    /// `regex` crate, linear-time matching
    Standard(regex::Regex),
    /// `fancy-regex` crate, backtracking matching
    Backtracking(fancy_regex::Regex),
}

impl CompiledPattern {
    /// Compile `pattern` case-insensitively for `pii_type`
    pub fn compile(pii_type: &PiiType, pattern: &str) -> Result<Self> {
        match regex::RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
        {
            Ok(regex) => Ok(Self::Standard(regex)),
            Err(standard_err) => fancy_regex::Regex::new(&format!("(?i){pattern}"))
                .map(Self::Backtracking)
                .map_err(|_| PiiError::pattern(pii_type.as_str(), standard_err)),
        }
    }

    /// Source text of the pattern as registered
    pub fn as_str(&self) -> &str {
        match self {
            Self::Standard(regex) => regex.as_str(),
            Self::Backtracking(regex) => regex
                .as_str()
                .strip_prefix("(?i)")
                .unwrap_or_else(|| regex.as_str()),
        }
    }

    /// Byte spans of all leftmost, non-overlapping occurrences in `text`
    pub fn find_spans(&self, text: &str) -> Vec<Range<usize>> {
        match self {
            Self::Standard(regex) => regex.find_iter(text).map(|m| m.range()).collect(),
            Self::Backtracking(regex) => {
                let mut spans = Vec::new();
                for found in regex.find_iter(text) {
                    match found {
                        Ok(m) => spans.push(m.start()..m.end()),
                        Err(e) => {
                            tracing::warn!(
                                pattern = %self.as_str(),
                                error = %e,
                                "Backtracking pattern aborted, keeping matches found so far"
                            );
                            break;
                        }
                    }
                }
                spans
            }
        }
    }
}

/// A detection rule: what to look for and how much to trust it
#[derive(Debug, Clone)]
pub struct PatternRule {
    pii_type: PiiType,
    pattern: CompiledPattern,
    confidence: f32,
    validate: bool,
}

impl PatternRule {
    /// Compile a new rule
    pub fn new(pii_type: PiiType, pattern: &str, confidence: f32, validate: bool) -> Result<Self> {
        let pattern = CompiledPattern::compile(&pii_type, pattern)?;
        Ok(Self {
            pii_type,
            pattern,
            confidence: confidence.clamp(0.0, 1.0),
            validate,
        })
    }

    /// PII type this rule produces
    pub fn pii_type(&self) -> &PiiType {
        &self.pii_type
    }

    /// Compiled pattern
    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    /// Base confidence assigned to every match of this rule
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Whether matches must pass the type's validator
    pub fn validate(&self) -> bool {
        self.validate
    }
}

/// Rule definition from a TOML pattern library
#[derive(Debug, Clone, Deserialize)]
pub struct RuleDefinition {
    /// PII type tag
    pub pii_type: String,
    /// Regex pattern
    pub pattern: String,
    /// Confidence score (0.0 - 1.0)
    #[serde(default = "default_rule_confidence")]
    pub confidence: f32,
    /// Run the type's validator on each match
    #[serde(default)]
    pub validate: bool,
}

fn default_rule_confidence() -> f32 {
    0.5
}

/// Pattern library container
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    #[serde(default)]
    rules: Vec<RuleDefinition>,
}

/// Ordered registry of detection rules
///
/// Registry order is the order rules were first added; it decides which of
/// two equally confident matches at the same offset survives merging.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    rules: Vec<PatternRule>,
}

impl PatternRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in rules
    pub fn default_patterns() -> Result<Self> {
        let mut registry = Self::new();
        for (pii_type, pattern, confidence, validate) in BUILTIN_RULES {
            registry.add_rule(pii_type.clone(), pattern, *confidence, *validate)?;
        }
        Ok(registry)
    }

    /// Create a registry from a TOML pattern library file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            PiiError::Configuration(format!(
                "Failed to read pattern library {}: {e}",
                path.as_ref().display()
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Create a registry from TOML content
    ///
    /// ```toml
    /// [[rules]]
    /// pii_type = "employee_id"
    /// pattern = "EMP-\\d{6}"
    /// confidence = 0.8
    /// ```
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary = toml::from_str(content)?;

        let mut registry = Self::new();
        for def in library.rules {
            registry.add_rule(
                PiiType::from_tag(&def.pii_type),
                &def.pattern,
                def.confidence,
                def.validate,
            )?;
        }
        Ok(registry)
    }

    /// Register a rule, replacing any existing rule for the same type in place
    ///
    /// # Errors
    ///
    /// Returns [`PiiError::Pattern`] if the pattern does not compile.
    pub fn add_rule(
        &mut self,
        pii_type: PiiType,
        pattern: &str,
        confidence: f32,
        validate: bool,
    ) -> Result<()> {
        let rule = PatternRule::new(pii_type, pattern, confidence, validate)?;
        self.insert(rule);
        Ok(())
    }

    /// Register an already compiled rule, replacing any rule for the same type in place
    pub fn insert(&mut self, rule: PatternRule) {
        match self
            .rules
            .iter_mut()
            .find(|existing| existing.pii_type == rule.pii_type)
        {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
    }

    /// Register every rule of `other`, in its order
    pub fn extend(&mut self, other: PatternRegistry) {
        for rule in other.rules {
            self.insert(rule);
        }
    }

    /// Remove the rule for a type, returning it if present
    pub fn remove_rule(&mut self, pii_type: &PiiType) -> Option<PatternRule> {
        let index = self.rules.iter().position(|r| &r.pii_type == pii_type)?;
        Some(self.rules.remove(index))
    }

    /// Change a rule's base confidence; returns `false` if no rule exists
    pub fn update_confidence(&mut self, pii_type: &PiiType, confidence: f32) -> bool {
        match self.rules.iter_mut().find(|r| &r.pii_type == pii_type) {
            Some(rule) => {
                rule.confidence = confidence.clamp(0.0, 1.0);
                true
            }
            None => false,
        }
    }

    /// Get the rule for a type
    pub fn rule(&self, pii_type: &PiiType) -> Option<&PatternRule> {
        self.rules.iter().find(|r| &r.pii_type == pii_type)
    }

    /// All rules in registry order
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Types that have a rule, in registry order
    pub fn supported_types(&self) -> Vec<PiiType> {
        self.rules.iter().map(|r| r.pii_type.clone()).collect()
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the registry holds no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Try a pattern against sample text without registering it
    pub fn test_pattern(pattern: &str, text: &str) -> Result<Vec<String>> {
        let compiled = CompiledPattern::compile(&PiiType::Custom("test".to_string()), pattern)?;
        Ok(compiled
            .find_spans(text)
            .into_iter()
            .map(|span| text[span].to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_patterns() {
        let registry = PatternRegistry::default_patterns().unwrap();
        assert_eq!(registry.len(), PiiType::BUILTIN.len());
        assert_eq!(registry.supported_types(), PiiType::BUILTIN.to_vec());

        let ssn = registry.rule(&PiiType::Ssn).unwrap();
        assert_eq!(ssn.confidence(), 0.95);
        assert!(ssn.validate());
        assert!(!registry.rule(&PiiType::Name).unwrap().validate());
    }

    #[test]
    fn test_add_rule_invalid_pattern_fails_fast() {
        let mut registry = PatternRegistry::new();
        let err = registry
            .add_rule(PiiType::from_tag("broken"), "([a-z", 0.5, false)
            .unwrap_err();
        assert!(matches!(err, PiiError::Pattern { ref pii_type, .. } if pii_type == "broken"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_add_rule_replaces_in_place() {
        let mut registry = PatternRegistry::default_patterns().unwrap();
        registry
            .add_rule(PiiType::Phone, r"\d{3}-\d{4}", 0.4, false)
            .unwrap();

        assert_eq!(registry.len(), PiiType::BUILTIN.len());
        assert_eq!(registry.rules()[1].pii_type(), &PiiType::Phone);
        assert_eq!(registry.rules()[1].pattern().as_str(), r"\d{3}-\d{4}");
        assert_eq!(registry.rules()[1].confidence(), 0.4);
    }

    #[test]
    fn test_extend_overrides_and_appends() {
        let mut registry = PatternRegistry::default_patterns().unwrap();
        let custom = PatternRegistry::from_toml(
            r#"
[[rules]]
pii_type = "ssn"
pattern = "\\d{9}"
confidence = 0.3

[[rules]]
pii_type = "badge"
pattern = "B-\\d{4}"
"#,
        )
        .unwrap();

        registry.extend(custom);
        assert_eq!(registry.len(), PiiType::BUILTIN.len() + 1);
        assert_eq!(registry.rules()[2].confidence(), 0.3);
        assert_eq!(
            registry.supported_types().last(),
            Some(&PiiType::from_tag("badge"))
        );
    }

    #[test]
    fn test_remove_and_update() {
        let mut registry = PatternRegistry::default_patterns().unwrap();
        assert!(registry.remove_rule(&PiiType::Passport).is_some());
        assert!(registry.remove_rule(&PiiType::Passport).is_none());
        assert!(registry.rule(&PiiType::Passport).is_none());

        assert!(registry.update_confidence(&PiiType::Email, 0.55));
        assert_eq!(registry.rule(&PiiType::Email).unwrap().confidence(), 0.55);
        assert!(!registry.update_confidence(&PiiType::Passport, 0.9));
    }

    #[test]
    fn test_lookaround_pattern_uses_backtracking_engine() {
        let mut registry = PatternRegistry::new();
        registry
            .add_rule(
                PiiType::from_tag("employee_id"),
                r"(?<=EMP-)\d{6}",
                0.8,
                false,
            )
            .unwrap();

        let rule = &registry.rules()[0];
        assert!(matches!(rule.pattern(), CompiledPattern::Backtracking(_)));
        assert_eq!(rule.pattern().as_str(), r"(?<=EMP-)\d{6}");
        assert_eq!(rule.pattern().find_spans("id emp-123456"), vec![7..13]);
    }

    #[test]
    fn test_from_toml_preserves_order() {
        let toml = r#"
[[rules]]
pii_type = "employee_id"
pattern = "EMP-\\d{6}"
confidence = 0.8

[[rules]]
pii_type = "email"
pattern = "[a-z]+@corp\\.example"
validate = true
"#;
        let registry = PatternRegistry::from_toml(toml).unwrap();
        assert_eq!(
            registry.supported_types(),
            vec![PiiType::from_tag("employee_id"), PiiType::Email]
        );
        assert_eq!(registry.rules()[1].confidence(), 0.5);
        assert!(registry.rules()[1].validate());
    }

    #[test]
    fn test_from_toml_invalid_pattern() {
        let toml = r#"
[[rules]]
pii_type = "bad"
pattern = "(unclosed"
"#;
        assert!(matches!(
            PatternRegistry::from_toml(toml),
            Err(PiiError::Pattern { .. })
        ));
    }

    #[test]
    fn test_test_pattern_is_case_insensitive() {
        let found = PatternRegistry::test_pattern(r"acct-\d+", "ACCT-1 and acct-22").unwrap();
        assert_eq!(found, vec!["ACCT-1".to_string(), "acct-22".to_string()]);
        assert!(PatternRegistry::test_pattern("[", "x").is_err());
    }
}
