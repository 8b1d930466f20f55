//! Regex-based PII detector

use super::{extract_context, patterns::PatternRegistry, validators, PiiDetector};
use super::{patterns::PatternRule, DEFAULT_CONTEXT_WINDOW};
use crate::config::PiiGuardConfig;
use crate::domain::{PiiMatch, PiiType, Result};
use std::collections::HashSet;
use std::ops::Range;

/// Provenance tag for matches produced by [`PatternDetector`]
pub const PATTERN_DETECTOR_NAME: &str = "pattern";

/// Shortest value, in characters, reported as a match
const MIN_MATCH_CHARS: usize = 2;

/// Regex-based PII detector
///
/// Applies every enabled rule of its [`PatternRegistry`] in registry order.
/// Matches are reported as found; merging overlaps is left to the caller.
///
/// Types are enabled unless explicitly disabled, so a rule registered later
/// through [`PatternDetector::registry_mut`] runs on the next detection call.
#[derive(Debug, Clone)]
pub struct PatternDetector {
    registry: PatternRegistry,
    disabled_types: HashSet<PiiType>,
    context_window: usize,
}

impl PatternDetector {
    /// Create a new pattern detector with the built-in rules, all enabled
    pub fn new() -> Result<Self> {
        Ok(Self::with_registry(PatternRegistry::default_patterns()?))
    }

    /// Create a new pattern detector with a custom pattern registry
    pub fn with_registry(registry: PatternRegistry) -> Self {
        Self {
            registry,
            disabled_types: HashSet::new(),
            context_window: DEFAULT_CONTEXT_WINDOW,
        }
    }

    /// Build a detector from configuration
    ///
    /// Loads the optional pattern library on top of the built-in rules,
    /// applies per-type confidence overrides and disables the types the
    /// configuration switches off.
    pub fn from_config(config: &PiiGuardConfig) -> Result<Self> {
        let mut registry = PatternRegistry::default_patterns()?;

        if let Some(library) = &config.detection.pattern_library {
            let custom = PatternRegistry::from_file(library)?;
            tracing::debug!(
                path = %library.display(),
                rules = custom.len(),
                "Loaded custom pattern library"
            );
            registry.extend(custom);
        }

        for (tag, type_config) in &config.pii_types {
            if let Some(confidence) = type_config.confidence {
                registry.update_confidence(&PiiType::from_tag(tag), confidence);
            }
        }

        // Switched-off types stay off even if their rule is registered later
        let disabled: HashSet<PiiType> = registry
            .supported_types()
            .into_iter()
            .chain(config.pii_types.keys().map(|tag| PiiType::from_tag(tag)))
            .filter(|pii_type| !config.is_type_enabled(pii_type))
            .collect();

        let mut detector =
            Self::with_registry(registry).with_context_window(config.detection.context_window);
        detector.disabled_types = disabled;
        Ok(detector)
    }

    /// Restrict detection to the given types
    ///
    /// Every type currently in the registry but not listed is disabled.
    /// Types registered afterwards are enabled.
    pub fn with_enabled_types<I>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = PiiType>,
    {
        let enabled: HashSet<PiiType> = types.into_iter().collect();
        self.disabled_types = self
            .registry
            .supported_types()
            .into_iter()
            .filter(|pii_type| !enabled.contains(pii_type))
            .collect();
        self
    }

    /// Stop detecting a type; its rules stay registered
    pub fn disable_type(&mut self, pii_type: &PiiType) {
        self.disabled_types.insert(pii_type.clone());
    }

    /// Resume detecting a previously disabled type
    pub fn enable_type(&mut self, pii_type: &PiiType) {
        self.disabled_types.remove(pii_type);
    }

    /// Set the context snippet window, in characters per side
    pub fn with_context_window(mut self, window: usize) -> Self {
        self.context_window = window;
        self
    }

    /// Rule registry
    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Mutable rule registry; changes apply to the next detection call
    pub fn registry_mut(&mut self) -> &mut PatternRegistry {
        &mut self.registry
    }

    /// Register a custom rule and enable its type
    pub fn add_custom_pattern(
        &mut self,
        pii_type: PiiType,
        pattern: &str,
        confidence: f32,
        validate: bool,
    ) -> Result<()> {
        self.registry
            .add_rule(pii_type.clone(), pattern, confidence, validate)?;
        self.enable_type(&pii_type);
        Ok(())
    }

    /// Types currently enabled, in registry order
    pub fn enabled_types(&self) -> Vec<PiiType> {
        self.registry
            .supported_types()
            .into_iter()
            .filter(|pii_type| self.is_enabled(pii_type))
            .collect()
    }

    fn is_enabled(&self, pii_type: &PiiType) -> bool {
        !self.disabled_types.contains(pii_type)
    }

    /// Detect PII of the given types only
    pub fn detect_enabled(&self, text: &str, enabled: &HashSet<PiiType>) -> Vec<PiiMatch> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut matches = Vec::new();
        for rule in self.registry.rules() {
            if enabled.contains(rule.pii_type()) {
                self.scan_rule(rule, text, &mut matches);
            }
        }
        matches
    }

    fn scan_rule(&self, rule: &PatternRule, text: &str, matches: &mut Vec<PiiMatch>) {
        for span in rule.pattern().find_spans(text) {
            let Some(span) = trim_span(text, span) else {
                continue;
            };
            let value = &text[span.clone()];

            if value.chars().count() < MIN_MATCH_CHARS {
                continue;
            }

            if rule.validate() && !validators::validate(rule.pii_type(), value) {
                tracing::trace!(pii_type = %rule.pii_type(), "Candidate failed validation");
                continue;
            }

            let context = extract_context(text, span.start, span.end, self.context_window);
            matches.push(
                PiiMatch::new(
                    rule.pii_type().clone(),
                    value,
                    span.start,
                    span.end,
                    rule.confidence(),
                    PATTERN_DETECTOR_NAME,
                )
                .with_context(context),
            );
        }
    }
}

impl PiiDetector for PatternDetector {
    fn name(&self) -> &str {
        PATTERN_DETECTOR_NAME
    }

    fn detect(&self, text: &str) -> Vec<PiiMatch> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut matches = Vec::new();
        for rule in self.registry.rules() {
            if self.is_enabled(rule.pii_type()) {
                self.scan_rule(rule, text, &mut matches);
            }
        }

        tracing::debug!(count = matches.len(), "Pattern detection complete");
        matches
    }

    fn supported_types(&self) -> Vec<PiiType> {
        self.enabled_types()
    }
}

/// Shrink a span to exclude leading and trailing whitespace
fn trim_span(text: &str, span: Range<usize>) -> Option<Range<usize>> {
    let slice = &text[span.clone()];
    let leading = slice.len() - slice.trim_start().len();
    let trailing = slice.len() - slice.trim_end().len();

    if leading == slice.len() {
        return None;
    }
    Some(span.start + leading..span.end - trailing)
}
