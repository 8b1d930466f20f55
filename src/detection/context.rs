//! Cue-word PII detector
//!
//! Finds values introduced by a labelling word, such as `email: ...` or
//! `call ...`. Only the value itself is reported, never the cue.

use super::{extract_context, validators, PiiDetector, DEFAULT_CONTEXT_WINDOW};
use crate::domain::{PiiError, PiiMatch, PiiType, Result};
use regex::{Regex, RegexBuilder};

/// Provenance tag for matches produced by [`ContextDetector`]
pub const CONTEXT_DETECTOR_NAME: &str = "context";

const CUE_RULES: &[(PiiType, &str, f32)] = &[
    (
        PiiType::Email,
        r"\b(?:email|e-mail|contact)[:.\s]*([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})",
        0.85,
    ),
    (
        PiiType::Phone,
        r"\b(?:phone|call|tel|mobile)[:.\s]*(\+?1?[-.\s]?(?:\(\d{3}\)|\d{3})[-.\s]?\d{3}[-.\s]?\d{4})\b",
        0.75,
    ),
    (
        PiiType::Ssn,
        r"\b(?:ssn|social security(?: number)?)[:.\s#]*(\d{3}[-.]?\d{2}[-.]?\d{4})\b",
        0.9,
    ),
    (
        PiiType::Date,
        r"\b(?:day|date|time|month|week)[:.\s]*(\d{1,2}[-/]\d{1,2}[-/]\d{4}|[A-Za-z]+ \d{1,2},? \d{4})",
        0.7,
    ),
];

#[derive(Debug, Clone)]
struct CueRule {
    pii_type: PiiType,
    regex: Regex,
    confidence: f32,
}

/// Detector for PII introduced by cue words
#[derive(Debug, Clone)]
pub struct ContextDetector {
    rules: Vec<CueRule>,
    context_window: usize,
}

impl ContextDetector {
    /// Create a detector with the built-in cue rules
    pub fn new() -> Result<Self> {
        let rules = CUE_RULES
            .iter()
            .map(|(pii_type, pattern, confidence)| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map(|regex| CueRule {
                        pii_type: pii_type.clone(),
                        regex,
                        confidence: *confidence,
                    })
                    .map_err(|e| PiiError::pattern(pii_type.as_str(), e))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rules,
            context_window: DEFAULT_CONTEXT_WINDOW,
        })
    }

    /// Keep only the cue rules for the given types
    pub fn with_enabled_types<I>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = PiiType>,
    {
        let enabled: Vec<PiiType> = types.into_iter().collect();
        self.rules.retain(|rule| enabled.contains(&rule.pii_type));
        self
    }

    /// Set the context snippet window, in characters per side
    pub fn with_context_window(mut self, window: usize) -> Self {
        self.context_window = window;
        self
    }
}

impl PiiDetector for ContextDetector {
    fn name(&self) -> &str {
        CONTEXT_DETECTOR_NAME
    }

    fn detect(&self, text: &str) -> Vec<PiiMatch> {
        let mut matches = Vec::new();
        if text.is_empty() {
            return matches;
        }

        for rule in &self.rules {
            for captures in rule.regex.captures_iter(text) {
                let Some(group) = captures.get(1) else {
                    continue;
                };
                let raw = group.as_str();
                let value = raw.trim();
                if value.chars().count() < 2 {
                    continue;
                }
                let start = group.start() + (raw.len() - raw.trim_start().len());
                let end = start + value.len();

                if !validators::validate(&rule.pii_type, value) {
                    continue;
                }

                matches.push(
                    PiiMatch::new(
                        rule.pii_type.clone(),
                        value,
                        start,
                        end,
                        rule.confidence,
                        CONTEXT_DETECTOR_NAME,
                    )
                    .with_context(extract_context(text, start, end, self.context_window)),
                );
            }
        }

        tracing::debug!(count = matches.len(), "Context detection complete");
        matches
    }

    fn supported_types(&self) -> Vec<PiiType> {
        self.rules.iter().map(|r| r.pii_type.clone()).collect()
    }
}
