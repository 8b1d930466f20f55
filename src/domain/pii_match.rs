//! PII match data model
//!
//! A [`PiiMatch`] records one finding: which type, where in the source text,
//! how confident the detector was, and which detector produced it. Matches are
//! immutable once built; later stages only keep or discard them.

use super::pii_type::PiiType;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// One detected span of PII
///
/// `start` and `end` are half-open UTF-8 byte offsets into the original text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiiMatch {
    pii_type: PiiType,
    value: String,
    start: usize,
    end: usize,
    confidence: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    context: Option<String>,
    detector_name: String,
}

impl PiiMatch {
    /// Create a new match
    ///
    /// Confidence is clamped into `[0, 1]`. No span check happens here; the
    /// anonymization engine verifies [`is_consistent_with`](Self::is_consistent_with)
    /// before splicing.
    pub fn new(
        pii_type: PiiType,
        value: impl Into<String>,
        start: usize,
        end: usize,
        confidence: f32,
        detector_name: impl Into<String>,
    ) -> Self {
        Self {
            pii_type,
            value: value.into(),
            start,
            end,
            confidence: clamp_confidence(confidence),
            context: None,
            detector_name: detector_name.into(),
        }
    }

    /// Attach a surrounding-text snippet
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// PII type
    pub fn pii_type(&self) -> &PiiType {
        &self.pii_type
    }

    /// Matched text
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Start offset (inclusive)
    pub fn start(&self) -> usize {
        self.start
    }

    /// End offset (exclusive)
    pub fn end(&self) -> usize {
        self.end
    }

    /// Byte span as a range
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Span length in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Detector confidence in `[0, 1]`
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Surrounding-text snippet, if the detector captured one
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Name of the detector that produced this match
    pub fn detector_name(&self) -> &str {
        &self.detector_name
    }

    /// Whether two spans conflict during merging
    ///
    /// Touching spans (`other.start == self.end`) count as conflicting.
    pub fn conflicts_with(&self, other: &PiiMatch) -> bool {
        other.start <= self.end && self.start <= other.end
    }

    /// Check the span contract against the text the match will be spliced into
    ///
    /// Requires `start < end <= text.len()`, `end - start == value.len()` and
    /// both offsets on character boundaries.
    pub fn is_consistent_with(&self, text: &str) -> bool {
        self.start < self.end
            && self.end <= text.len()
            && self.end - self.start == self.value.len()
            && text.is_char_boundary(self.start)
            && text.is_char_boundary(self.end)
    }
}

fn clamp_confidence(confidence: f32) -> f32 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}
