//! Redaction and tag replacement strategies

use super::AnonymizationPolicy;
use crate::domain::PiiType;

/// Fixed output of the redact strategy
pub const REDACTED: &str = "[REDACTED]";

/// Per-type replacement tag; types without a tag keep their original value
pub fn replacement_tag(pii_type: &PiiType, value: &str, policy: &AnonymizationPolicy) -> String {
    policy
        .replacement_patterns
        .get(pii_type)
        .cloned()
        .unwrap_or_else(|| value.to_string())
}
