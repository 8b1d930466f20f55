//! Residual PII verification
//!
//! Scans anonymized output for anything that still looks like an email,
//! phone number, SSN or card number, and for replacement tags that were cut
//! in half. Known synthetic placeholders are not reported.

use crate::anonymization::anonymizer::synthetic::SYNTHETIC_VALUES;
use crate::domain::{PiiError, PiiType, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

const RESIDUAL_CHECKS: &[(PiiType, &str)] = &[
    (
        PiiType::Email,
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
    ),
    (PiiType::Phone, r"\b\d{3}[-.\s]?\d{3}[-.\s]?\d{4}\b"),
    (PiiType::Ssn, r"\b\d{3}[-.]?\d{2}[-.]?\d{4}\b"),
    (
        PiiType::CreditCard,
        r"\b\d{4}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4}\b",
    ),
];

/// Tag opened at the end of the text but never closed
const OPEN_TAG: &str = r"\[[A-Z][A-Z_]*(?::[0-9a-f]*)?$";

/// Tag closed without its opening bracket
const CLOSE_TAG: &str = r"(?:^|[^\[A-Z_:])([A-Z][A-Z_]{2,}\])";

/// What a residual finding looks like
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "pii_type")]
pub enum ResidualKind {
    /// Text shaped like PII of the given type
    PotentialPii(PiiType),
    /// A replacement tag missing one of its brackets
    BrokenTag,
}

/// Something in anonymized output that needs a second look
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidualFinding {
    /// Kind of finding
    pub kind: ResidualKind,
    /// Offending text
    pub value: String,
    /// Start byte offset
    pub start: usize,
    /// End byte offset
    pub end: usize,
}

/// Compiled residual checks
#[derive(Debug, Clone)]
pub struct ResidualScanner {
    checks: Vec<(PiiType, Regex)>,
    open_tag: Regex,
    close_tag: Regex,
}

impl ResidualScanner {
    /// Compile the residual checks
    pub fn new() -> Result<Self> {
        let compile = |pii_type: &str, pattern: &str| {
            Regex::new(pattern).map_err(|e| PiiError::pattern(pii_type, e))
        };

        let checks = RESIDUAL_CHECKS
            .iter()
            .map(|(pii_type, pattern)| Ok((pii_type.clone(), compile(pii_type.as_str(), pattern)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            checks,
            open_tag: compile("tag", OPEN_TAG)?,
            close_tag: compile("tag", CLOSE_TAG)?,
        })
    }

    /// Scan anonymized text
    pub fn scan(&self, text: &str) -> Vec<ResidualFinding> {
        let mut findings = Vec::new();

        for (pii_type, regex) in &self.checks {
            for m in regex.find_iter(text) {
                if is_safe_placeholder(m.as_str()) {
                    continue;
                }
                findings.push(ResidualFinding {
                    kind: ResidualKind::PotentialPii(pii_type.clone()),
                    value: m.as_str().to_string(),
                    start: m.start(),
                    end: m.end(),
                });
            }
        }

        let broken = self
            .open_tag
            .find_iter(text)
            .chain(self.close_tag.captures_iter(text).filter_map(|c| c.get(1)));
        for m in broken {
            findings.push(ResidualFinding {
                kind: ResidualKind::BrokenTag,
                value: m.as_str().to_string(),
                start: m.start(),
                end: m.end(),
            });
        }

        findings.sort_by_key(|f| f.start);
        for finding in &findings {
            tracing::warn!(
                kind = ?finding.kind,
                start = finding.start,
                end = finding.end,
                "Residual PII in anonymized output"
            );
        }
        findings
    }
}

/// Scan anonymized text with a freshly compiled scanner
pub fn find_residual_pii(text: &str) -> Result<Vec<ResidualFinding>> {
    Ok(ResidualScanner::new()?.scan(text))
}

fn is_safe_placeholder(value: &str) -> bool {
    SYNTHETIC_VALUES.iter().any(|safe| safe.contains(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_output() {
        let findings =
            find_residual_pii("Email [EMAIL] or call [PHONE], ref [HASH:2dfa32dc]").unwrap();
        assert!(findings.is_empty());
    }

    #[test]
    fn test_synthetic_values_are_safe() {
        let text = "John Smith, user@domain.com, 123-456-7890, 111-11-1111, 111111111";
        assert!(find_residual_pii(text).unwrap().is_empty());
    }

    #[test]
    fn test_leftover_pii_reported() {
        let findings = find_residual_pii("missed jane@corp.io and 555-867-5309").unwrap();
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].kind, ResidualKind::PotentialPii(PiiType::Email));
        assert_eq!(findings[1].kind, ResidualKind::PotentialPii(PiiType::Phone));
        assert_eq!(findings[1].value, "555-867-5309");
    }

    #[test]
    fn test_broken_tags() {
        let open = find_residual_pii("truncated at [EMAI").unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].kind, ResidualKind::BrokenTag);
        assert_eq!(open[0].value, "[EMAI");

        let close = find_residual_pii("call PHONE] now").unwrap();
        assert_eq!(close.len(), 1);
        assert_eq!(close[0].value, "PHONE]");
    }
}
