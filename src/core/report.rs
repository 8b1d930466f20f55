//! Detection statistics and scan reports

use crate::domain::PiiMatch;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Examples kept per type in an [`AnonymizationSummary`]
const MAX_EXAMPLES_PER_TYPE: usize = 3;

/// Aggregate numbers over a match set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DetectionStats {
    /// Total matches
    pub total_matches: usize,
    /// Matches per type tag
    pub by_type: BTreeMap<String, usize>,
    /// Mean confidence, 0 for an empty set
    pub average_confidence: f32,
}

impl DetectionStats {
    /// Compute statistics for a match set
    pub fn from_matches(matches: &[PiiMatch]) -> Self {
        let mut by_type = BTreeMap::new();
        let mut confidence_sum = 0.0f32;

        for m in matches {
            *by_type.entry(m.pii_type().to_string()).or_insert(0) += 1;
            confidence_sum += m.confidence();
        }

        let average_confidence = if matches.is_empty() {
            0.0
        } else {
            confidence_sum / matches.len() as f32
        };

        Self {
            total_matches: matches.len(),
            by_type,
            average_confidence,
        }
    }
}

/// Per-type figures inside an [`AnonymizationSummary`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TypeSummary {
    /// Matches of this type
    pub count: usize,
    /// Sum of matched value lengths, in characters
    pub total_length: usize,
    /// First few matched values
    pub examples: Vec<String>,
}

/// What an anonymization pass touched, per type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AnonymizationSummary {
    /// Total matches
    pub total: usize,
    /// Figures per type tag
    pub by_type: BTreeMap<String, TypeSummary>,
}

impl AnonymizationSummary {
    /// Summarize a match set
    pub fn from_matches(matches: &[PiiMatch]) -> Self {
        let mut by_type: BTreeMap<String, TypeSummary> = BTreeMap::new();

        for m in matches {
            let entry = by_type.entry(m.pii_type().to_string()).or_default();
            entry.count += 1;
            entry.total_length += m.value().chars().count();
            if entry.examples.len() < MAX_EXAMPLES_PER_TYPE {
                entry.examples.push(m.value().to_string());
            }
        }

        Self {
            total: matches.len(),
            by_type,
        }
    }
}

/// Report for one scanned input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Report identifier
    pub id: Uuid,
    /// Creation time
    pub generated_at: DateTime<Utc>,
    /// Input name (file path or `stdin`)
    pub source: String,
    /// Input length in bytes
    pub text_length: usize,
    /// Aggregate numbers
    pub stats: DetectionStats,
    /// Resolved matches in ascending offset order
    pub matches: Vec<PiiMatch>,
}

impl ScanReport {
    /// Create a report for a scanned input
    pub fn new(source: impl Into<String>, text: &str, matches: Vec<PiiMatch>) -> Self {
        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            source: source.into(),
            text_length: text.len(),
            stats: DetectionStats::from_matches(&matches),
            matches,
        }
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                       PII SCAN REPORT                         \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!("  Source:              {}\n", self.source));
        output.push_str(&format!("  Text Length:         {} bytes\n", self.text_length));
        output.push_str(&format!(
            "  PII Matches:         {}\n",
            self.stats.total_matches
        ));
        output.push_str(&format!(
            "  Average Confidence:  {:.2}%\n",
            self.stats.average_confidence * 100.0
        ));
        output.push('\n');

        if !self.stats.by_type.is_empty() {
            output.push_str("🔍 MATCHES BY TYPE\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");

            let mut types: Vec<_> = self.stats.by_type.iter().collect();
            types.sort_by(|a, b| b.1.cmp(a.1));

            for (pii_type, count) in types {
                output.push_str(&format!("  {:30} {:>5}\n", pii_type, count));
            }
            output.push('\n');

            output.push_str("📝 MATCHES\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for m in &self.matches {
                output.push_str(&format!(
                    "  [{:>6}..{:<6}] {:16} {:>5.1}%  \"{}\"\n",
                    m.start(),
                    m.end(),
                    m.pii_type().as_str(),
                    m.confidence() * 100.0,
                    m.value()
                ));
            }
            output.push('\n');
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Format matches as CSV: `pii_type,value,start,end,confidence`
    pub fn format_csv(&self) -> String {
        let mut output = String::from("pii_type,value,start,end,confidence\n");
        for m in &self.matches {
            output.push_str(&format!(
                "{},{},{},{},{:.2}\n",
                csv_field(m.pii_type().as_str()),
                csv_field(m.value()),
                m.start(),
                m.end(),
                m.confidence()
            ));
        }
        output
    }
}

/// Quote a CSV field when it contains a delimiter, quote or line break
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
