//! Main anonymization engine
//!
//! [`AnonymizationEngine`] rewrites a text in one pass, replacing every
//! resolved match with the output of the selected strategy.
//!
//! # Offset safety
//!
//! Matches carry offsets into the original text. The engine applies them
//! from the highest start offset down, so each splice only shifts text that
//! has already been processed and every remaining offset stays valid.
//!
//! # Examples
//!
//! ```
//! use piiguard::anonymization::{AnonymizationEngine, AnonymizationPolicy, AnonymizationStrategy};
//! use piiguard::domain::{PiiMatch, PiiType};
//!
//! let engine = AnonymizationEngine::new(AnonymizationPolicy::default());
//! let text = "mail bob@x.io now";
//! let matches = vec![PiiMatch::new(PiiType::Email, "bob@x.io", 5, 13, 0.9, "pattern")];
//!
//! let outcome = engine.anonymize_with(text, &matches, AnonymizationStrategy::Replace);
//! assert_eq!(outcome.text, "mail [EMAIL] now");
//! ```

use crate::anonymization::anonymizer::{AnonymizationPolicy, AnonymizationStrategy};
use crate::config::PiiGuardConfig;
use crate::domain::{PiiError, PiiMatch};
use serde::{Deserialize, Serialize};

/// Result of one anonymization pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymizationOutcome {
    /// Rewritten text
    pub text: String,
    /// Matches that were replaced
    pub replaced: usize,
    /// Matches rejected by the span guard or overlapping an applied span
    pub dropped: usize,
}

/// Main anonymization engine
///
/// Holds a read-only [`AnonymizationPolicy`]; the engine is `Send + Sync` and
/// can be shared across threads behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct AnonymizationEngine {
    policy: AnonymizationPolicy,
}

impl AnonymizationEngine {
    /// Create a new anonymization engine
    pub fn new(policy: AnonymizationPolicy) -> Self {
        Self { policy }
    }

    /// Create an engine from the `[anonymization]` configuration section
    pub fn from_config(config: &PiiGuardConfig) -> Self {
        Self::new(AnonymizationPolicy::from_config(&config.anonymization))
    }

    /// Policy in use
    pub fn policy(&self) -> &AnonymizationPolicy {
        &self.policy
    }

    /// Anonymize with the policy's default strategy
    pub fn anonymize(&self, text: &str, matches: &[PiiMatch]) -> AnonymizationOutcome {
        self.anonymize_with(text, matches, self.policy.strategy)
    }

    /// Anonymize with an explicit strategy
    ///
    /// Characters outside match spans are preserved exactly. A match that
    /// does not describe a valid span of `text`, or that overlaps a span
    /// already replaced, is skipped and counted in
    /// [`dropped`](AnonymizationOutcome::dropped).
    pub fn anonymize_with(
        &self,
        text: &str,
        matches: &[PiiMatch],
        strategy: AnonymizationStrategy,
    ) -> AnonymizationOutcome {
        let mut outcome = AnonymizationOutcome {
            text: text.to_string(),
            replaced: 0,
            dropped: 0,
        };
        if text.is_empty() || matches.is_empty() {
            return outcome;
        }

        let mut ordered: Vec<&PiiMatch> = matches.iter().collect();
        ordered.sort_by(|a, b| b.start().cmp(&a.start()));

        // Lowest start offset replaced so far
        let mut floor = text.len();

        for pii_match in ordered {
            if let Err(e) = check_span(text, pii_match, floor) {
                tracing::warn!(
                    pii_type = %pii_match.pii_type(),
                    start = pii_match.start(),
                    end = pii_match.end(),
                    error = %e,
                    "Dropping match"
                );
                outcome.dropped += 1;
                continue;
            }

            let replacement = self.policy.render(pii_match, strategy);
            outcome.text.replace_range(pii_match.span(), &replacement);
            floor = pii_match.start();
            outcome.replaced += 1;
        }

        tracing::debug!(
            strategy = %strategy,
            replaced = outcome.replaced,
            dropped = outcome.dropped,
            "Anonymization complete"
        );
        outcome
    }
}

fn check_span(text: &str, pii_match: &PiiMatch, floor: usize) -> Result<(), PiiError> {
    if !pii_match.is_consistent_with(text) {
        return Err(PiiError::InvalidMatch(
            "span does not fit the text".to_string(),
        ));
    }
    if pii_match.end() > floor {
        return Err(PiiError::InvalidMatch(
            "span overlaps a replaced span".to_string(),
        ));
    }
    Ok(())
}
