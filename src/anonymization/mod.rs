//! Anonymization module for piiguard
//!
//! Rewrites text so that resolved PII spans are masked, redacted, hashed,
//! tagged or swapped for synthetic values.
//!
//! # Architecture
//!
//! - **Strategies** ([`anonymizer`]): one closed enum, one function per strategy
//! - **Engine** ([`AnonymizationEngine`]): offset-safe single-pass rewrite
//! - **Verification** ([`verify`]): residual-PII scan of the output
//!
//! # Usage
//!
//! ```rust
//! use piiguard::anonymization::{AnonymizationEngine, AnonymizationPolicy};
//!
//! let engine = AnonymizationEngine::new(AnonymizationPolicy::default());
//! let outcome = engine.anonymize("nothing to hide", &[]);
//! assert_eq!(outcome.text, "nothing to hide");
//! ```

pub mod anonymizer;
pub mod engine;
pub mod verify;

// Re-export main types
pub use anonymizer::{AnonymizationPolicy, AnonymizationStrategy};
pub use engine::{AnonymizationEngine, AnonymizationOutcome};
pub use verify::{find_residual_pii, ResidualFinding, ResidualKind, ResidualScanner};
