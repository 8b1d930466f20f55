//! Domain models and types for piiguard.
//!
//! The domain layer provides:
//! - **Match entity** ([`PiiMatch`]) - one immutable finding with its span
//! - **Type vocabulary** ([`PiiType`]) - built-in PII types plus custom tags
//! - **Error types** ([`PiiError`])
//! - **Result type alias** ([`Result`])
//!
//! ```rust
//! use piiguard::domain::{PiiMatch, PiiType};
//!
//! let text = "reach me at jo@example.org";
//! let found = PiiMatch::new(PiiType::Email, "jo@example.org", 12, 26, 0.9, "pattern");
//! assert!(found.is_consistent_with(text));
//! ```

pub mod errors;
pub mod pii_match;
pub mod pii_type;
pub mod result;

pub use errors::PiiError;
pub use pii_match::PiiMatch;
pub use pii_type::PiiType;
pub use result::Result;
