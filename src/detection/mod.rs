//! PII detection module
//!
//! Provides the trait-based detection interface and the built-in detectors
//! that locate PII spans in free text.

pub mod context;
pub mod patterns;
pub mod regex;
pub mod validators;

pub use context::ContextDetector;
pub use patterns::{PatternRegistry, PatternRule};
pub use regex::PatternDetector;

use crate::domain::{PiiMatch, PiiType};

/// Default number of characters captured on each side of a match
pub const DEFAULT_CONTEXT_WINDOW: usize = 50;

/// Trait for PII detection implementations
///
/// Detection is infallible for well-formed input: a detector reports what it
/// found and nothing else. Returned offsets refer to `text` as given.
pub trait PiiDetector: Send + Sync {
    /// Provenance tag written into every match
    fn name(&self) -> &str;

    /// Detect PII in a text
    fn detect(&self, text: &str) -> Vec<PiiMatch>;

    /// Types this detector can produce
    fn supported_types(&self) -> Vec<PiiType> {
        Vec::new()
    }
}

/// Snippet of `text` around `start..end`, `window` characters on each side
///
/// `...` marks a side that was cut short. Offsets must be character
/// boundaries; the window is counted in characters, never splitting one.
pub fn extract_context(text: &str, start: usize, end: usize, window: usize) -> String {
    let ctx_start = text[..start]
        .char_indices()
        .rev()
        .take(window)
        .last()
        .map_or(start, |(i, _)| i);
    let ctx_end = text[end..]
        .char_indices()
        .nth(window)
        .map_or(text.len(), |(i, _)| end + i);

    let mut snippet = String::with_capacity(ctx_end - ctx_start + 6);
    if ctx_start > 0 {
        snippet.push_str("...");
    }
    snippet.push_str(&text[ctx_start..ctx_end]);
    if ctx_end < text.len() {
        snippet.push_str("...");
    }
    snippet
}
