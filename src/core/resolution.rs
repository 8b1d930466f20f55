//! Overlap resolution and confidence filtering
//!
//! Detectors report whatever they find, so the same span can show up several
//! times under different types. [`merge_overlapping`] reduces a raw match set
//! to an ascending, non-overlapping list; [`filter_by_confidence`] then drops
//! the weak findings.

use crate::domain::PiiMatch;

/// Default confidence threshold
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.4;

/// Reduce a match set to non-overlapping spans
///
/// Matches are stably sorted by start offset and walked with one
/// accumulator. A match that starts at or before the accumulator's end
/// conflicts with it (touching spans included) and replaces it only when its
/// confidence is strictly higher. The winner keeps its own span; spans are
/// never unioned. On a tie the earlier match in input order survives.
pub fn merge_overlapping(mut matches: Vec<PiiMatch>) -> Vec<PiiMatch> {
    if matches.len() < 2 {
        return matches;
    }

    matches.sort_by_key(PiiMatch::start);

    let mut merged = Vec::with_capacity(matches.len());
    let mut iter = matches.into_iter();
    let Some(mut current) = iter.next() else {
        return merged;
    };

    for candidate in iter {
        if current.conflicts_with(&candidate) {
            if candidate.confidence() > current.confidence() {
                current = candidate;
            }
        } else {
            merged.push(std::mem::replace(&mut current, candidate));
        }
    }
    merged.push(current);

    merged
}

/// Keep matches whose confidence is at least `threshold`
pub fn filter_by_confidence(matches: Vec<PiiMatch>, threshold: f32) -> Vec<PiiMatch> {
    matches
        .into_iter()
        .filter(|m| m.confidence() >= threshold)
        .collect()
}
