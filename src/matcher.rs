//! Pattern matching over the recent outcome history

use crate::catalog::{Pattern, PatternCatalog};
use crate::types::Outcome;

/// Matching only looks at the most recent symbols.
pub const MATCH_WINDOW: usize = 10;

/// Find the best-matching pattern for a history tail (oldest-first).
///
/// A pattern matches when its sequence equals the last `len(sequence)`
/// symbols exactly. Among matches the strictly longest sequence wins;
/// equal-length maxima are broken by catalog declaration order (first
/// declared wins), so results are deterministic for a given catalog.
pub fn find_match<'a>(catalog: &'a PatternCatalog, tail: &[Outcome]) -> Option<&'a Pattern> {
    let skip = tail.len().saturating_sub(MATCH_WINDOW);
    let window = &tail[skip..];

    let mut best: Option<&Pattern> = None;
    for pattern in catalog.patterns() {
        let n = pattern.sequence.len();
        if n > window.len() {
            continue;
        }
        if window[window.len() - n..] != pattern.sequence[..] {
            continue;
        }
        // Strictly-longer replacement keeps the first maximal match.
        if best.map_or(true, |b| n > b.sequence.len()) {
            best = Some(pattern);
        }
    }
    best
}
