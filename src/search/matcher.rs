//! Case-insensitive in-order character matching.

use unicode_normalization::UnicodeNormalization;

/// Positions (char indices into `candidate`) of a case-insensitive subsequence
/// match of `query`, or None if `query` does not match.
///
/// Every query character must appear in the candidate in the same relative
/// order; gaps are allowed. Each query character takes the earliest position
/// after the previous one. An empty query matches with no positions.
pub fn contains_chars(candidate: &str, query: &str) -> Option<Vec<usize>> {
    let mut positions = Vec::with_capacity(query.chars().count());
    let mut haystack = candidate.chars().enumerate();
    for wanted in query.chars().map(fold) {
        let (index, _) = haystack.by_ref().find(|(_, c)| fold(*c) == wanted)?;
        positions.push(index);
    }
    Some(positions)
}

/// NFC form, so decomposed file names compare equal to typed input.
pub fn normalize(text: &str) -> String {
    text.nfc().collect()
}

fn fold(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}
