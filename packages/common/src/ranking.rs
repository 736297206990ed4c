//! Candidate ranking for encyclopedia title lookups.
//!
//! A query name rarely matches a page title byte-for-byte: search
//! results carry parenthetical disambiguators, diacritics, and
//! disambiguation index pages. Candidates are scored so that an exact
//! canonical match wins, plain titles beat disambiguated ones, and
//! disambiguation pages sink to the bottom.

use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

const EXACT_MATCH_BONUS: i32 = 100;
const PLAIN_TITLE_BONUS: i32 = 10;
const DISAMBIGUATION_PENALTY: i32 = -50;

/// Canonicalizes a name for comparison: NFD decomposition with
/// combining marks dropped, lowercased, restricted to ASCII
/// alphanumerics and Hangul.
pub fn canonicalize(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_alphanumeric() || is_hangul(*c))
        .collect()
}

/// Scores one candidate title against a pre-canonicalized query.
pub fn score_candidate(query_canonical: &str, title: &str) -> i32 {
    let mut score = 0;
    if canonicalize(title) == query_canonical {
        score += EXACT_MATCH_BONUS;
    }
    if !title.contains('(') {
        score += PLAIN_TITLE_BONUS;
    }
    if title.to_lowercase().contains("disambiguation") {
        score += DISAMBIGUATION_PENALTY;
    }
    score
}

/// Builds the ranked candidate list for a query name: the name itself
/// treated as a literal title plus the search results, deduplicated,
/// sorted by descending score. The sort is stable, so ties keep their
/// original priority (literal name first, then search order).
pub fn rank_candidates(name: &str, search_results: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut candidates: Vec<String> = std::iter::once(name.to_string())
        .chain(search_results.iter().cloned())
        .filter(|title| seen.insert(title.clone()))
        .collect();

    let query_canonical = canonicalize(name);
    candidates.sort_by_key(|title| -score_candidate(&query_canonical, title));
    candidates
}

fn is_hangul(c: char) -> bool {
    matches!(c, '\u{AC00}'..='\u{D7A3}' | '\u{1100}'..='\u{11FF}' | '\u{3130}'..='\u{318F}')
}
