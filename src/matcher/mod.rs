//! Token and fuzzy matching between cleaned channel and stream names
//!
//! Matching runs in two passes over the corpus: a word-boundary exact pass
//! (either name contained whole-word in the other) and a token-sort fuzzy
//! pass against the configured threshold. Both passes always run; a stream
//! qualifies through either. Word-boundary semantics are the load-bearing
//! part — `FX` must never match inside `FXX` or `WFXR`.

pub mod similarity;

use std::collections::HashSet;

use tracing::trace;

use similarity::{token_sort_normalize, token_sort_score};

/// A qualifying stream, identified by its index into the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCandidate {
    /// Index into the corpus passed to `find_matches`
    pub index: usize,
    /// Whole-word containment in either direction
    pub exact: bool,
    /// Token-sort similarity score (0-100)
    pub score: u8,
    /// Stream tokens with no counterpart in the channel name
    pub extraneous: usize,
}

/// Case-insensitive whole-word containment check.
///
/// `needle` matches only where the characters on both sides of the occurrence
/// are non-alphanumeric or the string edge.
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    let hay: Vec<char> = haystack.to_lowercase().chars().collect();
    let ned: Vec<char> = needle.to_lowercase().chars().collect();
    if ned.is_empty() || hay.len() < ned.len() {
        return false;
    }

    for start in 0..=hay.len() - ned.len() {
        if hay[start..start + ned.len()] != ned[..] {
            continue;
        }
        let boundary_before = start == 0 || !hay[start - 1].is_alphanumeric();
        let end = start + ned.len();
        let boundary_after = end == hay.len() || !hay[end].is_alphanumeric();
        if boundary_before && boundary_after {
            return true;
        }
    }
    false
}

/// Finds qualifying streams for a cleaned channel name.
pub struct TokenMatcher {
    threshold: u8,
}

impl TokenMatcher {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    /// Run both passes over the corpus and rank the combined candidates:
    /// exact matches first, then descending score, then fewer extraneous
    /// tokens, then original corpus order.
    pub fn find_matches(&self, channel_name: &str, corpus: &[String]) -> Vec<MatchCandidate> {
        if channel_name.trim().is_empty() {
            return Vec::new();
        }

        let normalized_channel = token_sort_normalize(channel_name);
        let channel_tokens: HashSet<&str> = normalized_channel.split_whitespace().collect();

        let mut candidates = Vec::new();
        for (index, stream_name) in corpus.iter().enumerate() {
            if stream_name.trim().is_empty() {
                continue;
            }

            let exact = contains_word(stream_name, channel_name)
                || contains_word(channel_name, stream_name);
            let score = token_sort_score(channel_name, stream_name);
            if !exact && score < self.threshold {
                continue;
            }

            let extraneous = token_sort_normalize(stream_name)
                .split_whitespace()
                .filter(|token| !channel_tokens.contains(token))
                .count();

            trace!(stream = %stream_name, exact, score, "candidate match");
            candidates.push(MatchCandidate {
                index,
                exact,
                score,
                extraneous,
            });
        }

        candidates.sort_by(|a, b| {
            b.exact
                .cmp(&a.exact)
                .then(b.score.cmp(&a.score))
                .then(a.extraneous.cmp(&b.extraneous))
                .then(a.index.cmp(&b.index))
        });
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_word_boundary_prevents_prefix_matches() {
        // FX is a substring of FXX and WFXR but never a whole word
        assert!(!contains_word("FXX", "FX"));
        assert!(!contains_word("WFXR", "FX"));
        assert!(contains_word("FX Movies", "FX"));
        assert!(contains_word("US: FX", "FX"));
        assert!(contains_word("(FX)", "FX"));
    }

    #[test]
    fn test_callsign_exactness() {
        assert!(contains_word("CBS 4 (KOB) Albuquerque", "KOB"));
        assert!(!contains_word("CBS 5 (KOBI) Medford", "KOB"));
    }

    #[test]
    fn test_exact_pass_finds_whole_word_containment() {
        let matcher = TokenMatcher::new(85);
        let matches = matcher.find_matches("TBS", &corpus(&["TBS", "TBS East", "FXX"]));
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.exact));
        assert_eq!(matches[0].index, 0);
        assert_eq!(matches[1].index, 1);
    }

    #[test]
    fn test_fuzzy_pass_respects_threshold() {
        let matcher = TokenMatcher::new(85);
        // fx vs fxx scores 80: below threshold and not word-bounded
        assert!(matcher.find_matches("FX", &corpus(&["FXX"])).is_empty());

        let relaxed = TokenMatcher::new(60);
        let matches = relaxed.find_matches("FX", &corpus(&["FXX"]));
        assert_eq!(matches.len(), 1);
        assert!(!matches[0].exact);
    }

    #[test]
    fn test_candidate_ordering() {
        let matcher = TokenMatcher::new(70);
        let matches = matcher.find_matches(
            "Discovery Science",
            &corpus(&[
                "Discovery Science Extra Feed",
                "Discovery Science",
                "Science Discovery",
            ]),
        );
        // Exact containment outranks the reordered-token fuzzy hit, and the
        // shorter exact match outranks the one with extraneous tokens
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].index, 1);
        assert!(matches[0].exact);
        assert_eq!(matches[1].index, 0);
        assert_eq!(matches[2].index, 2);
        assert!(!matches[2].exact);
        assert_eq!(matches[2].score, 100);
    }

    #[test]
    fn test_empty_channel_name_matches_nothing() {
        let matcher = TokenMatcher::new(85);
        assert!(matcher.find_matches("", &corpus(&["TBS"])).is_empty());
        assert!(matcher.find_matches("  ", &corpus(&["TBS"])).is_empty());
    }

    #[test]
    fn test_empty_stream_names_are_skipped() {
        let matcher = TokenMatcher::new(85);
        assert!(matcher.find_matches("TBS", &corpus(&["", "  "])).is_empty());
    }
}
