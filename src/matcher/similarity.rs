//! Token-sort similarity scoring
//!
//! Names are compared order-insensitively: both sides are lowercased,
//! stripped to alphanumerics, token-sorted and rejoined before a
//! Levenshtein-based ratio is taken. Empty normalized strings never match
//! anything — without that guard, two names that both normalize away to
//! nothing would score a perfect 100.

/// Lowercase, replace non-alphanumerics with spaces, sort tokens, rejoin.
pub fn token_sort_normalize(s: &str) -> String {
    let cleaned: String = s
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Single-row Levenshtein distance.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut current = Vec::with_capacity(b.len() + 1);
        current.push(i + 1);
        for (j, cb) in b.iter().enumerate() {
            let insertions = previous[j + 1] + 1;
            let deletions = current[j] + 1;
            let substitutions = previous[j] + usize::from(ca != cb);
            current.push(insertions.min(deletions).min(substitutions));
        }
        previous = current;
    }
    previous[b.len()]
}

/// Length-normalized similarity in `[0.0, 1.0]`. Empty inputs score 0.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let total = a.chars().count() + b.chars().count();
    let distance = levenshtein_distance(a, b);
    (total - distance) as f64 / total as f64
}

/// Token-order-insensitive similarity between two names, scaled to 0-100.
pub fn token_sort_score(a: &str, b: &str) -> u8 {
    let a = token_sort_normalize(a);
    let b = token_sort_normalize(b);
    (similarity_ratio(&a, &b) * 100.0) as u8
}
