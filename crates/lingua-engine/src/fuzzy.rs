//! Fuzzy string matching: score how close two strings are and pick the
//! closest of several choices.
//!
//! Scores are normalized Levenshtein similarity in `0.0..=1.0`, where 1.0
//! means identical. Matching is case-sensitive.

/// Similarity of `x` and `against`. Symmetric.
///
/// ```
/// use lingua_engine::fuzzy::fuzzy_match;
///
/// assert_eq!(fuzzy_match("you and me", "you and me"), 1.0);
/// assert!(fuzzy_match("You", "you") > 0.5);
/// ```
pub fn fuzzy_match(x: &str, against: &str) -> f64 {
    strsim::normalized_levenshtein(x, against)
}

/// The choice closest to `query`, with its score.
///
/// Ties go to the earliest choice. Returns `None` for no choices.
///
/// ```
/// use lingua_engine::fuzzy::match_one;
///
/// let (best, _) = match_one("fran", &["frank", "kate", "harry"]).unwrap();
/// assert_eq!(*best, "frank");
/// ```
pub fn match_one<'a, T: AsRef<str>>(query: &str, choices: &'a [T]) -> Option<(&'a T, f64)> {
    best_match(query, choices.iter().map(|c| (c.as_ref(), c)))
}

/// Like [`match_one`], but compares keys and returns the value of the best
/// key. Pass a `&HashMap` or any iterator of key/value references.
///
/// With an unordered map, which of two equally close keys wins is
/// unspecified.
pub fn match_one_keyed<'a, K, V>(
    query: &str,
    choices: impl IntoIterator<Item = (&'a K, &'a V)>,
) -> Option<(&'a V, f64)>
where
    K: AsRef<str> + 'a,
    V: 'a,
{
    best_match(query, choices.into_iter().map(|(k, v)| (k.as_ref(), v)))
}

fn best_match<'a, V>(query: &str, candidates: impl Iterator<Item = (&'a str, V)>) -> Option<(V, f64)> {
    let mut best: Option<(V, f64)> = None;
    for (key, value) in candidates {
        let score = fuzzy_match(query, key);
        if best.as_ref().is_none_or(|(_, top)| score > *top) {
            best = Some((value, score));
        }
    }
    best
}
