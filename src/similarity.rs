//! String similarity scoring for gazetteer matching.
//!
//! Four complementary ratios, each in [0, 100], built on a normalized
//! edit-distance kernel:
//!
//! | Ratio | Catches |
//! |-------|---------|
//! | [`ratio`] | near-exact typos ("mumbay" → "mumbai") |
//! | [`partial_ratio`] | substring/superstring queries |
//! | [`token_sort_ratio`] | word-order variation |
//! | [`token_set_ratio`] | extra or missing words |
//!
//! The public entry points normalize both inputs via
//! [`normalize_query`](crate::normalize::normalize_query) before scoring.
//! The `*_of` search functions instead take pre-normalized gazetteer keys
//! and normalize only the query, once.

use std::collections::BTreeSet;

use crate::entity::Algorithm;
use crate::normalize::normalize_query;

/// Edit-distance similarity over the full strings, in [0, 100].
///
/// # Examples
///
/// ```
/// use georesolve::similarity::ratio;
///
/// assert!((ratio("Mumbai", "mumbai") - 100.0).abs() < 1e-9);
/// assert!(ratio("mumbay", "mumbai") > 80.0);
/// ```
#[must_use]
pub fn ratio(a: &str, b: &str) -> f64 {
    ratio_normalized(&normalize_query(a), &normalize_query(b))
}

/// Best-aligning-substring similarity, in [0, 100].
///
/// Slides the shorter string across the longer one and keeps the best
/// window score. Equal-length inputs degenerate to [`ratio`].
///
/// # Examples
///
/// ```
/// use georesolve::similarity::partial_ratio;
///
/// assert!((partial_ratio("york", "new york") - 100.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    partial_ratio_normalized(&normalize_query(a), &normalize_query(b))
}

/// [`ratio`] after splitting into whitespace tokens, sorting them, and
/// rejoining.
///
/// # Examples
///
/// ```
/// use georesolve::similarity::token_sort_ratio;
///
/// assert!((token_sort_ratio("york new", "new york") - 100.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    token_sort_ratio_normalized(&normalize_query(a), &normalize_query(b))
}

/// Set-decomposed token similarity, in [0, 100].
///
/// Scores the sorted token intersection against each side's full token
/// set and keeps the best pairing, so shared words dominate and extras
/// are forgiven.
///
/// # Examples
///
/// ```
/// use georesolve::similarity::token_set_ratio;
///
/// assert!(token_set_ratio("new york city", "new york") > 85.0);
/// assert!(token_set_ratio("london", "paris") < 40.0);
/// ```
#[must_use]
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    token_set_ratio_normalized(&normalize_query(a), &normalize_query(b))
}

/// Score a query/candidate pair with the given algorithm, normalizing
/// both inputs first.
#[must_use]
pub fn score(algorithm: Algorithm, query: &str, candidate: &str) -> f64 {
    score_normalized(algorithm, &normalize_query(query), &normalize_query(candidate))
}

/// Score two already-normalized strings with the given algorithm.
pub(crate) fn score_normalized(algorithm: Algorithm, a: &str, b: &str) -> f64 {
    match algorithm {
        Algorithm::Ratio => ratio_normalized(a, b),
        Algorithm::PartialRatio => partial_ratio_normalized(a, b),
        Algorithm::TokenSort => token_sort_ratio_normalized(a, b),
        Algorithm::TokenSet => token_set_ratio_normalized(a, b),
    }
}

/// Find the single name maximizing one algorithm's score.
///
/// `query` is normalized once; `names` must already be normalized
/// gazetteer keys. Ties keep the earlier name, so a sorted key list makes
/// the result deterministic. Returns `None` when either side is empty.
#[must_use]
pub fn best_match<'a>(
    query: &str,
    names: &'a [String],
    algorithm: Algorithm,
) -> Option<(&'a str, f64)> {
    let query = normalize_query(query);
    best_match_normalized(&query, names, algorithm)
}

pub(crate) fn best_match_normalized<'a>(
    query: &str,
    names: &'a [String],
    algorithm: Algorithm,
) -> Option<(&'a str, f64)> {
    if query.is_empty() {
        return None;
    }
    let mut best: Option<(&'a str, f64)> = None;
    for name in names {
        let s = score_normalized(algorithm, query, name);
        if best.map_or(true, |(_, b)| s > b) {
            best = Some((name.as_str(), s));
            if s >= 100.0 {
                break;
            }
        }
    }
    best
}

/// Best-of search across all four algorithms.
///
/// For each algorithm in [`Algorithm::EVAL_ORDER`], finds the single name
/// maximizing that algorithm's score and retains it only if the maximum
/// meets the threshold. `names` must already be normalized keys.
#[must_use]
pub fn best_of<'a>(
    query: &str,
    names: &'a [String],
    threshold: f64,
) -> Vec<(Algorithm, &'a str, f64)> {
    let query = normalize_query(query);
    best_of_normalized(&query, names, threshold)
}

pub(crate) fn best_of_normalized<'a>(
    query: &str,
    names: &'a [String],
    threshold: f64,
) -> Vec<(Algorithm, &'a str, f64)> {
    let mut out = Vec::new();
    for algorithm in Algorithm::EVAL_ORDER {
        if let Some((name, s)) = best_match_normalized(query, names, algorithm) {
            if s >= threshold {
                out.push((algorithm, name, s));
            }
        }
    }
    out
}

fn ratio_normalized(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b) * 100.0
}

fn partial_ratio_normalized(a: &str, b: &str) -> f64 {
    if a == b {
        return 100.0;
    }
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    if short.is_empty() {
        return 0.0;
    }
    let window = short.chars().count();
    let long_chars: Vec<char> = long.chars().collect();
    if window == long_chars.len() {
        return ratio_normalized(short, long);
    }
    let mut best = 0.0_f64;
    for start in 0..=long_chars.len() - window {
        let slice: String = long_chars[start..start + window].iter().collect();
        let s = ratio_normalized(short, &slice);
        if s > best {
            best = s;
            if best >= 100.0 {
                break;
            }
        }
    }
    best
}

fn token_sort_ratio_normalized(a: &str, b: &str) -> f64 {
    ratio_normalized(&sorted_tokens(a), &sorted_tokens(b))
}

fn token_set_ratio_normalized(a: &str, b: &str) -> f64 {
    let set_a: BTreeSet<&str> = a.split_whitespace().collect();
    let set_b: BTreeSet<&str> = b.split_whitespace().collect();

    let intersection = join_tokens(set_a.intersection(&set_b).copied());
    let only_a = join_tokens(set_a.difference(&set_b).copied());
    let only_b = join_tokens(set_b.difference(&set_a).copied());

    let combined_a = join_nonempty(&intersection, &only_a);
    let combined_b = join_nonempty(&intersection, &only_b);

    ratio_normalized(&intersection, &combined_a)
        .max(ratio_normalized(&intersection, &combined_b))
        .max(ratio_normalized(&combined_a, &combined_b))
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn join_tokens<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
    tokens.collect::<Vec<_>>().join(" ")
}

fn join_nonempty(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        (false, false) => format!("{head} {tail}"),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn ratio_of_string_with_itself_is_100(s in "[a-z][a-z ]{0,24}") {
            prop_assert!((ratio(&s, &s) - 100.0).abs() < 1e-9);
        }

        #[test]
        fn all_scores_bounded(a in "[a-zA-Z -]{0,24}", b in "[a-zA-Z -]{0,24}") {
            for algorithm in Algorithm::EVAL_ORDER {
                let s = score(algorithm, &a, &b);
                prop_assert!((0.0..=100.0).contains(&s));
            }
        }

        #[test]
        fn scores_are_symmetric_for_ratio(a in "[a-z ]{0,16}", b in "[a-z ]{0,16}") {
            prop_assert!((ratio(&a, &b) - ratio(&b, &a)).abs() < 1e-9);
        }
    }
}
