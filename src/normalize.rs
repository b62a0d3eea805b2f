//! Text normalization shared by extraction and matching.
//!
//! Two distinct passes exist because they serve different consumers:
//!
//! - [`preprocess_text`] prepares raw input for span extraction. It keeps
//!   casing (the extraction heuristics depend on it) and only repairs
//!   whitespace and a handful of well-known surface variants.
//! - [`normalize_query`] prepares a string for similarity scoring. It is
//!   aggressive — lowercased, punctuation-stripped — and idempotent.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static RE_NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").unwrap());

static RE_NEW_ZEALAND: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)New-Zealand").unwrap());
static RE_USA: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)U\.S\.A\.?").unwrap());
static RE_UK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)U\.K\.?").unwrap());

/// Compound place names commonly written without spaces, restored to
/// their spaced forms before similarity scoring.
const COMPOUND_VARIANTS: &[(&str, &str)] = &[
    ("new-zealand", "new zealand"),
    ("newyork", "new york"),
    ("losangeles", "los angeles"),
    ("sanfrancisco", "san francisco"),
    ("unitedstates", "united states"),
    ("unitedkingdom", "united kingdom"),
    ("southafrica", "south africa"),
];

/// Prepare raw input text for span extraction.
///
/// Collapses whitespace runs to a single space, trims the ends, and
/// expands well-known abbreviations and hyphenated variants
/// (case-insensitively) so the extraction heuristics see canonical
/// surface forms.
///
/// # Examples
///
/// ```
/// use georesolve::normalize::preprocess_text;
///
/// assert_eq!(preprocess_text("  Weather \t in   U.K. "), "Weather in United Kingdom");
/// assert_eq!(preprocess_text("visit New-Zealand"), "visit New Zealand");
/// ```
#[must_use]
pub fn preprocess_text(text: &str) -> String {
    let mut out = RE_WHITESPACE.replace_all(text, " ").trim().to_string();
    out = RE_NEW_ZEALAND.replace_all(&out, "New Zealand").into_owned();
    out = RE_USA.replace_all(&out, "United States").into_owned();
    out = RE_UK.replace_all(&out, "United Kingdom").into_owned();
    out
}

/// Normalize a display name into its gazetteer key: lowercase + trim.
#[must_use]
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalize a string for similarity scoring.
///
/// Lowercases, strips everything except word characters, whitespace, and
/// hyphens, collapses whitespace, trims, and restores the spaced forms of
/// known compound variants. Idempotent.
///
/// # Examples
///
/// ```
/// use georesolve::normalize::normalize_query;
///
/// assert_eq!(normalize_query("New-Zealand!"), "new zealand");
/// assert_eq!(normalize_query("  NewYork city "), "new york city");
/// ```
#[must_use]
pub fn normalize_query(query: &str) -> String {
    let lowered = query.to_lowercase();
    let stripped = RE_NON_WORD.replace_all(&lowered, "");
    let collapsed = RE_WHITESPACE.replace_all(&stripped, " ");
    let mut out = collapsed.trim().to_string();
    for (variant, spaced) in COMPOUND_VARIANTS {
        if out.contains(variant) {
            out = out.replace(variant, spaced);
        }
    }
    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn normalize_query_is_idempotent(s in "[a-zA-Z0-9 ,.!?-]{0,40}") {
            let once = normalize_query(&s);
            prop_assert_eq!(normalize_query(&once), once);
        }

        #[test]
        fn normalize_query_output_is_clean(s in "\\PC{0,40}") {
            let out = normalize_query(&s);
            prop_assert_eq!(out.trim(), out.as_str());
            prop_assert!(!out.contains("  "));
        }
    }
}
