//! Capitalized-run span tagger.
//!
//! The pure pattern strategy: maximal runs of capitalized tokens (letters
//! and hyphens only) are treated as potential place names. High recall,
//! low precision; the gazetteer matching downstream is what separates
//! "Chennai" from "Thursday" — except for a fixed stop-word set of words
//! that are capitalized for reasons of grammar or chart-label convention,
//! which are dropped here because they would otherwise dominate the
//! candidate list. The stop-word rule applies to this strategy's output
//! only; spans from NER-style taggers are never filtered against it.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::entity::{SpanLabel, TaggedSpan};
use crate::error::Result;
use crate::Tagger;

static RE_CAPITALIZED_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-zA-Z-]+(?:\s+[A-Z][a-zA-Z-]+)*\b").unwrap());

/// Words that match the capitalized-run pattern but are not place names:
/// calendar terms, sentence-grammar words, and chart-label noise.
const STOP_WORDS: &[&str] = &[
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
    "Which",
    "Show",
    "The",
    "This",
    "That",
    "These",
    "Those",
    "And",
    "Or",
    "But",
    "A",
    "An",
    "As",
    "At",
    "By",
    "For",
    "From",
    "In",
    "Into",
    "Of",
    "On",
    "To",
    "With",
    "Without",
    "Graph",
    "Chart",
    "Temperature",
    "Rainfall",
    "Average",
];

/// Pattern-based span tagger over capitalized token runs.
///
/// # Example
///
/// ```
/// use georesolve::{CapitalizedRunTagger, Tagger};
///
/// let tagger = CapitalizedRunTagger::new();
/// let spans = tagger.tag_spans("Rainfall for Chennai in October").unwrap();
/// assert_eq!(spans.len(), 1);
/// assert_eq!(spans[0].text, "Chennai");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CapitalizedRunTagger;

impl CapitalizedRunTagger {
    /// Create a new capitalized-run tagger.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Tagger for CapitalizedRunTagger {
    fn tag_spans(&self, text: &str) -> Result<Vec<TaggedSpan>> {
        Ok(RE_CAPITALIZED_RUN
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|span| !STOP_WORDS.contains(span))
            .map(|span| TaggedSpan::new(span, SpanLabel::Location))
            .collect())
    }

    fn name(&self) -> &'static str {
        "capitalized-runs"
    }

    fn description(&self) -> &'static str {
        "Maximal capitalized token runs, minus calendar/grammar stop words"
    }
}
