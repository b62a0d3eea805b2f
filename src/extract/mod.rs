//! Candidate span extraction.
//!
//! Combines independent extraction strategies into one deduplicated,
//! order-preserving candidate list:
//!
//! ```text
//! raw text
//!    │ preprocess (whitespace, known variants)
//!    ▼
//! ┌─────────────────────────────────────────────┐
//! │ strategy 1: external NER (optional)         │──┐
//! ├─────────────────────────────────────────────┤  │  geographic-label
//! │ strategy 2: ContextTagger (second opinion)  │──┼─ filter, trim,
//! ├─────────────────────────────────────────────┤  │  first-seen dedup
//! │ strategy 3: CapitalizedRunTagger (pattern)  │──┘
//! └─────────────────────────────────────────────┘
//!    ▼
//! Vec<CandidateSpan>  (source order preserved)
//! ```
//!
//! Strategies run in order; earlier strategies claim a span's position.
//! Each strategy is optional — an unavailable or failing tagger is skipped
//! with a warning, and an empty union is an empty result, not an error.

pub mod capitalized;
pub mod context;

pub use capitalized::CapitalizedRunTagger;
pub use context::ContextTagger;

use std::collections::HashSet;

use crate::entity::CandidateSpan;
use crate::normalize::preprocess_text;
use crate::Tagger;

/// Ordered stack of extraction strategies with first-seen deduplication.
///
/// The default stack is [`ContextTagger`] followed by
/// [`CapitalizedRunTagger`]. External NER providers are added through the
/// builder and their output is filtered to geographic labels here, not in
/// the provider.
///
/// # Example
///
/// ```
/// use georesolve::CandidateExtractor;
///
/// let extractor = CandidateExtractor::default();
/// let spans = extractor.extract("Rainfall for Chennai in October");
/// assert_eq!(spans.len(), 1);
/// assert_eq!(spans[0].text, "Chennai");
/// assert_eq!(spans[0].source_order, 0);
/// ```
pub struct CandidateExtractor {
    strategies: Vec<Box<dyn Tagger>>,
}

impl Default for CandidateExtractor {
    fn default() -> Self {
        Self::builder()
            .strategy(ContextTagger::new())
            .strategy(CapitalizedRunTagger::new())
            .build()
    }
}

impl CandidateExtractor {
    /// Start building a custom strategy stack.
    #[must_use]
    pub fn builder() -> CandidateExtractorBuilder {
        CandidateExtractorBuilder::default()
    }

    /// Extract candidate place-name spans from raw text.
    ///
    /// The text is preprocessed first (whitespace collapse, known variant
    /// expansion), then every available strategy runs in order. Spans with
    /// non-geographic labels are dropped; the rest are trimmed and
    /// deduplicated by exact string match, first occurrence winning.
    ///
    /// Returns an empty vec — never an error — when nothing is found or
    /// every strategy fails.
    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<CandidateSpan> {
        let prepared = preprocess_text(text);
        if prepared.is_empty() {
            return Vec::new();
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut spans: Vec<CandidateSpan> = Vec::new();

        for strategy in &self.strategies {
            if !strategy.is_available() {
                continue;
            }
            let tagged = match strategy.tag_spans(&prepared) {
                Ok(tagged) => tagged,
                Err(err) => {
                    log::warn!("tagger {} failed, skipping: {err}", strategy.name());
                    continue;
                }
            };
            for span in tagged {
                if !span.label.is_geographic() {
                    continue;
                }
                let trimmed = span.text.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if seen.insert(trimmed.to_string()) {
                    spans.push(CandidateSpan {
                        text: trimmed.to_string(),
                        source_order: spans.len(),
                    });
                }
            }
        }
        spans
    }

    /// Names of the configured strategies, in execution order.
    #[must_use]
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }
}

/// Builder for [`CandidateExtractor`] with fluent configuration.
#[derive(Default)]
pub struct CandidateExtractorBuilder {
    strategies: Vec<Box<dyn Tagger>>,
}

impl CandidateExtractorBuilder {
    /// Add a strategy (order matters: earlier strategies claim span
    /// positions first).
    #[must_use]
    pub fn strategy<T: Tagger + 'static>(mut self, tagger: T) -> Self {
        self.strategies.push(Box::new(tagger));
        self
    }

    /// Add a boxed strategy.
    #[must_use]
    pub fn strategy_boxed(mut self, tagger: Box<dyn Tagger>) -> Self {
        self.strategies.push(tagger);
        self
    }

    /// Build the configured extractor.
    #[must_use]
    pub fn build(self) -> CandidateExtractor {
        CandidateExtractor {
            strategies: self.strategies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{SpanLabel, TaggedSpan};
    use crate::MockTagger;

    fn texts(spans: &[CandidateSpan]) -> Vec<&str> {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn duplicate_spans_collapse_to_first_position() {
        let extractor = CandidateExtractor::default();
        let spans = extractor.extract("visiting Mumbai and Delhi and Mumbai again");
        assert_eq!(texts(&spans), vec!["Mumbai", "Delhi"]);
        assert_eq!(spans[0].source_order, 0);
        assert_eq!(spans[1].source_order, 1);
    }

    #[test]
    fn empty_and_punctuation_input() {
        let extractor = CandidateExtractor::default();
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("   \t  ").is_empty());
        assert!(extractor.extract("?!.,;").is_empty());
    }

    #[test]
    fn preprocessing_expands_variants_before_extraction() {
        let extractor = CandidateExtractor::default();
        let spans = extractor.extract("a trip to New-Zealand");
        assert_eq!(texts(&spans), vec!["New Zealand"]);
    }

    #[test]
    fn non_geographic_labels_are_filtered() {
        let extractor = CandidateExtractor::builder()
            .strategy(
                MockTagger::new("mock-ner").with_spans(vec![
                    TaggedSpan::new("Einstein", SpanLabel::Other("PERSON".into())),
                    TaggedSpan::new("Zurich", SpanLabel::Geopolitical),
                ]),
            )
            .build();
        let spans = extractor.extract("Einstein lived in Zurich");
        assert_eq!(texts(&spans), vec!["Zurich"]);
    }

    #[test]
    fn earlier_strategy_claims_position() {
        let extractor = CandidateExtractor::builder()
            .strategy(
                MockTagger::new("mock-ner")
                    .with_spans(vec![TaggedSpan::new("Delhi", SpanLabel::Geopolitical)]),
            )
            .strategy(CapitalizedRunTagger::new())
            .build();
        let spans = extractor.extract("is Mumbai hotter than Delhi");
        assert_eq!(texts(&spans), vec!["Delhi", "Mumbai"]);
    }

    #[test]
    fn failing_strategy_is_skipped() {
        let extractor = CandidateExtractor::builder()
            .strategy(MockTagger::new("broken-ner").failing())
            .strategy(CapitalizedRunTagger::new())
            .build();
        let spans = extractor.extract("weather in Chennai");
        assert_eq!(texts(&spans), vec!["Chennai"]);
    }

    #[test]
    fn no_strategies_yield_empty() {
        let extractor = CandidateExtractor::builder().build();
        assert!(extractor.extract("weather in Chennai").is_empty());
    }

    #[test]
    fn strategy_names_in_order() {
        let extractor = CandidateExtractor::default();
        assert_eq!(extractor.strategy_names(), vec!["context", "capitalized-runs"]);
    }

    #[test]
    fn spans_are_trimmed() {
        let extractor = CandidateExtractor::builder()
            .strategy(
                MockTagger::new("mock-ner")
                    .with_spans(vec![TaggedSpan::new("  Chennai ", SpanLabel::Location)]),
            )
            .build();
        let spans = extractor.extract("anything");
        assert_eq!(texts(&spans), vec!["Chennai"]);
    }
}
