//! # georesolve
//!
//! Fuzzy place-name resolution for Rust.
//!
//! Resolves free-text mentions of place names to canonical geographic
//! entities (city, country, state/region) from a reference gazetteer,
//! tolerating misspellings and formatting variants:
//!
//! ```text
//! raw text ──► candidate extraction ──► per-category fuzzy matching ──► ranked entities
//!              (pluggable taggers)      (4 similarity algorithms)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use georesolve::{GazetteerIndex, GazetteerRow, Resolver};
//!
//! let index = GazetteerIndex::from_rows([GazetteerRow {
//!     city: Some("Mumbai".into()),
//!     country: Some("India".into()),
//!     admin_region: Some("Maharashtra".into()),
//! }])?;
//!
//! let resolver = Resolver::new(index);
//! let places = resolver.process("What is the weather like in Mumbay?");
//!
//! assert_eq!(places[0].canonical_name, "Mumbai");
//! assert!(places[0].confidence_score >= 80.0);
//! # Ok::<(), georesolve::Error>(())
//! ```
//!
//! ## Extraction Strategies
//!
//! | Strategy | Kind | Notes |
//! |----------|------|-------|
//! | external NER | pluggable | any [`Tagger`] impl; output filtered to geographic labels |
//! | [`ContextTagger`] | built-in | capitalization + preposition/list context |
//! | [`CapitalizedRunTagger`] | built-in | pattern over capitalized runs, stop-word filtered |
//!
//! Strategies are composed through [`CandidateExtractor::builder`]; their
//! combined output is deduplicated preserving first-seen order.
//!
//! ## Matching
//!
//! Every candidate span is scored against each gazetteer category with
//! four complementary algorithms (see [`Algorithm`]); per category only
//! the best algorithm's result survives, and per span the categories are
//! ranked by score. A shared, atomically-updatable threshold (default
//! 80) gates what qualifies — see [`Resolver::set_threshold`].
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! georesolve = "0.2"                                     # full, CSV ingest included
//! georesolve = { version = "0.2", default-features = false }  # rows supplied by caller
//! ```

#![warn(missing_docs)]

mod entity;
mod error;
mod resolver;

pub mod extract;
pub mod gazetteer;
#[cfg(feature = "ingest")]
pub mod ingest;
pub mod normalize;
pub mod similarity;

pub use entity::{
    Algorithm, CandidateSpan, Category, MatchCandidate, ResolvedEntity, SpanLabel, TaggedSpan,
};
pub use error::{Error, Result};
pub use extract::{
    CandidateExtractor, CandidateExtractorBuilder, CapitalizedRunTagger, ContextTagger,
};
pub use gazetteer::{GazetteerIndex, GazetteerRow, GazetteerStats};
pub use resolver::{DetailedResolution, Resolver, ResolverBuilder, DEFAULT_THRESHOLD};

/// Trait for span tagger backends (extraction strategies).
///
/// A tagger takes preprocessed text and returns the spans it believes
/// name something, each with a label. Taggers do not filter by label —
/// the [`CandidateExtractor`] keeps only geographic labels itself — and
/// they do not deduplicate across strategies.
///
/// Unlike a fixed backend registry, this trait is open: external NER
/// providers (an ONNX model wrapper, a remote service client) implement
/// it and join the stack through [`CandidateExtractor::builder`].
pub trait Tagger: Send + Sync {
    /// Tag candidate spans in the given text.
    ///
    /// # Errors
    ///
    /// Backends may fail (model unavailable, transport error); the
    /// extractor logs and skips a failing strategy rather than aborting
    /// the pipeline.
    fn tag_spans(&self, text: &str) -> Result<Vec<TaggedSpan>>;

    /// Short identifier for this tagger, used in logs.
    fn name(&self) -> &'static str;

    /// Whether the tagger is ready to use.
    fn is_available(&self) -> bool {
        true
    }

    /// Human-readable description of the tagger.
    fn description(&self) -> &'static str {
        "Unknown span tagger"
    }
}

/// A mock tagger for testing strategy composition.
///
/// Returns a fixed span list regardless of input, or an error when
/// configured as failing.
///
/// # Example
///
/// ```rust
/// use georesolve::{MockTagger, SpanLabel, TaggedSpan, Tagger};
///
/// let tagger = MockTagger::new("test-ner")
///     .with_spans(vec![TaggedSpan::new("Chennai", SpanLabel::Geopolitical)]);
///
/// let spans = tagger.tag_spans("anything at all").unwrap();
/// assert_eq!(spans.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockTagger {
    name: &'static str,
    spans: Vec<TaggedSpan>,
    fail: bool,
}

impl MockTagger {
    /// Create a mock tagger with the given name and no spans.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            spans: Vec::new(),
            fail: false,
        }
    }

    /// Set the spans every [`Tagger::tag_spans`] call returns.
    #[must_use]
    pub fn with_spans(mut self, spans: Vec<TaggedSpan>) -> Self {
        self.spans = spans;
        self
    }

    /// Make every [`Tagger::tag_spans`] call fail.
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl Tagger for MockTagger {
    fn tag_spans(&self, _text: &str) -> Result<Vec<TaggedSpan>> {
        if self.fail {
            return Err(Error::tagger(format!("{} is configured to fail", self.name)));
        }
        Ok(self.spans.clone())
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        "Mock tagger returning a fixed span list"
    }
}
