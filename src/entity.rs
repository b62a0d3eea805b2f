//! Entity categories and match structures for place-name resolution.

use serde::{Deserialize, Serialize};

/// Geographic entity category.
///
/// Matches the three tables of a worldcities-style gazetteer. The string
/// tags ("City" | "Country" | "State") are part of the stable output
/// contract rendered by downstream UIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// City or populated place.
    City,
    /// Country.
    Country,
    /// State, province, or other first-level administrative region.
    State,
}

impl Category {
    /// All categories, in the fixed query order City → Country → State.
    ///
    /// Cross-category ranking sorts by score but is stable, so equal scores
    /// keep this order.
    pub const ALL: [Category; 3] = [Category::City, Category::Country, Category::State];

    /// Convert to the stable output tag.
    #[must_use]
    pub fn as_label(&self) -> &'static str {
        match self {
            Category::City => "City",
            Category::Country => "Country",
            Category::State => "State",
        }
    }

    /// Parse from an output tag, case-insensitively.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "city" => Some(Category::City),
            "country" => Some(Category::Country),
            "state" => Some(Category::State),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

/// String-similarity algorithm used to score a match.
///
/// The four algorithms are complementary, not interchangeable: each
/// captures a different error mode, and resolution evaluates all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Normalized edit-distance similarity over the full strings.
    /// Captures near-exact typos ("mumbay" → "mumbai").
    Ratio,
    /// Best-aligning-substring similarity. Captures queries that contain
    /// the candidate plus extra material, or vice versa.
    PartialRatio,
    /// [`Ratio`](Algorithm::Ratio) after sorting whitespace tokens.
    /// Captures word-order variation ("york new" → "new york").
    TokenSort,
    /// Set-decomposed token similarity. Captures extra or missing words
    /// without penalizing order or repetition.
    TokenSet,
}

impl Algorithm {
    /// Fixed evaluation order. When two algorithms tie on score, the one
    /// earlier in this sequence wins.
    pub const EVAL_ORDER: [Algorithm; 4] = [
        Algorithm::Ratio,
        Algorithm::PartialRatio,
        Algorithm::TokenSort,
        Algorithm::TokenSet,
    ];

    /// Convert to the stable output tag.
    #[must_use]
    pub fn as_label(&self) -> &'static str {
        match self {
            Algorithm::Ratio => "ratio",
            Algorithm::PartialRatio => "partial_ratio",
            Algorithm::TokenSort => "token_sort",
            Algorithm::TokenSet => "token_set",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

/// Label attached to a span by a tagger backend.
///
/// Providers emit label strings in their own conventions (spaCy-style
/// `GPE`, CoNLL-style `LOC`/`LOCATION`); [`SpanLabel::from_label`] folds
/// those into the two geographic kinds the pipeline cares about. The
/// extractor, not the provider, decides which labels survive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SpanLabel {
    /// Geopolitical entity (countries, cities, states).
    Geopolitical,
    /// Non-political location (mountains, rivers, regions).
    Location,
    /// Any other label. Preserved verbatim for diagnostics.
    Other(String),
}

impl SpanLabel {
    /// Parse from a provider label string.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_uppercase().as_str() {
            "GPE" | "B-GPE" | "I-GPE" => SpanLabel::Geopolitical,
            "LOC" | "LOCATION" | "B-LOC" | "I-LOC" => SpanLabel::Location,
            other => SpanLabel::Other(other.to_string()),
        }
    }

    /// Whether this label denotes a geographic entity.
    #[must_use]
    pub fn is_geographic(&self) -> bool {
        matches!(self, SpanLabel::Geopolitical | SpanLabel::Location)
    }
}

/// A span of text a tagger believes names something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedSpan {
    /// Surface text of the span.
    pub text: String,
    /// The label the tagger assigned.
    pub label: SpanLabel,
}

impl TaggedSpan {
    /// Create a tagged span.
    #[must_use]
    pub fn new(text: impl Into<String>, label: SpanLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// A deduplicated candidate place-name span emitted by the extractor.
///
/// `text` is non-empty after trimming. `source_order` is the first-seen
/// position across all extraction strategies; duplicate spans (exact
/// case-sensitive match on the trimmed text) collapse to the first
/// occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateSpan {
    /// Trimmed surface text of the span.
    pub text: String,
    /// First-seen position across all strategies, starting at 0.
    pub source_order: usize,
}

/// One qualifying match between a candidate span and a gazetteer entry.
///
/// Produced transiently per (span, category) query; not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// Category of the matched gazetteer entry.
    pub category: Category,
    /// The normalized gazetteer key that matched.
    pub matched_key: String,
    /// Display form of the matched entry, original casing preserved.
    pub canonical_name: String,
    /// Similarity score in [0, 100]; 100 means identical after
    /// normalization.
    pub score: f64,
    /// The algorithm that produced the score.
    pub algorithm: Algorithm,
}

/// A resolved geographic entity — the stable output contract rendered by
/// downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedEntity {
    /// The originating candidate span, as extracted.
    pub token: String,
    /// Canonical display name from the gazetteer.
    pub canonical_name: String,
    /// Category of the winning match.
    pub category: Category,
    /// Similarity score of the winning match, in [0, 100].
    pub confidence_score: f64,
    /// The algorithm that produced the winning score.
    pub algorithm_used: Algorithm,
}

impl ResolvedEntity {
    /// Build a resolved entity from a winning match candidate.
    #[must_use]
    pub fn from_match(token: impl Into<String>, candidate: MatchCandidate) -> Self {
        Self {
            token: token.into(),
            canonical_name: candidate.canonical_name,
            category: candidate.category,
            confidence_score: candidate.score,
            algorithm_used: candidate.algorithm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_label_roundtrip() {
        for c in Category::ALL {
            assert_eq!(Category::from_label(c.as_label()), Some(c));
        }
        assert_eq!(Category::from_label("COUNTRY"), Some(Category::Country));
        assert_eq!(Category::from_label("continent"), None);
    }

    #[test]
    fn algorithm_eval_order_is_fixed() {
        assert_eq!(Algorithm::EVAL_ORDER[0], Algorithm::Ratio);
        assert_eq!(Algorithm::EVAL_ORDER[3], Algorithm::TokenSet);
    }

    #[test]
    fn span_label_parsing() {
        assert_eq!(SpanLabel::from_label("GPE"), SpanLabel::Geopolitical);
        assert_eq!(SpanLabel::from_label("gpe"), SpanLabel::Geopolitical);
        assert_eq!(SpanLabel::from_label("LOCATION"), SpanLabel::Location);
        assert_eq!(SpanLabel::from_label("B-LOC"), SpanLabel::Location);
        assert!(!SpanLabel::from_label("PERSON").is_geographic());
        assert!(SpanLabel::from_label("loc").is_geographic());
    }

    #[test]
    fn serialized_tags_are_stable() {
        let entity = ResolvedEntity {
            token: "mumbai".into(),
            canonical_name: "Mumbai".into(),
            category: Category::City,
            confidence_score: 100.0,
            algorithm_used: Algorithm::Ratio,
        };
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["category"], "City");
        assert_eq!(json["algorithm_used"], "ratio");
        assert_eq!(json["canonical_name"], "Mumbai");
    }

    #[test]
    fn partial_ratio_tag() {
        let json = serde_json::to_value(Algorithm::PartialRatio).unwrap();
        assert_eq!(json, "partial_ratio");
    }
}
