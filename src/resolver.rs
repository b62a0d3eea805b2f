//! Cross-category match resolution and the top-level pipeline.
//!
//! A [`Resolver`] owns the shared gazetteer index, the candidate
//! extractor, and the matching threshold. Each resolution call is
//! stateless given those: the index is immutable, and the threshold is
//! snapshot-read once per call, so concurrent callers may race a
//! [`Resolver::set_threshold`] and observe either value — never a torn
//! one.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;

use crate::entity::{Algorithm, Category, MatchCandidate, ResolvedEntity};
use crate::error::{Error, Result};
use crate::extract::CandidateExtractor;
use crate::gazetteer::GazetteerIndex;
use crate::normalize::normalize_query;
use crate::similarity;

/// Default matching threshold.
pub const DEFAULT_THRESHOLD: f64 = 80.0;

/// A span's winning entity together with its full match breakdown, as
/// returned by [`Resolver::process_detailed`].
#[derive(Debug, Clone, PartialEq)]
pub struct DetailedResolution {
    /// The winning match for the span.
    pub entity: ResolvedEntity,
    /// Every qualifying (category, algorithm) match, ranked by score.
    pub matches: Vec<MatchCandidate>,
}

/// Resolves candidate text against the gazetteer, one query per category.
///
/// Shareable across threads: wrap in an [`Arc`] and resolve from as many
/// readers as needed.
///
/// # Example
///
/// ```
/// use georesolve::{Category, GazetteerIndex, GazetteerRow, Resolver};
///
/// let index = GazetteerIndex::from_rows([GazetteerRow {
///     city: Some("Delhi".into()),
///     country: Some("India".into()),
///     admin_region: None,
/// }])?;
/// let resolver = Resolver::new(index);
///
/// let matches = resolver.resolve("deli");
/// assert_eq!(matches[0].category, Category::City);
/// assert_eq!(matches[0].canonical_name, "Delhi");
/// # Ok::<(), georesolve::Error>(())
/// ```
pub struct Resolver {
    index: Arc<GazetteerIndex>,
    extractor: CandidateExtractor,
    /// Threshold stored as f64 bits; see [`Resolver::set_threshold`].
    threshold: AtomicU64,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("index", &self.index)
            .field(
                "threshold",
                &f64::from_bits(self.threshold.load(AtomicOrdering::Relaxed)),
            )
            .finish_non_exhaustive()
    }
}

impl Resolver {
    /// Create a resolver with the default extractor stack and threshold.
    #[must_use]
    pub fn new(index: GazetteerIndex) -> Self {
        Self {
            index: Arc::new(index),
            extractor: CandidateExtractor::default(),
            threshold: AtomicU64::new(DEFAULT_THRESHOLD.to_bits()),
        }
    }

    /// Start building a resolver with custom configuration.
    #[must_use]
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::default()
    }

    /// The shared gazetteer index.
    #[must_use]
    pub fn index(&self) -> &GazetteerIndex {
        &self.index
    }

    /// Current matching threshold.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        f64::from_bits(self.threshold.load(AtomicOrdering::Relaxed))
    }

    /// Set the matching threshold, clamped to [0, 100].
    ///
    /// The store is atomic: resolutions already in flight may finish with
    /// the previous value, but no call ever observes a torn value. NaN is
    /// ignored.
    pub fn set_threshold(&self, value: f64) {
        if value.is_nan() {
            return;
        }
        let clamped = value.clamp(0.0, 100.0);
        self.threshold.store(clamped.to_bits(), AtomicOrdering::Relaxed);
    }

    /// Match one candidate text against every category, keeping at most
    /// one match per category.
    ///
    /// Per category, the four algorithms each nominate their best entry;
    /// only the highest-scoring nomination survives (ties go to the
    /// algorithm earliest in [`Algorithm::EVAL_ORDER`]). The per-category
    /// winners are returned sorted descending by score; the sort is
    /// stable, so equal scores keep [`Category::ALL`] order. An empty
    /// category contributes nothing and is not an error.
    #[must_use]
    pub fn resolve(&self, candidate_text: &str) -> Vec<MatchCandidate> {
        let threshold = self.threshold();
        let query = normalize_query(candidate_text);
        if query.is_empty() {
            return Vec::new();
        }
        let mut matches: Vec<MatchCandidate> = Category::ALL
            .iter()
            .filter_map(|&category| self.best_for_category(&query, category, threshold))
            .collect();
        sort_by_score(&mut matches);
        matches
    }

    /// Match one candidate text, keeping every qualifying (category,
    /// algorithm) result instead of collapsing to one per category.
    #[must_use]
    pub fn resolve_detailed(&self, candidate_text: &str) -> Vec<MatchCandidate> {
        let threshold = self.threshold();
        let query = normalize_query(candidate_text);
        if query.is_empty() {
            return Vec::new();
        }
        let mut matches = Vec::new();
        for category in Category::ALL {
            let names = self.index.names(category);
            for (algorithm, key, score) in similarity::best_of_normalized(&query, names, threshold)
            {
                matches.push(self.make_candidate(category, key, score, algorithm));
            }
        }
        sort_by_score(&mut matches);
        matches
    }

    /// The single best entity for a candidate text, if any cleared the
    /// threshold.
    #[must_use]
    pub fn resolve_best(&self, candidate_text: &str) -> Option<ResolvedEntity> {
        self.resolve(candidate_text)
            .into_iter()
            .next()
            .map(|m| ResolvedEntity::from_match(candidate_text, m))
    }

    /// Full pipeline: extract candidate spans from raw text and resolve
    /// each one.
    ///
    /// Output order follows span source order, not score. Spans that
    /// produce no qualifying match are silently dropped; malformed input
    /// yields an empty list, not an error.
    #[must_use]
    pub fn process(&self, text: &str) -> Vec<ResolvedEntity> {
        self.extractor
            .extract(text)
            .iter()
            .filter_map(|span| self.resolve_best(&span.text))
            .collect()
    }

    /// Full pipeline with the per-span match breakdown attached.
    #[must_use]
    pub fn process_detailed(&self, text: &str) -> Vec<DetailedResolution> {
        self.extractor
            .extract(text)
            .iter()
            .filter_map(|span| {
                let entity = self.resolve_best(&span.text)?;
                Some(DetailedResolution {
                    entity,
                    matches: self.resolve_detailed(&span.text),
                })
            })
            .collect()
    }

    fn best_for_category(
        &self,
        query: &str,
        category: Category,
        threshold: f64,
    ) -> Option<MatchCandidate> {
        let names = self.index.names(category);
        if names.is_empty() {
            return None;
        }
        let mut best: Option<MatchCandidate> = None;
        for algorithm in Algorithm::EVAL_ORDER {
            let Some((key, score)) = similarity::best_match_normalized(query, names, algorithm)
            else {
                continue;
            };
            if score < threshold {
                continue;
            }
            // Strict comparison: the first algorithm to reach a score
            // keeps it on ties.
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(self.make_candidate(category, key, score, algorithm));
            }
        }
        best
    }

    fn make_candidate(
        &self,
        category: Category,
        key: &str,
        score: f64,
        algorithm: Algorithm,
    ) -> MatchCandidate {
        let canonical_name = self
            .index
            .display_name(category, key)
            .unwrap_or(key)
            .to_string();
        MatchCandidate {
            category,
            matched_key: key.to_string(),
            canonical_name,
            score,
            algorithm,
        }
    }
}

fn sort_by_score(matches: &mut [MatchCandidate]) {
    // Stable sort: equal scores keep category evaluation order.
    matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}

/// Builder for [`Resolver`] with fluent configuration.
///
/// # Example
///
/// ```
/// use georesolve::{CandidateExtractor, CapitalizedRunTagger, GazetteerIndex, GazetteerRow, Resolver};
///
/// let index = GazetteerIndex::from_rows([GazetteerRow {
///     city: Some("Chennai".into()),
///     country: Some("India".into()),
///     admin_region: None,
/// }])?;
///
/// let resolver = Resolver::builder()
///     .gazetteer(index)
///     .extractor(
///         CandidateExtractor::builder()
///             .strategy(CapitalizedRunTagger::new())
///             .build(),
///     )
///     .threshold(70.0)
///     .build()?;
///
/// assert!(!resolver.process("rain expected in Chenai").is_empty());
/// # Ok::<(), georesolve::Error>(())
/// ```
#[derive(Default)]
pub struct ResolverBuilder {
    index: Option<Arc<GazetteerIndex>>,
    extractor: Option<CandidateExtractor>,
    threshold: Option<f64>,
}

impl ResolverBuilder {
    /// Supply the gazetteer index.
    #[must_use]
    pub fn gazetteer(mut self, index: GazetteerIndex) -> Self {
        self.index = Some(Arc::new(index));
        self
    }

    /// Supply an already-shared gazetteer index.
    #[must_use]
    pub fn gazetteer_shared(mut self, index: Arc<GazetteerIndex>) -> Self {
        self.index = Some(index);
        self
    }

    /// Supply a custom extraction stack.
    #[must_use]
    pub fn extractor(mut self, extractor: CandidateExtractor) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Set the initial matching threshold, clamped to [0, 100].
    #[must_use]
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Build the resolver.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] when no gazetteer index was
    /// supplied.
    pub fn build(self) -> Result<Resolver> {
        let index = self.index.ok_or_else(|| {
            Error::not_initialized("no gazetteer index was supplied to the builder")
        })?;
        let threshold = self
            .threshold
            .unwrap_or(DEFAULT_THRESHOLD)
            .clamp(0.0, 100.0);
        Ok(Resolver {
            index,
            extractor: self.extractor.unwrap_or_default(),
            threshold: AtomicU64::new(threshold.to_bits()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gazetteer::GazetteerRow;

    fn fixture() -> GazetteerIndex {
        let rows = [
            ("Mumbai", "India", "Maharashtra"),
            ("Delhi", "India", "Delhi"),
            ("Chennai", "India", "Tamil Nadu"),
        ]
        .into_iter()
        .map(|(city, country, region)| GazetteerRow {
            city: Some(city.to_string()),
            country: Some(country.to_string()),
            admin_region: Some(region.to_string()),
        });
        GazetteerIndex::from_rows(rows).unwrap()
    }

    #[test]
    fn exact_match_wins_with_first_algorithm() {
        let resolver = Resolver::new(fixture());
        let matches = resolver.resolve("mumbai");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].category, Category::City);
        assert_eq!(matches[0].algorithm, Algorithm::Ratio);
        assert!((matches[0].score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn ambiguous_name_ranks_city_before_state() {
        // "delhi" is both a city and a state in the fixture; both score
        // 100, and the stable sort keeps City first.
        let resolver = Resolver::new(fixture());
        let matches = resolver.resolve("delhi");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].category, Category::City);
        assert_eq!(matches[1].category, Category::State);
    }

    #[test]
    fn no_duplicate_categories() {
        let resolver = Resolver::new(fixture());
        let matches = resolver.resolve("delhi");
        let mut categories: Vec<Category> = matches.iter().map(|m| m.category).collect();
        categories.dedup();
        assert_eq!(categories.len(), matches.len());
    }

    #[test]
    fn scores_are_descending() {
        let resolver = Resolver::new(fixture());
        resolver.set_threshold(30.0);
        let matches = resolver.resolve("maharashtra");
        assert!(matches.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn empty_candidate_text_matches_nothing() {
        let resolver = Resolver::new(fixture());
        assert!(resolver.resolve("").is_empty());
        assert!(resolver.resolve("?!").is_empty());
    }

    #[test]
    fn threshold_is_clamped_and_atomic() {
        let resolver = Resolver::new(fixture());
        resolver.set_threshold(150.0);
        assert!((resolver.threshold() - 100.0).abs() < 1e-9);
        resolver.set_threshold(-3.0);
        assert!(resolver.threshold().abs() < 1e-9);
        resolver.set_threshold(f64::NAN);
        assert!(resolver.threshold().abs() < 1e-9);
    }

    #[test]
    fn builder_without_gazetteer_is_not_initialized() {
        let err = Resolver::builder().build().unwrap_err();
        assert!(matches!(err, Error::NotInitialized(_)));
    }

    #[test]
    fn detailed_mode_exposes_per_algorithm_results() {
        let resolver = Resolver::new(fixture());
        let detailed = resolver.resolve_detailed("delhi");
        // All four algorithms score 100 for the exact city match, plus
        // four more for the state.
        let city_hits = detailed
            .iter()
            .filter(|m| m.category == Category::City)
            .count();
        assert_eq!(city_hits, 4);
        assert!(detailed.len() > resolver.resolve("delhi").len());
    }

    #[test]
    fn resolve_best_carries_the_token() {
        let resolver = Resolver::new(fixture());
        let entity = resolver.resolve_best("mumbay").unwrap();
        assert_eq!(entity.token, "mumbay");
        assert_eq!(entity.canonical_name, "Mumbai");
        assert!(entity.confidence_score < 100.0);
    }
}
