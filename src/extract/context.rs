//! Context-based span tagger.
//!
//! A lightweight statistical second opinion alongside the capitalized-run
//! pattern. Scans capitalized token runs and keeps only those whose
//! surrounding words signal a location: a preceding location preposition
//! ("in Mumbai"), or membership in a comma/conjunction list chained off a
//! previously accepted run ("between Mumbai, Delhi, and Bangalore").
//!
//! Because it inspects token cores rather than a character class, it also
//! catches names the ASCII-only pattern heuristic cannot, e.g. "São Paulo".
//! Precision comes from context; the tagger deliberately rejects bare
//! capitalized runs with no location signal.

use crate::entity::{SpanLabel, TaggedSpan};
use crate::error::Result;
use crate::Tagger;

/// Prepositions that typically precede a place name.
const LOC_PREPOSITIONS: &[&str] = &[
    "in", "at", "from", "to", "near", "between", "around", "across", "within", "outside", "toward",
    "towards", "via",
];

/// Connectors that may join places inside a list.
const LIST_CONNECTORS: &[&str] = &["and", "or"];

/// Capitalized words that are never place names: calendar terms and
/// relative-day words.
const NON_ENTITY_WORDS: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
    "today",
    "tomorrow",
    "yesterday",
];

/// Words that commonly start a sentence or clause but are not entities.
const SENTENCE_STARTERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "it", "he", "she", "we", "they", "what",
    "which", "where", "when", "who", "why", "how", "show", "tell", "give", "compare", "is", "are",
    "was", "were", "please", "note", "see",
];

/// Signal strength when a location preposition precedes the run.
const PREPOSITION_CONFIDENCE: f64 = 0.8;
/// Signal strength when the run continues a location list.
const LIST_CONFIDENCE: f64 = 0.7;
/// Signal strength of a bare capitalized run with no context.
const BARE_CONFIDENCE: f64 = 0.4;

/// Context-based span tagger over capitalized token runs.
///
/// # Example
///
/// ```
/// use georesolve::{ContextTagger, Tagger};
///
/// let tagger = ContextTagger::new();
/// let spans = tagger.tag_spans("she lives in São Paulo").unwrap();
/// assert_eq!(spans.len(), 1);
/// assert_eq!(spans[0].text, "São Paulo");
/// ```
#[derive(Debug, Clone)]
pub struct ContextTagger {
    /// Minimum signal strength before a run is emitted.
    threshold: f64,
}

impl Default for ContextTagger {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

impl ContextTagger {
    /// Create a tagger with the default signal threshold (0.5).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tagger with a custom signal threshold.
    ///
    /// Lowering it to 0.4 or below makes the tagger emit every
    /// capitalized run, context or not.
    #[must_use]
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }
}

/// A run of capitalized words: `[start, end)` word indices.
struct Run {
    start: usize,
    end: usize,
}

impl Tagger for ContextTagger {
    fn tag_spans(&self, text: &str) -> Result<Vec<TaggedSpan>> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let runs = capitalized_runs(&words);

        let mut spans = Vec::new();
        // Word index just past the last emitted run, for list chaining.
        let mut last_emitted_end: Option<usize> = None;

        for run in runs {
            let mut cores: Vec<&str> = words[run.start..run.end].iter().map(|w| core(w)).collect();

            // A leading sentence-grammar word is not part of the name.
            if SENTENCE_STARTERS.contains(&cores[0].to_lowercase().as_str()) {
                if cores.len() == 1 {
                    continue;
                }
                cores.remove(0);
            }

            if cores.len() == 1 && NON_ENTITY_WORDS.contains(&cores[0].to_lowercase().as_str()) {
                continue;
            }

            let confidence = if preceded_by_preposition(&words, run.start) {
                PREPOSITION_CONFIDENCE
            } else if continues_list(&words, last_emitted_end, run.start) {
                LIST_CONFIDENCE
            } else {
                BARE_CONFIDENCE
            };

            if confidence >= self.threshold {
                spans.push(TaggedSpan::new(cores.join(" "), SpanLabel::Location));
                last_emitted_end = Some(run.end);
            }
        }
        Ok(spans)
    }

    fn name(&self) -> &'static str {
        "context"
    }

    fn description(&self) -> &'static str {
        "Capitalized runs filtered by preposition and list context"
    }
}

/// Strip punctuation from both ends of a word, keeping inner hyphens.
fn core(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}

fn is_capitalized(core: &str) -> bool {
    core.chars().next().map(char::is_uppercase).unwrap_or(false) && core.chars().count() >= 2
}

/// Whether a word carries clause-ending punctuation.
fn ends_clause(word: &str) -> bool {
    word.ends_with([',', '.', '!', '?', ';', ':'])
}

fn capitalized_runs(words: &[&str]) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut i = 0;
    while i < words.len() {
        if !is_capitalized(core(words[i])) {
            i += 1;
            continue;
        }
        let start = i;
        let mut clause_break = ends_clause(words[i]);
        let mut end = i + 1;
        while !clause_break && end < words.len() && is_capitalized(core(words[end])) {
            clause_break = ends_clause(words[end]);
            end += 1;
        }
        runs.push(Run { start, end });
        i = end;
    }
    runs
}

fn preceded_by_preposition(words: &[&str], start: usize) -> bool {
    if start == 0 {
        return false;
    }
    LOC_PREPOSITIONS.contains(&core(words[start - 1]).to_lowercase().as_str())
}

/// Whether the run at `start` continues a comma/conjunction list hanging
/// off the last emitted run.
fn continues_list(words: &[&str], last_emitted_end: Option<usize>, start: usize) -> bool {
    let Some(end) = last_emitted_end else {
        return false;
    };
    if end > start {
        return false;
    }
    let gap = &words[end..start];
    let gap_is_connectors = gap.iter().all(|w| {
        let c = core(w).to_lowercase();
        c.is_empty() || LIST_CONNECTORS.contains(&c.as_str())
    });
    // An empty gap only chains across an explicit comma; otherwise two
    // adjacent runs would have merged already or a sentence ended.
    let after_comma = end > 0 && words[end - 1].ends_with(',');
    gap_is_connectors && (!gap.is_empty() || after_comma)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(spans: &[TaggedSpan]) -> Vec<&str> {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn preposition_context_tags_run() {
        let tagger = ContextTagger::new();
        let spans = tagger.tag_spans("heavy rain expected in Chennai today").unwrap();
        assert_eq!(texts(&spans), vec!["Chennai"]);
    }

    #[test]
    fn bare_runs_are_rejected_by_default() {
        let tagger = ContextTagger::new();
        let spans = tagger.tag_spans("Chennai Mumbai report attached").unwrap();
        assert!(spans.is_empty());
    }

    #[test]
    fn list_chains_across_commas_and_connectors() {
        let tagger = ContextTagger::new();
        let spans = tagger
            .tag_spans("compare weather between Mumbai, Delhi, and Bangalore")
            .unwrap();
        assert_eq!(texts(&spans), vec!["Mumbai", "Delhi", "Bangalore"]);
    }

    #[test]
    fn months_are_not_places_even_with_preposition() {
        let tagger = ContextTagger::new();
        let spans = tagger.tag_spans("rainfall in October in Chennai").unwrap();
        assert_eq!(texts(&spans), vec!["Chennai"]);
    }

    #[test]
    fn sentence_end_does_not_chain() {
        let tagger = ContextTagger::new();
        let spans = tagger.tag_spans("we stayed in Madrid. Barcelona was next").unwrap();
        assert_eq!(texts(&spans), vec!["Madrid"]);
    }

    #[test]
    fn non_ascii_names_are_supported() {
        let tagger = ContextTagger::new();
        let spans = tagger.tag_spans("flying from São Paulo to Zürich").unwrap();
        assert_eq!(texts(&spans), vec!["São Paulo", "Zürich"]);
    }

    #[test]
    fn leading_article_is_stripped() {
        let tagger = ContextTagger::new();
        let spans = tagger.tag_spans("sailing to The Bahamas").unwrap();
        assert_eq!(texts(&spans), vec!["Bahamas"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        let tagger = ContextTagger::new();
        assert!(tagger.tag_spans("").unwrap().is_empty());
    }
}
