//! Canonical gazetteer index for place-name matching.
//!
//! Built once from collaborator-supplied rows, then shared read-only
//! across every resolution call. Each category keeps a sorted list of
//! normalized keys (the scan order of the best-of search, so ties break
//! deterministically) plus a key → display-name map that preserves the
//! original casing and diacritics.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entity::Category;
use crate::error::{Error, Result};
use crate::normalize::normalize_key;

/// One row of a gazetteer source.
///
/// A `None` (or blank) field excludes the row from that category's key
/// set only; the other fields still contribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GazetteerRow {
    /// City name, original casing.
    pub city: Option<String>,
    /// Country name, original casing.
    pub country: Option<String>,
    /// First-level administrative region name, original casing.
    pub admin_region: Option<String>,
}

/// Per-category entry counts, as reported by [`GazetteerIndex::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GazetteerStats {
    /// Distinct city keys.
    pub cities: usize,
    /// Distinct country keys.
    pub countries: usize,
    /// Distinct state/region keys.
    pub states: usize,
}

#[derive(Debug, Default)]
struct CategoryTable {
    /// Normalized keys, sorted. Scan order of the best-of search.
    names: Vec<String>,
    /// Normalized key → display name. First display form seen wins.
    display: HashMap<String, String>,
}

impl CategoryTable {
    fn insert(&mut self, raw: &str) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return;
        }
        let key = normalize_key(trimmed);
        self.display.entry(key).or_insert_with(|| trimmed.to_string());
    }

    fn finalize(&mut self) {
        self.names = self.display.keys().cloned().collect();
        self.names.sort_unstable();
    }
}

/// Immutable index of canonical place names, one table per [`Category`].
///
/// # Example
///
/// ```
/// use georesolve::{Category, GazetteerIndex, GazetteerRow};
///
/// let index = GazetteerIndex::from_rows([GazetteerRow {
///     city: Some("Mumbai".into()),
///     country: Some("India".into()),
///     admin_region: Some("Maharashtra".into()),
/// }])?;
///
/// assert_eq!(index.display_name(Category::City, "mumbai"), Some("Mumbai"));
/// assert_eq!(index.len(Category::Country), 1);
/// # Ok::<(), georesolve::Error>(())
/// ```
#[derive(Debug)]
pub struct GazetteerIndex {
    cities: CategoryTable,
    countries: CategoryTable,
    states: CategoryTable,
}

impl GazetteerIndex {
    /// Build the index from gazetteer rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataUnavailable`] when the rows yield no keys in
    /// any category. A single empty category is not an error; lookups
    /// against it simply find nothing.
    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = GazetteerRow>,
    {
        let mut cities = CategoryTable::default();
        let mut countries = CategoryTable::default();
        let mut states = CategoryTable::default();

        for row in rows {
            if let Some(city) = &row.city {
                cities.insert(city);
            }
            if let Some(country) = &row.country {
                countries.insert(country);
            }
            if let Some(region) = &row.admin_region {
                states.insert(region);
            }
        }

        if cities.display.is_empty() && countries.display.is_empty() && states.display.is_empty() {
            return Err(Error::data_unavailable(
                "gazetteer source yielded no usable rows",
            ));
        }

        cities.finalize();
        countries.finalize();
        states.finalize();

        let index = Self {
            cities,
            countries,
            states,
        };
        let stats = index.stats();
        log::info!(
            "gazetteer index built: {} cities, {} countries, {} states",
            stats.cities,
            stats.countries,
            stats.states
        );
        Ok(index)
    }

    /// Sorted normalized keys for a category.
    #[must_use]
    pub fn names(&self, category: Category) -> &[String] {
        &self.table(category).names
    }

    /// Display name for a normalized key, original casing preserved.
    #[must_use]
    pub fn display_name(&self, category: Category, key: &str) -> Option<&str> {
        self.table(category).display.get(key).map(String::as_str)
    }

    /// Number of distinct keys in a category.
    #[must_use]
    pub fn len(&self, category: Category) -> usize {
        self.table(category).names.len()
    }

    /// Whether a category has no keys.
    #[must_use]
    pub fn is_empty(&self, category: Category) -> bool {
        self.table(category).names.is_empty()
    }

    /// Per-category entry counts.
    #[must_use]
    pub fn stats(&self) -> GazetteerStats {
        GazetteerStats {
            cities: self.len(Category::City),
            countries: self.len(Category::Country),
            states: self.len(Category::State),
        }
    }

    fn table(&self, category: Category) -> &CategoryTable {
        match category {
            Category::City => &self.cities,
            Category::Country => &self.countries,
            Category::State => &self.states,
        }
    }
}
