//! Filter state and the predicate engine applied to the catalogue.
//!
//! `FilterState` is an immutable value: every transition returns a new state
//! and leaves the receiver untouched. `apply_filters` is pure and keeps
//! catalogue order.
//!
//! Predicates, all of which must hold for a record to be kept:
//!
//! 1. free-text search over name, country, difficulty and typology labels
//! 2. country membership
//! 3. duration membership
//! 4. difficulty membership
//! 5. typology membership
//! 6. effective price inside the inclusive price range
//!
//! An empty selection set matches nothing. The date range is carried for the
//! client but never filters.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::adventure::{Adventure, CountryCode, Difficulty, Typology};
use super::catalogue::Catalogue;

/// Errors raised by filter value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// The lower price bound exceeds the upper bound.
    #[error("price range minimum {min} exceeds maximum {max}")]
    InvertedPriceRange {
        /// Requested minimum.
        min: u32,
        /// Requested maximum.
        max: u32,
    },
}

/// Inclusive price range in whole euros.
///
/// ## Invariants
/// - `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PriceRangeDto", into = "PriceRangeDto")]
pub struct PriceRange {
    min: u32,
    max: u32,
}

impl PriceRange {
    /// Validate a range.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvertedPriceRange`] when `min > max`.
    pub const fn new(min: u32, max: u32) -> Result<Self, FilterError> {
        if min > max {
            return Err(FilterError::InvertedPriceRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> u32 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Inclusive membership test.
    #[must_use]
    pub const fn contains(&self, price: u32) -> bool {
        self.min <= price && price <= self.max
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct PriceRangeDto {
    min: u32,
    max: u32,
}

impl From<PriceRange> for PriceRangeDto {
    fn from(value: PriceRange) -> Self {
        Self {
            min: value.min,
            max: value.max,
        }
    }
}

impl TryFrom<PriceRangeDto> for PriceRange {
    type Error = FilterError;

    fn try_from(value: PriceRangeDto) -> Result<Self, Self::Error> {
        Self::new(value.min, value.max)
    }
}

/// Travel dates picked by the user. Recorded only; never filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    /// First travel day.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Last travel day.
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

/// The complete set of user-selected filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Free-text query; empty disables the search predicate.
    #[serde(default)]
    pub search: String,
    /// Selected country codes.
    pub countries: BTreeSet<CountryCode>,
    /// Selected durations in days.
    pub durations: BTreeSet<u32>,
    /// Selected difficulty grades.
    pub difficulties: BTreeSet<Difficulty>,
    /// Selected typologies.
    pub typologies: BTreeSet<Typology>,
    /// Travel dates.
    #[serde(default)]
    pub date_range: DateRange,
    /// Effective price bounds.
    pub price_range: PriceRange,
}

impl FilterState {
    /// Default filters for a catalogue: everything selected, empty search,
    /// observed price bounds.
    ///
    /// # Examples
    /// ```
    /// use adventure_map::domain::{Catalogue, FilterState, apply_filters};
    ///
    /// let catalogue = Catalogue::default();
    /// let filters = FilterState::defaults_for(&catalogue);
    /// assert!(filters.is_default_for(&catalogue));
    /// assert!(apply_filters(&catalogue, &filters).is_empty());
    /// ```
    #[must_use]
    pub fn defaults_for(catalogue: &Catalogue) -> Self {
        let price_range = catalogue
            .price_bounds()
            .unwrap_or(PriceRange { min: 0, max: 0 });
        Self {
            search: String::new(),
            countries: catalogue.country_codes(),
            durations: catalogue.durations(),
            difficulties: Difficulty::ALL.into_iter().collect(),
            typologies: Typology::ALL.into_iter().collect(),
            date_range: DateRange::default(),
            price_range,
        }
    }

    /// Whether every filter sits at its default. Drives the "clear all"
    /// control, which is disabled in that case.
    #[must_use]
    pub fn is_default_for(&self, catalogue: &Catalogue) -> bool {
        *self == Self::defaults_for(catalogue)
    }

    /// Replace the search query.
    #[must_use]
    pub fn with_search(&self, query: impl Into<String>) -> Self {
        Self {
            search: query.into(),
            ..self.clone()
        }
    }

    /// Replace the selected countries.
    #[must_use]
    pub fn with_countries<I>(&self, codes: I) -> Self
    where
        I: IntoIterator<Item = CountryCode>,
    {
        Self {
            countries: codes.into_iter().collect(),
            ..self.clone()
        }
    }

    /// Narrow the country selection to exactly one country.
    #[must_use]
    pub fn only_country(&self, code: &CountryCode) -> Self {
        self.with_countries([code.clone()])
    }

    /// Add or remove one country.
    #[must_use]
    pub fn toggle_country(&self, code: &CountryCode) -> Self {
        let mut next = self.clone();
        toggle(&mut next.countries, code.clone());
        next
    }

    /// Add or remove one duration.
    #[must_use]
    pub fn toggle_duration(&self, days: u32) -> Self {
        let mut next = self.clone();
        toggle(&mut next.durations, days);
        next
    }

    /// Add or remove one difficulty grade.
    #[must_use]
    pub fn toggle_difficulty(&self, difficulty: Difficulty) -> Self {
        let mut next = self.clone();
        toggle(&mut next.difficulties, difficulty);
        next
    }

    /// Add or remove one typology.
    #[must_use]
    pub fn toggle_typology(&self, typology: Typology) -> Self {
        let mut next = self.clone();
        toggle(&mut next.typologies, typology);
        next
    }

    /// Replace the price range.
    #[must_use]
    pub fn with_price_range(&self, price_range: PriceRange) -> Self {
        Self {
            price_range,
            ..self.clone()
        }
    }

    /// Replace the date range.
    #[must_use]
    pub fn with_date_range(&self, date_range: DateRange) -> Self {
        Self {
            date_range,
            ..self.clone()
        }
    }

    /// Whether one adventure passes every predicate.
    #[must_use]
    pub fn matches(&self, adventure: &Adventure) -> bool {
        self.matches_search(adventure)
            && self.countries.contains(adventure.country_code())
            && self.durations.contains(&adventure.duration_days())
            && self.difficulties.contains(&adventure.difficulty())
            && self.typologies.contains(&adventure.typology())
            && self.price_range.contains(adventure.effective_price())
    }

    fn matches_search(&self, adventure: &Adventure) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let query = self.search.to_lowercase();
        [
            adventure.name(),
            adventure.country_name(),
            adventure.difficulty().label(),
            adventure.typology().label(),
        ]
        .into_iter()
        .any(|field| field.to_lowercase().contains(&query))
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if set.contains(&value) {
        set.remove(&value);
    } else {
        set.insert(value);
    }
}

/// Adventures passing every filter, in catalogue order.
#[must_use]
pub fn apply_filters<'a>(catalogue: &'a Catalogue, filters: &FilterState) -> Vec<&'a Adventure> {
    catalogue
        .adventures()
        .iter()
        .filter(|adventure| filters.matches(adventure))
        .collect()
}
