//! Substring search over the catalogue for the search dropdowns.
//!
//! Both the map search box and the sidebar search box use [`search`]; the
//! caller only picks `max_results`.

use std::collections::HashMap;

use regex::RegexBuilder;
use serde::Serialize;

use super::adventure::{Adventure, CountryCode};
use super::catalogue::Catalogue;

/// Adventure suggestions returned when the caller does not say otherwise.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// One dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SearchResult {
    /// A country whose name matches the query.
    #[serde(rename_all = "camelCase")]
    Country {
        /// Country code.
        country_code: CountryCode,
        /// Country display name.
        country_name: String,
        /// Number of catalogue adventures in that country matching the query.
        count: usize,
    },
    /// An adventure whose name or country matches the query.
    #[serde(rename_all = "camelCase")]
    Adventure {
        /// Adventure id.
        id: String,
        /// Adventure name.
        name: String,
        /// Country display name.
        country_name: String,
        /// Effective price in whole euros.
        display_price: u32,
        /// Effective price formatted for display.
        formatted_price: String,
    },
}

impl SearchResult {
    /// Text shown in the dropdown row.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Country { country_name, .. } => country_name,
            Self::Adventure { name, .. } => name,
        }
    }

    fn from_adventure(adventure: &Adventure) -> Self {
        Self::Adventure {
            id: adventure.id().to_owned(),
            name: adventure.name().to_owned(),
            country_name: adventure.country_name().to_owned(),
            display_price: adventure.effective_price(),
            formatted_price: format_price(adventure.effective_price()),
        }
    }
}

/// Search the catalogue.
///
/// The query is trimmed and lower-cased; a blank query yields nothing.
/// Country matches come first, deduplicated by code in first-seen order.
/// Adventure matches follow in catalogue order, capped at `max_results`.
/// The cap never applies to country matches or their counts.
///
/// # Examples
/// ```
/// use adventure_map::domain::{Catalogue, search};
///
/// assert!(search(&Catalogue::default(), "   ", 5).is_empty());
/// ```
#[must_use]
pub fn search(catalogue: &Catalogue, query: &str, max_results: usize) -> Vec<SearchResult> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut order: Vec<(&CountryCode, &str)> = Vec::new();
    let mut counts: HashMap<&CountryCode, usize> = HashMap::new();
    let mut adventures = Vec::new();

    for adventure in catalogue.adventures() {
        let country_hit = adventure.country_name().to_lowercase().contains(&query);
        if country_hit {
            let count = counts.entry(adventure.country_code()).or_insert_with(|| {
                order.push((adventure.country_code(), adventure.country_name()));
                0
            });
            *count += 1;
        }
        if adventures.len() < max_results
            && (country_hit || adventure.name().to_lowercase().contains(&query))
        {
            adventures.push(SearchResult::from_adventure(adventure));
        }
    }

    order
        .into_iter()
        .map(|(code, name)| SearchResult::Country {
            country_code: code.clone(),
            country_name: name.to_owned(),
            count: counts.get(code).copied().unwrap_or_default(),
        })
        .chain(adventures)
        .collect()
}

/// Wrap every case-insensitive occurrence of `query` in `<mark>` tags.
///
/// The query is matched literally.
///
/// # Examples
/// ```
/// use adventure_map::domain::highlight_match;
///
/// assert_eq!(highlight_match("Machu Picchu", "pic"), "Machu <mark>Pic</mark>chu");
/// assert_eq!(highlight_match("a+b", "+"), "a<mark>+</mark>b");
/// assert_eq!(highlight_match("Peru", ""), "Peru");
/// ```
#[must_use]
pub fn highlight_match(text: &str, query: &str) -> String {
    if query.is_empty() {
        return text.to_owned();
    }
    match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern.replace_all(text, "<mark>$0</mark>").into_owned(),
        Err(_) => text.to_owned(),
    }
}

/// Format whole euros with thousands separators.
///
/// # Examples
/// ```
/// use adventure_map::domain::format_price;
///
/// assert_eq!(format_price(1850), "€1,850");
/// assert_eq!(format_price(950), "€950");
/// assert_eq!(format_price(1_250_000), "€1,250,000");
/// ```
#[must_use]
pub fn format_price(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    grouped.push('€');
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
