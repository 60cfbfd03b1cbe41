//! Explorer state and the single reducer over the closed action set.
//!
//! Every client interaction is an [`ExplorerAction`]. [`reduce`] validates it
//! against the catalogue and returns the next [`ExplorerState`]; a rejected
//! action leaves the caller's state as it was.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::Error;
use super::adventure::{CountryCode, Difficulty, Typology};
use super::catalogue::Catalogue;
use super::filter::{DateRange, FilterError, FilterState, PriceRange};
use super::selection::{CityRef, CountryRef, SelectionState};

/// Errors raised when an action cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExplorerError {
    /// The action names a country absent from the catalogue.
    #[error("unknown country '{code}'")]
    UnknownCountry {
        /// Requested code.
        code: String,
    },
    /// The action names a city absent from the catalogue.
    #[error("unknown city '{code}'")]
    UnknownCity {
        /// Requested code.
        code: String,
    },
    /// The action names an adventure absent from the catalogue.
    #[error("unknown adventure '{id}'")]
    UnknownAdventure {
        /// Requested id.
        id: String,
    },
    /// The requested price range is inverted.
    #[error(transparent)]
    InvalidPriceRange(#[from] FilterError),
}

impl From<ExplorerError> for Error {
    fn from(err: ExplorerError) -> Self {
        let message = err.to_string();
        match err {
            ExplorerError::UnknownCountry { code } => {
                Error::not_found(message).with_details(json!({ "country": code }))
            }
            ExplorerError::UnknownCity { code } => {
                Error::not_found(message).with_details(json!({ "city": code }))
            }
            ExplorerError::UnknownAdventure { id } => {
                Error::not_found(message).with_details(json!({ "adventure": id }))
            }
            ExplorerError::InvalidPriceRange(FilterError::InvertedPriceRange { min, max }) => {
                Error::invalid_request(message).with_details(json!({ "min": min, "max": max }))
            }
        }
    }
}

/// One facet value to add or remove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "facet", content = "value", rename_all = "camelCase")]
pub enum FilterToggle {
    /// Country name, as listed in the catalogue.
    Country(String),
    /// Trip length in days.
    Duration(u32),
    /// Difficulty level.
    Difficulty(Difficulty),
    /// Trip typology.
    Typology(Typology),
}

/// Every interaction the explorer understands.
///
/// # Examples
/// ```
/// use adventure_map::domain::ExplorerAction;
///
/// let action: ExplorerAction =
///     serde_json::from_str(r#"{"type":"setSearch","query":"kayak"}"#).expect("valid action");
/// assert_eq!(action, ExplorerAction::SetSearch { query: "kayak".into() });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ExplorerAction {
    /// Add or remove one facet value.
    ToggleFilter { filter: FilterToggle },
    /// Replace the free-text filter.
    SetSearch { query: String },
    /// Replace the price range.
    SetPriceRange { min: u32, max: u32 },
    /// Replace the travel dates.
    SetDateRange {
        #[serde(default)]
        from: Option<NaiveDate>,
        #[serde(default)]
        to: Option<NaiveDate>,
    },
    /// Narrow the country filter to one country.
    FilterToCountry { code: String },
    /// Click on a country territory.
    SelectCountry { code: String },
    /// Click on a city marker.
    SelectCity { code: String },
    /// Click on a result card; clicking the active card clears it.
    SelectAdventure { id: String },
    /// Pointer entered a country territory.
    HoverCountry {
        /// ISO code of the country.
        code: String,
    },
    /// Pointer left a country territory.
    UnhoverCountry {
        /// ISO code of the country.
        code: String,
    },
    /// Pointer entered a city marker.
    HoverCity {
        /// Destination city code.
        code: String,
    },
    /// Pointer left a city marker.
    UnhoverCity {
        /// Destination city code.
        code: String,
    },
    /// Restore every filter and clear the selection.
    Reset,
}

impl ExplorerAction {
    /// Debounce class of this action, if it is debounced.
    #[must_use]
    pub const fn debounce_class(&self) -> Option<DebounceClass> {
        match self {
            Self::SetSearch { .. } => Some(DebounceClass::Search),
            Self::SetPriceRange { .. } => Some(DebounceClass::Price),
            _ => None,
        }
    }
}

/// Actions whose trailing edge is the only one that matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebounceClass {
    /// Free-text search edits.
    Search,
    /// Price slider moves.
    Price,
}

/// Everything the explorer remembers between interactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerState {
    /// Current filters.
    pub filters: FilterState,
    /// Territory and city selection.
    #[serde(default)]
    pub selection: SelectionState,
    /// Adventure focused from the card list.
    #[serde(default)]
    pub active_adventure: Option<String>,
}

impl ExplorerState {
    /// Fresh state for a catalogue: default filters and no selection.
    #[must_use]
    pub fn initial(catalogue: &Catalogue) -> Self {
        Self {
            filters: FilterState::defaults_for(catalogue),
            selection: SelectionState::default(),
            active_adventure: None,
        }
    }
}

/// Apply one action.
///
/// # Errors
///
/// Returns [`ExplorerError`] when the action references an unknown country,
/// city or adventure, or carries an inverted price range.
pub fn reduce(
    catalogue: &Catalogue,
    state: &ExplorerState,
    action: ExplorerAction,
) -> Result<ExplorerState, ExplorerError> {
    let mut next = state.clone();
    match action {
        ExplorerAction::ToggleFilter { filter } => {
            next.filters = toggle_filter(catalogue, &state.filters, filter)?;
        }
        ExplorerAction::SetSearch { query } => {
            next.filters = state.filters.with_search(query);
        }
        ExplorerAction::SetPriceRange { min, max } => {
            next.filters = state.filters.with_price_range(PriceRange::new(min, max)?);
        }
        ExplorerAction::SetDateRange { from, to } => {
            next.filters = state.filters.with_date_range(DateRange { from, to });
        }
        ExplorerAction::FilterToCountry { code } => {
            let (code, _) = known_country(catalogue, &code)?;
            next.filters = state.filters.only_country(&code);
        }
        ExplorerAction::SelectCountry { code } => {
            let (code, name) = known_country(catalogue, &code)?;
            next.selection = state.selection.select_country(&code, name);
        }
        ExplorerAction::SelectCity { code } => {
            let (destination, city) = catalogue
                .find_city(&code)
                .ok_or(ExplorerError::UnknownCity { code })?;
            let country_name = catalogue
                .country_name(destination.code())
                .unwrap_or(destination.name());
            next.selection = state.selection.select_city(
                CityRef {
                    code: city.code(),
                    name: city.name(),
                },
                CountryRef {
                    code: destination.code(),
                    name: country_name,
                },
            );
        }
        ExplorerAction::SelectAdventure { id } => {
            if catalogue.adventure(&id).is_none() {
                return Err(ExplorerError::UnknownAdventure { id });
            }
            next.active_adventure = if state.active_adventure.as_deref() == Some(id.as_str()) {
                None
            } else {
                Some(id)
            };
        }
        ExplorerAction::HoverCountry { code } => {
            let (code, name) = known_country(catalogue, &code)?;
            next.selection = state.selection.hover_country(&code, name);
        }
        ExplorerAction::UnhoverCountry { code } => {
            let (code, _) = known_country(catalogue, &code)?;
            next.selection = state.selection.unhover_country(&code);
        }
        ExplorerAction::HoverCity { code } => {
            let (_, city) = catalogue
                .find_city(&code)
                .ok_or(ExplorerError::UnknownCity { code })?;
            next.selection = state.selection.hover_city(city.code(), city.name());
        }
        ExplorerAction::UnhoverCity { code } => {
            if catalogue.find_city(&code).is_none() {
                return Err(ExplorerError::UnknownCity { code });
            }
            next.selection = state.selection.unhover_city(&code);
        }
        ExplorerAction::Reset => {
            next = ExplorerState::initial(catalogue);
        }
    }
    Ok(next)
}

fn known_country<'a>(
    catalogue: &'a Catalogue,
    raw: &str,
) -> Result<(CountryCode, &'a str), ExplorerError> {
    let unknown = || ExplorerError::UnknownCountry {
        code: raw.to_owned(),
    };
    let code = CountryCode::new(raw).map_err(|_| unknown())?;
    let name = catalogue.country_name(&code).ok_or_else(unknown)?;
    Ok((code, name))
}

fn toggle_filter(
    catalogue: &Catalogue,
    filters: &FilterState,
    toggle: FilterToggle,
) -> Result<FilterState, ExplorerError> {
    Ok(match toggle {
        FilterToggle::Country(code) => {
            let (code, _) = known_country(catalogue, &code)?;
            filters.toggle_country(&code)
        }
        FilterToggle::Duration(days) => filters.toggle_duration(days),
        FilterToggle::Difficulty(difficulty) => filters.toggle_difficulty(difficulty),
        FilterToggle::Typology(typology) => filters.toggle_typology(typology),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::catalogue::test_support::embedded;
    use crate::domain::selection::TerritoryState;
    use rstest::{fixture, rstest};

    #[fixture]
    fn catalogue() -> Catalogue {
        embedded()
    }

    fn code(value: &str) -> CountryCode {
        CountryCode::new(value).expect("valid code")
    }

    #[rstest]
    fn toggling_a_country_twice_restores_the_defaults(catalogue: Catalogue) {
        let initial = ExplorerState::initial(&catalogue);
        let toggle = || ExplorerAction::ToggleFilter {
            filter: FilterToggle::Country("is".to_owned()),
        };
        let once = reduce(&catalogue, &initial, toggle()).expect("toggle");
        assert!(!once.filters.countries.contains(&code("IS")));
        let twice = reduce(&catalogue, &once, toggle()).expect("toggle back");
        assert_eq!(twice, initial);
    }

    #[rstest]
    #[case(ExplorerAction::SelectCountry { code: "XX".into() })]
    #[case(ExplorerAction::HoverCountry { code: "not-a-code".into() })]
    #[case(ExplorerAction::SelectCity { code: "IS-XXX".into() })]
    #[case(ExplorerAction::SelectAdventure { id: "atlantis-001".into() })]
    #[case(ExplorerAction::SetPriceRange { min: 3000, max: 100 })]
    fn rejected_actions_report_an_error(catalogue: Catalogue, #[case] action: ExplorerAction) {
        let initial = ExplorerState::initial(&catalogue);
        assert!(reduce(&catalogue, &initial, action).is_err());
    }

    #[rstest]
    fn errors_map_to_transport_codes() {
        let missing: Error = ExplorerError::UnknownCity {
            code: "IS-XXX".into(),
        }
        .into();
        assert_eq!(missing.code(), ErrorCode::NotFound);
        let inverted: Error = ExplorerError::from(FilterError::InvertedPriceRange {
            min: 9,
            max: 1,
        })
        .into();
        assert_eq!(inverted.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn selecting_a_city_activates_its_country(catalogue: Catalogue) {
        let initial = ExplorerState::initial(&catalogue);
        let next = reduce(
            &catalogue,
            &initial,
            ExplorerAction::SelectCity {
                code: "JP-KYO".into(),
            },
        )
        .expect("select city");
        assert_eq!(
            next.selection.territory_state(&code("JP")),
            TerritoryState::ActiveWithCitySelected
        );
        assert_eq!(next.selection.label(), Some("Kyoto"));
        assert_eq!(next.filters, initial.filters);
    }

    #[rstest]
    fn destination_only_countries_can_be_selected(catalogue: Catalogue) {
        let initial = ExplorerState::initial(&catalogue);
        let next = reduce(
            &catalogue,
            &initial,
            ExplorerAction::SelectCountry { code: "PT".into() },
        )
        .expect("portugal has cities");
        assert_eq!(next.selection.label(), Some("Portugal"));
    }

    #[rstest]
    fn filter_to_country_narrows_the_filter_only(catalogue: Catalogue) {
        let initial = ExplorerState::initial(&catalogue);
        let next = reduce(
            &catalogue,
            &initial,
            ExplorerAction::FilterToCountry { code: "PE".into() },
        )
        .expect("filter to peru");
        assert_eq!(next.filters.countries.len(), 1);
        assert_eq!(next.selection, SelectionState::default());
    }

    #[rstest]
    fn selecting_the_active_adventure_clears_it(catalogue: Catalogue) {
        let initial = ExplorerState::initial(&catalogue);
        let select = || ExplorerAction::SelectAdventure {
            id: "peru-001".into(),
        };
        let focused = reduce(&catalogue, &initial, select()).expect("select");
        assert_eq!(focused.active_adventure.as_deref(), Some("peru-001"));
        let cleared = reduce(&catalogue, &focused, select()).expect("deselect");
        assert_eq!(cleared.active_adventure, None);
    }

    #[rstest]
    fn reset_restores_the_initial_state(catalogue: Catalogue) {
        let initial = ExplorerState::initial(&catalogue);
        let busy = [
            ExplorerAction::SetSearch {
                query: "trek".into(),
            },
            ExplorerAction::SelectCountry { code: "MA".into() },
            ExplorerAction::SelectAdventure {
                id: "morocco-001".into(),
            },
        ]
        .into_iter()
        .try_fold(initial.clone(), |state, action| {
            reduce(&catalogue, &state, action)
        })
        .expect("valid actions");
        assert_ne!(busy, initial);
        assert_eq!(
            reduce(&catalogue, &busy, ExplorerAction::Reset).expect("reset"),
            initial
        );
    }

    #[rstest]
    fn actions_deserialise_from_tagged_json() {
        let action: ExplorerAction = serde_json::from_str(
            r#"{"type":"toggleFilter","filter":{"facet":"difficulty","value":"Easy"}}"#,
        )
        .expect("valid action");
        assert_eq!(
            action,
            ExplorerAction::ToggleFilter {
                filter: FilterToggle::Difficulty(Difficulty::Easy)
            }
        );
        assert_eq!(
            serde_json::from_str::<ExplorerAction>(r#"{"type":"reset"}"#).expect("reset"),
            ExplorerAction::Reset
        );
    }

    #[rstest]
    fn only_search_and_price_are_debounced() {
        assert_eq!(
            ExplorerAction::SetSearch { query: String::new() }.debounce_class(),
            Some(DebounceClass::Search)
        );
        assert_eq!(
            ExplorerAction::SetPriceRange { min: 1, max: 2 }.debounce_class(),
            Some(DebounceClass::Price)
        );
        assert_eq!(ExplorerAction::Reset.debounce_class(), None);
    }
}
