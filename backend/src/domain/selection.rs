//! Territory and city-marker selection state machine.
//!
//! A single value tracks the active country, the active city, what the pointer
//! is over, and the two label slots. The label shown is the hover label when
//! one is set, otherwise the locked label left by the latest explicit
//! selection.
//!
//! ```text
//! territory:  default --hover--> hovered --click--> active
//!             active  --click(city)--> active-with-city-selected
//!             active  --click--> default   (also clears the city)
//! city:       default --hover--> hovered --click--> active --click--> default
//! ```
//!
//! Hovering an active entity is suppressed. Selecting a city first makes its
//! parent country active.

use serde::{Deserialize, Serialize};

use super::adventure::CountryCode;

/// Visual state of a country territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerritoryState {
    Default,
    Hovered,
    Active,
    ActiveWithCitySelected,
}

/// Visual state of a city marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CityMarkerState {
    Default,
    Hovered,
    Active,
}

/// Pin colour of a city marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerTone {
    /// The city itself is hovered or active.
    Black,
    /// The city's country is hovered or active.
    White,
    /// Neither.
    Default,
}

/// Current territory and city selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectionState {
    active_country: Option<CountryCode>,
    active_city: Option<String>,
    hovered_country: Option<CountryCode>,
    hovered_city: Option<String>,
    locked_label: Option<String>,
    hover_label: Option<String>,
}

impl SelectionState {
    /// Country last selected by click.
    #[must_use]
    pub fn active_country(&self) -> Option<&CountryCode> {
        self.active_country.as_ref()
    }

    /// City last selected by click.
    #[must_use]
    pub fn active_city(&self) -> Option<&str> {
        self.active_city.as_deref()
    }

    /// Country under the pointer.
    #[must_use]
    pub fn hovered_country(&self) -> Option<&CountryCode> {
        self.hovered_country.as_ref()
    }

    /// City marker under the pointer.
    #[must_use]
    pub fn hovered_city(&self) -> Option<&str> {
        self.hovered_city.as_deref()
    }

    /// Label to display, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.hover_label
            .as_deref()
            .or(self.locked_label.as_deref())
    }

    /// Whether the label comes from an explicit selection.
    #[must_use]
    pub fn label_locked(&self) -> bool {
        self.hover_label.is_none() && self.locked_label.is_some()
    }

    /// Pointer entered a country territory.
    #[must_use]
    pub fn hover_country(&self, code: &CountryCode, name: &str) -> Self {
        if self.active_country.as_ref() == Some(code) {
            return self.clone();
        }
        Self {
            hovered_country: Some(code.clone()),
            hover_label: Some(name.to_owned()),
            ..self.clone()
        }
    }

    /// Pointer left a country territory.
    #[must_use]
    pub fn unhover_country(&self, code: &CountryCode) -> Self {
        if self.hovered_country.as_ref() != Some(code) {
            return self.clone();
        }
        Self {
            hovered_country: None,
            hover_label: None,
            ..self.clone()
        }
    }

    /// Pointer entered a city marker.
    #[must_use]
    pub fn hover_city(&self, code: &str, name: &str) -> Self {
        if self.active_city.as_deref() == Some(code) {
            return self.clone();
        }
        Self {
            hovered_city: Some(code.to_owned()),
            hover_label: Some(name.to_owned()),
            ..self.clone()
        }
    }

    /// Pointer left a city marker.
    #[must_use]
    pub fn unhover_city(&self, code: &str) -> Self {
        if self.hovered_city.as_deref() != Some(code) {
            return self.clone();
        }
        Self {
            hovered_city: None,
            hover_label: None,
            ..self.clone()
        }
    }

    /// Click on a country territory.
    ///
    /// Selecting another country drops any active city. Clicking the active
    /// country deselects it, clears the city and unlocks the label.
    #[must_use]
    pub fn select_country(&self, code: &CountryCode, name: &str) -> Self {
        if self.active_country.as_ref() == Some(code) {
            return Self {
                active_country: None,
                active_city: None,
                locked_label: None,
                ..self.clone()
            };
        }
        Self {
            active_country: Some(code.clone()),
            active_city: None,
            hovered_country: None,
            hover_label: None,
            locked_label: Some(name.to_owned()),
            ..self.clone()
        }
    }

    /// Click on a city marker.
    ///
    /// Clicking the active city deselects it and relocks the label to its
    /// country.
    #[must_use]
    pub fn select_city(&self, city: CityRef<'_>, country: CountryRef<'_>) -> Self {
        if self.active_city.as_deref() == Some(city.code) {
            return Self {
                active_city: None,
                locked_label: Some(country.name.to_owned()),
                ..self.clone()
            };
        }
        let hovered_country = self
            .hovered_country
            .clone()
            .filter(|hovered| hovered != country.code);
        Self {
            active_country: Some(country.code.clone()),
            active_city: Some(city.code.to_owned()),
            hovered_country,
            hovered_city: None,
            hover_label: None,
            locked_label: Some(city.name.to_owned()),
        }
    }

    /// State of a country territory.
    #[must_use]
    pub fn territory_state(&self, code: &CountryCode) -> TerritoryState {
        if self.active_country.as_ref() == Some(code) {
            if self.active_city.is_some() {
                TerritoryState::ActiveWithCitySelected
            } else {
                TerritoryState::Active
            }
        } else if self.hovered_country.as_ref() == Some(code) {
            TerritoryState::Hovered
        } else {
            TerritoryState::Default
        }
    }

    /// State of a city marker.
    #[must_use]
    pub fn city_state(&self, code: &str) -> CityMarkerState {
        if self.active_city.as_deref() == Some(code) {
            CityMarkerState::Active
        } else if self.hovered_city.as_deref() == Some(code) {
            CityMarkerState::Hovered
        } else {
            CityMarkerState::Default
        }
    }

    /// Pin colour of a city marker belonging to `country`.
    #[must_use]
    pub fn city_tone(&self, code: &str, country: &CountryCode) -> MarkerTone {
        match self.city_state(code) {
            CityMarkerState::Active | CityMarkerState::Hovered => MarkerTone::Black,
            CityMarkerState::Default
                if self.active_country.as_ref() == Some(country)
                    || self.hovered_country.as_ref() == Some(country) =>
            {
                MarkerTone::White
            }
            CityMarkerState::Default => MarkerTone::Default,
        }
    }
}

/// City identity passed to [`SelectionState::select_city`].
#[derive(Debug, Clone, Copy)]
pub struct CityRef<'a> {
    pub code: &'a str,
    pub name: &'a str,
}

/// Country identity passed to [`SelectionState::select_city`].
#[derive(Debug, Clone, Copy)]
pub struct CountryRef<'a> {
    pub code: &'a CountryCode,
    pub name: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn norway() -> CountryCode {
        CountryCode::new("NO").expect("valid code")
    }

    fn bergen() -> CityRef<'static> {
        CityRef {
            code: "NO-BER",
            name: "Bergen",
        }
    }

    #[rstest]
    fn hover_shows_a_temporary_label(norway: CountryCode) {
        let hovered = SelectionState::default().hover_country(&norway, "Norway");
        assert_eq!(hovered.territory_state(&norway), TerritoryState::Hovered);
        assert_eq!(hovered.label(), Some("Norway"));
        assert!(!hovered.label_locked());

        let left = hovered.unhover_country(&norway);
        assert_eq!(left.territory_state(&norway), TerritoryState::Default);
        assert_eq!(left.label(), None);
    }

    #[rstest]
    fn hovering_the_active_country_changes_nothing(norway: CountryCode) {
        let active = SelectionState::default().select_country(&norway, "Norway");
        assert_eq!(active.hover_country(&norway, "Norway"), active);
        assert_eq!(active.territory_state(&norway), TerritoryState::Active);
    }

    #[rstest]
    fn unhover_restores_the_locked_label(norway: CountryCode) {
        let sweden = CountryCode::new("SE").expect("valid code");
        let state = SelectionState::default()
            .select_country(&norway, "Norway")
            .hover_country(&sweden, "Sweden");
        assert_eq!(state.label(), Some("Sweden"));
        let state = state.unhover_country(&sweden);
        assert_eq!(state.label(), Some("Norway"));
        assert!(state.label_locked());
    }

    #[rstest]
    fn selecting_a_city_activates_its_country(norway: CountryCode) {
        let country = CountryRef {
            code: &norway,
            name: "Norway",
        };
        let state = SelectionState::default().select_city(bergen(), country);
        assert_eq!(state.active_country(), Some(&norway));
        assert_eq!(state.active_city(), Some("NO-BER"));
        assert_eq!(
            state.territory_state(&norway),
            TerritoryState::ActiveWithCitySelected
        );
        assert_eq!(state.label(), Some("Bergen"));
    }

    #[rstest]
    fn deselecting_a_city_relocks_to_the_country(norway: CountryCode) {
        let country = CountryRef {
            code: &norway,
            name: "Norway",
        };
        let state = SelectionState::default()
            .select_city(bergen(), country)
            .select_city(bergen(), country);
        assert_eq!(state.active_city(), None);
        assert_eq!(state.territory_state(&norway), TerritoryState::Active);
        assert_eq!(state.label(), Some("Norway"));
    }

    #[rstest]
    fn deselecting_a_country_clears_city_and_label(norway: CountryCode) {
        let country = CountryRef {
            code: &norway,
            name: "Norway",
        };
        let state = SelectionState::default()
            .select_city(bergen(), country)
            .select_country(&norway, "Norway");
        assert_eq!(state.active_country(), None);
        assert_eq!(state.active_city(), None);
        assert_eq!(state.label(), None);
    }

    #[rstest]
    fn selection_is_single(norway: CountryCode) {
        let japan = CountryCode::new("JP").expect("valid code");
        let state = SelectionState::default()
            .select_city(
                bergen(),
                CountryRef {
                    code: &norway,
                    name: "Norway",
                },
            )
            .select_country(&japan, "Japan");
        assert_eq!(state.territory_state(&norway), TerritoryState::Default);
        assert_eq!(state.territory_state(&japan), TerritoryState::Active);
        assert_eq!(state.active_city(), None);
    }

    #[rstest]
    fn city_tones_follow_hover_and_selection(norway: CountryCode) {
        let idle = SelectionState::default();
        assert_eq!(idle.city_tone("NO-OSL", &norway), MarkerTone::Default);

        let country_hover = idle.hover_country(&norway, "Norway");
        assert_eq!(country_hover.city_tone("NO-OSL", &norway), MarkerTone::White);

        let city_hover = idle.hover_city("NO-OSL", "Oslo");
        assert_eq!(city_hover.city_tone("NO-OSL", &norway), MarkerTone::Black);
        assert_eq!(
            city_hover.unhover_city("NO-OSL").city_tone("NO-OSL", &norway),
            MarkerTone::Default
        );

        let active = idle.select_country(&norway, "Norway").hover_city("NO-OSL", "Oslo");
        assert_eq!(
            active.unhover_city("NO-OSL").city_tone("NO-OSL", &norway),
            MarkerTone::White
        );
    }

    #[rstest]
    fn hovering_the_active_city_is_suppressed(norway: CountryCode) {
        let state = SelectionState::default().select_city(
            bergen(),
            CountryRef {
                code: &norway,
                name: "Norway",
            },
        );
        assert_eq!(state.hover_city("NO-BER", "Bergen"), state);
        assert_eq!(state.city_state("NO-BER"), CityMarkerState::Active);
        assert_eq!(state.city_tone("NO-BER", &norway), MarkerTone::Black);
    }
}
