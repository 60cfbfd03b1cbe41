//! Render an [`ExplorerState`] into everything the client draws.
//!
//! The view is a pure function of the context, the state and the device
//! profile. Cards and price markers follow filter order; overlays and city
//! markers follow catalogue order.

use std::collections::HashSet;

use serde::Serialize;

use super::adventure::{Adventure, CountryCode, Difficulty, Typology};
use super::catalogue::Catalogue;
use super::context::ExplorerContext;
use super::explorer::ExplorerState;
use super::filter::{FilterState, apply_filters};
use super::geo::{DeviceProfile, LatLng, MapView, adventure_view, city_view, fit_results};
use super::search::format_price;
use super::selection::{CityMarkerState, MarkerTone, TerritoryState};

/// One card of the result list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultCard {
    /// Adventure id.
    pub id: String,
    /// Adventure title.
    pub name: String,
    /// Country the adventure runs in.
    pub country_name: String,
    /// ISO code of that country.
    pub country_code: CountryCode,
    /// Trip length in days.
    pub duration_days: u32,
    /// Difficulty level.
    pub difficulty: Difficulty,
    /// Trip typology.
    pub typology: Typology,
    /// Effective price.
    pub display_price: u32,
    /// Effective price as shown on the card.
    pub formatted_price: String,
    /// Struck-through list price, present only for sale items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<String>,
    /// Whether a sale price applies.
    pub on_sale: bool,
    /// Card image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Booking page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Whether the card is the focused adventure.
    pub active: bool,
}

impl ResultCard {
    fn new(adventure: &Adventure, active: bool) -> Self {
        let pricing = adventure.pricing();
        let display_price = adventure.effective_price();
        let on_sale = pricing.on_sale();
        Self {
            id: adventure.id().to_owned(),
            name: adventure.name().to_owned(),
            country_name: adventure.country_name().to_owned(),
            country_code: adventure.country_code().clone(),
            duration_days: adventure.duration_days(),
            difficulty: adventure.difficulty(),
            typology: adventure.typology(),
            display_price,
            formatted_price: format_price(display_price),
            original_price: on_sale.then(|| format_price(pricing.price())),
            on_sale,
            image_url: adventure.image_url().map(str::to_owned),
            url: adventure.url().map(str::to_owned),
            active,
        }
    }
}

/// Price pin for a filtered adventure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceMarker {
    /// Adventure id.
    pub id: String,
    /// Adventure coordinates.
    #[serde(flatten)]
    pub location: LatLng,
    /// Formatted effective price.
    pub label: String,
    /// Whether a sale price applies.
    pub on_sale: bool,
    /// Whether the adventure is focused.
    pub active: bool,
}

/// Highlight state of one country territory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TerritoryOverlay {
    /// Country ISO code.
    pub code: CountryCode,
    /// Country name.
    pub name: String,
    /// Selection state.
    pub state: TerritoryState,
    /// Whether any filtered adventure sits in this country.
    pub has_results: bool,
}

/// One city marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityMarker {
    /// Destination city code.
    pub code: String,
    /// City name.
    pub name: String,
    /// ISO code of the parent country.
    pub country_code: CountryCode,
    /// City coordinates.
    #[serde(flatten)]
    pub location: LatLng,
    /// Selection state.
    pub state: CityMarkerState,
    /// Pin colour.
    pub tone: MarkerTone,
}

/// Floating map label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLabel {
    /// Country or city name.
    pub text: String,
    /// Locked labels survive hover-out.
    pub locked: bool,
}

/// Everything the client needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerView {
    /// Result cards in filter order.
    pub cards: Vec<ResultCard>,
    /// One price pin per card.
    pub price_markers: Vec<PriceMarker>,
    /// Overlay per territory, in catalogue order.
    pub territories: Vec<TerritoryOverlay>,
    /// Marker per destination city, in catalogue order.
    pub city_markers: Vec<CityMarker>,
    /// Floating label, if one is shown.
    pub label: Option<MapLabel>,
    /// Viewport to fly to.
    pub map_view: MapView,
    /// Number of filtered adventures.
    pub result_count: usize,
    /// The "clear all" control is disabled while every filter is at its
    /// default.
    pub clear_all_enabled: bool,
    /// Whether the client can draw a land layer.
    pub land_available: bool,
}

/// Result cards for a filter state, in filter order.
///
/// # Examples
/// ```
/// use adventure_map::domain::{Catalogue, FilterState, view::cards_for};
///
/// let catalogue = Catalogue::default();
/// assert!(cards_for(&catalogue, &FilterState::defaults_for(&catalogue), None).is_empty());
/// ```
#[must_use]
pub fn cards_for(
    catalogue: &Catalogue,
    filters: &FilterState,
    active_adventure: Option<&str>,
) -> Vec<ResultCard> {
    apply_filters(catalogue, filters)
        .into_iter()
        .map(|adventure| ResultCard::new(adventure, Some(adventure.id()) == active_adventure))
        .collect()
}

/// Render the current state.
///
/// The map viewport is chosen in this order: active city, active country,
/// focused adventure when it is still among the results, fit over all
/// results, world view.
#[must_use]
pub fn render(
    context: &ExplorerContext,
    state: &ExplorerState,
    device: &DeviceProfile,
) -> ExplorerView {
    let catalogue = context.catalogue();
    let results = apply_filters(catalogue, &state.filters);
    let active_adventure = state.active_adventure.as_deref();

    let cards: Vec<ResultCard> = results
        .iter()
        .map(|adventure| ResultCard::new(adventure, Some(adventure.id()) == active_adventure))
        .collect();

    let price_markers = cards
        .iter()
        .zip(&results)
        .map(|(card, adventure)| PriceMarker {
            id: card.id.clone(),
            location: adventure.location(),
            label: card.formatted_price.clone(),
            on_sale: card.on_sale,
            active: card.active,
        })
        .collect();

    let countries_with_results: HashSet<&CountryCode> =
        results.iter().map(|adventure| adventure.country_code()).collect();
    let selection = &state.selection;

    let territories = context
        .territories()
        .territories()
        .iter()
        .map(|territory| TerritoryOverlay {
            code: territory.code().clone(),
            name: territory.name().to_owned(),
            state: selection.territory_state(territory.code()),
            has_results: countries_with_results.contains(territory.code()),
        })
        .collect();

    let city_markers = catalogue
        .destinations()
        .iter()
        .flat_map(|destination| {
            destination.cities().iter().map(move |city| CityMarker {
                code: city.code().to_owned(),
                name: city.name().to_owned(),
                country_code: destination.code().clone(),
                location: city.location(),
                state: selection.city_state(city.code()),
                tone: selection.city_tone(city.code(), destination.code()),
            })
        })
        .collect();

    let label = selection.label().map(|text| MapLabel {
        text: text.to_owned(),
        locked: selection.label_locked(),
    });

    let map_view = if let Some((_, city)) = selection
        .active_city()
        .and_then(|code| catalogue.find_city(code))
    {
        city_view(city.location())
    } else if let Some(code) = selection.active_country() {
        context.territories().country_view(code)
    } else if let Some(adventure) = results
        .iter()
        .find(|adventure| Some(adventure.id()) == active_adventure)
    {
        adventure_view(adventure.location())
    } else {
        let points: Vec<LatLng> = results.iter().map(|adventure| adventure.location()).collect();
        fit_results(&points, device)
    };

    ExplorerView {
        result_count: cards.len(),
        cards,
        price_markers,
        territories,
        city_markers,
        label,
        map_view,
        clear_all_enabled: !state.filters.is_default_for(catalogue),
        land_available: context.land_available(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalogue::test_support::embedded;
    use crate::domain::explorer::{ExplorerAction, reduce};
    use crate::domain::geo::{Bounds, CITY_FOCUS_ZOOM};
    use crate::domain::territory::{CountryFeature, ReferenceData};
    use rstest::{fixture, rstest};

    #[fixture]
    fn context() -> ExplorerContext {
        let reference = ReferenceData {
            land: vec![Bounds::from_corners(
                LatLng::new(-60.0, -180.0),
                LatLng::new(85.0, 180.0),
            )],
            countries: vec![CountryFeature {
                iso_a2: Some("IS".to_owned()),
                admin: Some("Iceland".to_owned()),
                name: Some("Iceland".to_owned()),
                polygons: vec![Bounds::from_corners(
                    LatLng::new(63.3, -24.5),
                    LatLng::new(66.6, -13.5),
                )],
            }],
        };
        ExplorerContext::new(embedded(), &reference)
    }

    fn apply(context: &ExplorerContext, actions: Vec<ExplorerAction>) -> ExplorerState {
        actions
            .into_iter()
            .try_fold(ExplorerState::initial(context.catalogue()), |state, action| {
                reduce(context.catalogue(), &state, action)
            })
            .expect("valid actions")
    }

    #[rstest]
    fn initial_view_fits_every_result(context: ExplorerContext) {
        let view = render(
            &context,
            &ExplorerState::initial(context.catalogue()),
            &DeviceProfile::default(),
        );
        assert_eq!(view.result_count, 14);
        assert_eq!(view.price_markers.len(), 14);
        assert!(!view.clear_all_enabled);
        assert!(view.land_available);
        assert!(matches!(view.map_view, MapView::Fit { max_zoom: 5, .. }));
        assert_eq!(view.label, None);
    }

    #[rstest]
    fn sale_cards_show_both_prices(context: ExplorerContext) {
        let view = render(
            &context,
            &ExplorerState::initial(context.catalogue()),
            &DeviceProfile::default(),
        );
        let norway = view
            .cards
            .iter()
            .find(|card| card.id == "norway-001")
            .expect("norway card");
        assert_eq!(norway.formatted_price, "€1,980");
        assert_eq!(norway.original_price.as_deref(), Some("€2,200"));
        assert!(norway.on_sale);
    }

    #[rstest]
    fn empty_results_fall_back_to_the_world(context: ExplorerContext) {
        let state = apply(
            &context,
            vec![ExplorerAction::SetSearch {
                query: "no such trip".into(),
            }],
        );
        let view = render(&context, &state, &DeviceProfile::default());
        assert_eq!(view.result_count, 0);
        assert_eq!(view.map_view, MapView::world());
        assert!(view.clear_all_enabled);
        assert!(view.territories.iter().all(|overlay| !overlay.has_results));
    }

    #[rstest]
    fn active_city_takes_precedence(context: ExplorerContext) {
        let state = apply(
            &context,
            vec![
                ExplorerAction::SelectAdventure {
                    id: "iceland-001".into(),
                },
                ExplorerAction::SelectCity {
                    code: "IS-AKU".into(),
                },
            ],
        );
        let view = render(&context, &state, &DeviceProfile::default());
        assert!(matches!(
            view.map_view,
            MapView::Center { zoom, .. } if zoom == CITY_FOCUS_ZOOM
        ));
        let overlay = view.territories.first().expect("iceland overlay");
        assert_eq!(overlay.state, TerritoryState::ActiveWithCitySelected);
        let akureyri = view
            .city_markers
            .iter()
            .find(|marker| marker.code == "IS-AKU")
            .expect("akureyri marker");
        assert_eq!(akureyri.tone, MarkerTone::Black);
        let reykjavik = view
            .city_markers
            .iter()
            .find(|marker| marker.code == "IS-REY")
            .expect("reykjavik marker");
        assert_eq!(reykjavik.tone, MarkerTone::White);
        assert_eq!(
            view.label,
            Some(MapLabel {
                text: "Akureyri".into(),
                locked: true
            })
        );
    }

    #[rstest]
    fn active_country_fits_its_mainland(context: ExplorerContext) {
        let state = apply(
            &context,
            vec![ExplorerAction::SelectCountry { code: "IS".into() }],
        );
        let view = render(&context, &state, &DeviceProfile::default());
        assert!(matches!(view.map_view, MapView::Fit { max_zoom: 8, .. }));
    }

    #[rstest]
    fn focused_adventure_is_ignored_once_filtered_out(context: ExplorerContext) {
        let focused = apply(
            &context,
            vec![ExplorerAction::SelectAdventure {
                id: "peru-001".into(),
            }],
        );
        let view = render(&context, &focused, &DeviceProfile::default());
        assert!(matches!(view.map_view, MapView::Center { zoom: 6, .. }));

        let filtered = reduce(
            context.catalogue(),
            &focused,
            ExplorerAction::FilterToCountry { code: "JP".into() },
        )
        .expect("filter to japan");
        let view = render(&context, &filtered, &DeviceProfile::default());
        assert!(matches!(view.map_view, MapView::Fit { .. }));
        assert!(view.cards.iter().all(|card| !card.active));
    }
}
