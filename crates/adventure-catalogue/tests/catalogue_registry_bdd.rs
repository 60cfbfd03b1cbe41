//! Behavioural tests for the adventure-catalogue crate.
//!
//! These scenarios cover loading the embedded catalogue and the structural
//! checks applied to registry documents.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use adventure_catalogue::{CatalogueRegistry, RegistryError, is_valid_city_code};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

const VALID_REGISTRY_JSON: &str = r#"{
    "version": 1,
    "adventures": [{
        "id": "peru-001",
        "name": "Machu Picchu Trek",
        "country": "Peru",
        "countryCode": "PE",
        "lat": -13.1631,
        "lng": -72.545,
        "duration": 7,
        "difficulty": "Difficult",
        "typology": "Sports Activities",
        "price": 1650,
        "salePrice": null,
        "onSale": false
    }],
    "destinations": [{
        "code": "PE",
        "name": "Peru",
        "cities": [{"code": "PE-CUZ", "name": "Cusco", "lat": -13.532, "lng": -71.9675}]
    }]
}"#;

#[derive(Default, ScenarioState)]
struct World {
    json_input: Slot<String>,
    registry_result: Slot<Result<CatalogueRegistry, RegistryError>>,
}

impl World {
    fn registry(&self) -> CatalogueRegistry {
        self.registry_result
            .get()
            .expect("registry should be set")
            .expect("registry should be valid")
    }

    fn registry_result(&self) -> Result<CatalogueRegistry, RegistryError> {
        self.registry_result
            .get()
            .expect("registry result should be set")
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

#[given("the embedded catalogue")]
fn the_embedded_catalogue(world: &World) {
    world.registry_result.set(CatalogueRegistry::embedded());
}

#[given("a valid catalogue registry JSON")]
fn a_valid_catalogue_registry_json(world: &World) {
    world.json_input.set(VALID_REGISTRY_JSON.to_owned());
}

#[given("malformed catalogue JSON")]
fn malformed_catalogue_json(world: &World) {
    world.json_input.set("{ not json".to_owned());
}

#[given("a catalogue registry JSON with a repeated adventure id")]
fn a_catalogue_registry_json_with_a_repeated_adventure_id(world: &World) {
    let mut value: serde_json::Value =
        serde_json::from_str(VALID_REGISTRY_JSON).expect("fixture JSON parses");
    let adventures = value
        .get_mut("adventures")
        .and_then(serde_json::Value::as_array_mut)
        .expect("adventures array");
    let first = adventures.first().cloned().expect("one adventure");
    adventures.push(first);
    world.json_input.set(value.to_string());
}

#[given("a catalogue registry JSON with latitude {lat:i32}")]
fn a_catalogue_registry_json_with_latitude(world: &World, lat: i32) {
    let json = VALID_REGISTRY_JSON.replace("-13.1631", &lat.to_string());
    world.json_input.set(json);
}

#[when("the registry is parsed")]
fn the_registry_is_parsed(world: &World) {
    let json = world.json_input.get().expect("json input should be set");
    world.registry_result.set(CatalogueRegistry::from_json(&json));
}

#[then("parsing succeeds")]
fn parsing_succeeds(world: &World) {
    assert!(world.registry_result().is_ok());
}

#[then("the catalogue lists {count:usize} adventures")]
fn the_catalogue_lists_adventures(world: &World, count: usize) {
    assert_eq!(world.registry().adventures().len(), count);
}

#[then("every destination city belongs to its country")]
fn every_destination_city_belongs_to_its_country(world: &World) {
    for destination in world.registry().destinations() {
        for city in &destination.cities {
            assert!(
                is_valid_city_code(&city.code, &destination.code),
                "city {} outside {}",
                city.code,
                destination.code
            );
        }
    }
}

#[then("parsing fails with a parse error")]
fn parsing_fails_with_a_parse_error(world: &World) {
    match world.registry_result() {
        Err(RegistryError::ParseError { .. }) => {}
        other => panic!("Expected ParseError, got: {other:?}"),
    }
}

#[then("parsing fails with a duplicate adventure id error")]
fn parsing_fails_with_a_duplicate_adventure_id_error(world: &World) {
    match world.registry_result() {
        Err(RegistryError::DuplicateAdventureId { id }) => assert_eq!(id, "peru-001"),
        other => panic!("Expected DuplicateAdventureId, got: {other:?}"),
    }
}

#[then("parsing fails with an invalid coordinates error")]
fn parsing_fails_with_an_invalid_coordinates_error(world: &World) {
    match world.registry_result() {
        Err(RegistryError::InvalidCoordinates { .. }) => {}
        other => panic!("Expected InvalidCoordinates, got: {other:?}"),
    }
}

#[scenario(
    path = "tests/features/catalogue_registry.feature",
    name = "Embedded catalogue loads"
)]
fn embedded_catalogue_loads(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/catalogue_registry.feature",
    name = "Valid registry parses successfully"
)]
fn valid_registry_parses_successfully(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/catalogue_registry.feature",
    name = "Invalid JSON fails parsing"
)]
fn invalid_json_fails_parsing(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/catalogue_registry.feature",
    name = "Duplicate adventure ids fail parsing"
)]
fn duplicate_adventure_ids_fail_parsing(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/catalogue_registry.feature",
    name = "Out of range coordinates fail parsing"
)]
fn out_of_range_coordinates_fail_parsing(world: World) {
    let _ = world;
}
