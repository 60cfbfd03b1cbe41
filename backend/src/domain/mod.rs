//! Domain primitives, aggregates and pure explorer logic.
//!
//! Purpose: hold everything the explorer computes without touching a
//! transport. Types are immutable; state transitions return new values.
//!
//! Public surface:
//! - Error, ErrorCode: transport-agnostic error payload.
//! - Catalogue, Adventure, Destination, City: validated read-only data.
//! - FilterState, apply_filters: the filter engine.
//! - search, highlight_match, format_price: dropdown search.
//! - geo: bounds, zoom and mainland heuristics.
//! - SelectionState: territory and city selection machine.
//! - ExplorerState, ExplorerAction, reduce, render: the explorer loop.

pub mod adventure;
pub mod catalogue;
pub mod context;
pub mod error;
pub mod explorer;
pub mod filter;
pub mod geo;
pub mod ports;
pub mod search;
pub mod selection;
pub mod territory;
pub mod trace_id;
pub mod view;

pub use self::adventure::{
    Adventure, AdventureDraft, AdventureValidationError, CountryCode, Difficulty, Pricing,
    Typology,
};
pub use self::catalogue::{Catalogue, CatalogueError, City, CountryOption, Destination};
pub use self::context::{ContextLoader, ExplorerContext};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::explorer::{
    DebounceClass, ExplorerAction, ExplorerError, ExplorerState, FilterToggle, reduce,
};
pub use self::filter::{DateRange, FilterError, FilterState, PriceRange, apply_filters};
pub use self::search::{DEFAULT_MAX_RESULTS, SearchResult, format_price, highlight_match, search};
pub use self::selection::{CityMarkerState, MarkerTone, SelectionState, TerritoryState};
pub use self::territory::{CountryFeature, ReferenceData, Territory, TerritoryIndex};
pub use self::trace_id::TraceId;
pub use self::view::{
    CityMarker, ExplorerView, MapLabel, PriceMarker, ResultCard, TerritoryOverlay, cards_for,
    render,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use adventure_map::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such adventure"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
