//! Domain ports for the hexagonal boundary.

mod catalogue_source;
mod reference_data_source;

#[cfg(test)]
pub use catalogue_source::MockCatalogueSource;
pub use catalogue_source::{CatalogueSource, CatalogueSourceError, FixtureCatalogueSource};
#[cfg(test)]
pub use reference_data_source::MockReferenceDataSource;
pub use reference_data_source::{
    FixtureReferenceDataSource, ReferenceDataError, ReferenceDataSource,
};
