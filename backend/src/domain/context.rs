//! Read-only data every explorer request works against, and the startup
//! service that assembles it from the driven ports.

use std::sync::Arc;

use tracing::{info, warn};

use super::Error;
use super::catalogue::Catalogue;
use super::geo::Bounds;
use super::ports::{CatalogueSource, CatalogueSourceError, ReferenceDataSource};
use super::territory::{ReferenceData, TerritoryIndex};

/// Catalogue plus derived territory data, shared by all workers.
#[derive(Debug, Clone, Default)]
pub struct ExplorerContext {
    catalogue: Arc<Catalogue>,
    territories: Arc<TerritoryIndex>,
    land: Arc<[Bounds]>,
}

impl ExplorerContext {
    /// Derive the territory index from reference data.
    ///
    /// # Examples
    /// ```
    /// use adventure_map::domain::{Catalogue, ExplorerContext, ReferenceData};
    ///
    /// let context = ExplorerContext::new(Catalogue::default(), &ReferenceData::unavailable());
    /// assert!(!context.land_available());
    /// ```
    #[must_use]
    pub fn new(catalogue: Catalogue, reference: &ReferenceData) -> Self {
        let territories = TerritoryIndex::build(&catalogue, reference);
        Self {
            catalogue: Arc::new(catalogue),
            territories: Arc::new(territories),
            land: Arc::from(reference.land.as_slice()),
        }
    }

    /// Adventure catalogue.
    #[must_use]
    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// Territories joined from the catalogue and reference data.
    #[must_use]
    pub fn territories(&self) -> &TerritoryIndex {
        &self.territories
    }

    /// Bounds of each land polygon, empty when reference data is missing.
    #[must_use]
    pub fn land(&self) -> &[Bounds] {
        &self.land
    }

    /// Whether a land layer can be drawn.
    #[must_use]
    pub fn land_available(&self) -> bool {
        !self.land.is_empty()
    }
}

/// Startup service building an [`ExplorerContext`].
///
/// A catalogue failure is fatal. A reference data failure is logged and the
/// context is built without land or territories.
pub struct ContextLoader<C: ?Sized, R: ?Sized> {
    catalogue: Arc<C>,
    reference: Arc<R>,
}

impl<C: ?Sized, R: ?Sized> ContextLoader<C, R> {
    /// Create a loader over the given sources.
    pub fn new(catalogue: Arc<C>, reference: Arc<R>) -> Self {
        Self {
            catalogue,
            reference,
        }
    }
}

impl<C, R> ContextLoader<C, R>
where
    C: CatalogueSource + ?Sized,
    R: ReferenceDataSource + ?Sized,
{
    fn map_catalogue_error(error: CatalogueSourceError) -> Error {
        match error {
            CatalogueSourceError::Read { message } => {
                Error::service_unavailable(format!("catalogue unavailable: {message}"))
            }
            CatalogueSourceError::Invalid { message } => {
                Error::internal(format!("catalogue rejected: {message}"))
            }
        }
    }

    /// Load the catalogue and reference data.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] when the catalogue cannot be loaded.
    pub async fn load(&self) -> Result<ExplorerContext, Error> {
        let catalogue = self
            .catalogue
            .load()
            .await
            .map_err(Self::map_catalogue_error)?;

        let reference = match self.reference.fetch().await {
            Ok(reference) => reference,
            Err(err) => {
                warn!(error = %err, "reference data unavailable; continuing without land layer");
                ReferenceData::unavailable()
            }
        };

        let context = ExplorerContext::new(catalogue, &reference);
        info!(
            adventures = context.catalogue().adventures().len(),
            destinations = context.catalogue().destinations().len(),
            territories = context.territories().territories().len(),
            land_available = context.land_available(),
            "explorer context loaded"
        );
        Ok(context)
    }
}
