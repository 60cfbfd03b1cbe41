//! Backend entry-point: loads the explorer context and serves REST, WebSocket
//! and OpenAPI endpoints.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use adventure_map::domain::ports::{FixtureReferenceDataSource, ReferenceDataSource};
use adventure_map::domain::{ContextLoader, ExplorerContext};
use adventure_map::inbound::http::health::HealthState;
use adventure_map::inbound::http::session_config::{BuildMode, session_settings};
use adventure_map::outbound::catalogue::RegistryCatalogueSource;
use adventure_map::outbound::reference::NaturalEarthHttpSource;
use server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        ServerSettings::load().map_err(|error| eyre!("failed to load settings: {error}"))?;

    let session = session_settings(
        &settings.session_toggles()?,
        BuildMode::from_debug_assertions(),
    )
    .wrap_err("invalid session configuration")?;

    let context = load_context(&settings).await?;
    let bind_addr = settings.bind_addr()?;
    let config = ServerConfig::new(session, bind_addr)
        .with_allowed_origins(settings.allowed_origins()?)
        .with_debounce(settings.debounce());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), context, config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "explorer server listening");
    let outcome = server.await;
    health_state.mark_unhealthy();
    info!("explorer server stopped");
    outcome.wrap_err("server terminated abnormally")
}

async fn load_context(settings: &ServerSettings) -> Result<ExplorerContext> {
    let catalogue = Arc::new(match settings.catalogue_path()? {
        Some(path) => RegistryCatalogueSource::from_path(path),
        None => RegistryCatalogueSource::embedded(),
    });

    let reference: Arc<dyn ReferenceDataSource> = if settings.reference_enabled {
        Arc::new(
            NaturalEarthHttpSource::new(
                settings.reference_endpoints()?,
                settings.reference_timeout(),
            )
            .wrap_err("failed to build reference data client")?,
        )
    } else {
        info!("reference data disabled; serving without land layer");
        Arc::new(FixtureReferenceDataSource)
    };

    ContextLoader::new(catalogue, reference)
        .load()
        .await
        .map_err(|error| eyre!("failed to load explorer context: {}", error.message()))
}
