//! Enrollment server entry-point: loads settings, wires adapters, and serves
//! the REST endpoints.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use enrollments::inbound::http::health::HealthState;
use enrollments::inbound::http::session_config::{BuildMode, session_settings_from_env};
use enrollments::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use enrollments::outbound::viacep::ViaCepLookup;
use enrollments::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|error| {
        std::io::Error::other(format!("failed to load settings: {error}"))
    })?;
    let session = session_settings_from_env(&DefaultEnv, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let lookup = ViaCepLookup::new(
        settings.viacep_base_url().map_err(std::io::Error::other)?,
        settings.viacep_timeout(),
    )
    .map_err(|error| std::io::Error::other(format!("failed to build ViaCEP client: {error}")))?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    )
    .with_postal_codes(Arc::new(lookup));

    if let Some(database_url) = settings.database_url() {
        let url = database_url.to_owned();
        let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
            .await
            .map_err(std::io::Error::other)?
            .map_err(std::io::Error::other)?;
        info!(applied, "database migrations up to date");

        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "enrollment server listening");
    server.await
}
