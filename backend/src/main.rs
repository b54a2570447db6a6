//! Backend entry-point: loads settings, prepares the store and serves the API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerSettings, build_http_state, create_server};
use social_backend::inbound::http::health::HealthState;
use social_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

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
        ServerSettings::load().map_err(|err| eyre!("failed to load server settings: {err}"))?;
    let bind_addr = settings
        .bind_addr()
        .wrap_err("SOCIAL_BIND_ADDR is not a socket address")?;

    let db_pool = prepare_database(&settings).await?;
    let health_state = web::Data::new(HealthState::new());
    let http_state = build_http_state(db_pool.as_ref());

    info!(%bind_addr, persistent = db_pool.is_some(), "starting server");
    let server = create_server(health_state.clone(), http_state, bind_addr)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    let result = server.await;
    health_state.mark_unhealthy();
    result.wrap_err("server terminated with an error")
}

/// Run migrations and open the connection pool when a database is configured.
async fn prepare_database(settings: &ServerSettings) -> Result<Option<DbPool>> {
    let Some(url) = settings.database_url() else {
        warn!("SOCIAL_DATABASE_URL is not set; using the in-memory store");
        return Ok(None);
    };

    let migration_url = url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&migration_url))
        .await
        .map_err(|err| eyre!("migration task failed: {err}"))?
        .wrap_err("failed to apply database migrations")?;
    info!(applied, "database migrations complete");

    let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.pool_max_size()))
        .await
        .wrap_err("failed to build database pool")?;
    Ok(Some(pool))
}
