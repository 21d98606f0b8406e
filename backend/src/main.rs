//! Backend entry-point: loads settings, migrates the database, wires the
//! Diesel-backed services into the HTTP adapter and serves `/api/v1`.

mod server;

use std::ffi::OsString;

use actix_web::web;
use color_eyre::eyre::{WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use campus_backend::inbound::http::health::HealthState;
use campus_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use campus_backend::settings::CampusSettings;

use server::{ServerConfig, TokenSettings, build_http_state, create_server};

#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args: Vec<OsString> = std::env::args_os().collect();
    let settings =
        CampusSettings::load_from_iter(args).map_err(|e| eyre!("failed to load settings: {e}"))?;

    let database_url = settings.database_url()?;
    let bind_addr = settings.bind_addr()?;
    let secret = settings.jwt_secret()?;

    if settings.run_migrations() {
        run_pending_migrations(database_url)
            .await
            .wrap_err("database migration failed")?;
    } else {
        info!("skipping migrations");
    }

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size))
        .await
        .wrap_err("failed to build database pool")?;

    let http_state = build_http_state(
        &pool,
        TokenSettings {
            secret: &secret,
            issuer: settings.jwt_issuer(),
        },
        settings.cookie_secure(),
    );
    drop(secret);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(bind_addr, http_state),
    )
    .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "campus backend listening");

    server.await?;
    health_state.mark_unhealthy();
    Ok(())
}
