//! Letter server entry-point: loads settings, prepares the letter store and
//! serves the REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, run_pending_migrations};
use server::settings::LetterServerSettings;
use server::{ServerConfig, create_server, drain_on, termination_signal};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings = LetterServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let policy = settings.disclosure_policy()?;
    let mut config = ServerConfig::new(settings.bind_addr()?).with_policy(policy);

    if let Some(database_url) = settings.database_url() {
        if settings.run_migrations() {
            run_pending_migrations(database_url)
                .await
                .wrap_err("failed to migrate letter database")?;
        }
        let pool = DbPool::new(settings.pool_config(database_url))
            .await
            .wrap_err("failed to build database pool")?;
        info!("letter store backed by PostgreSQL");
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on(termination_signal(), health_state, server.handle()));
    server.await?;
    Ok(())
}
