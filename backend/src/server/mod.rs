//! Server construction and middleware wiring.

mod app;
mod config;
pub mod settings;
mod shutdown;
mod state_builders;

pub use config::ServerConfig;
pub(crate) use shutdown::{drain_on, termination_signal};

use actix_web::dev::Server;
use actix_web::{HttpServer, web};
use tracing::info;

use app::build_app;
use backend::inbound::http::health::HealthState;
use state_builders::build_http_state;

/// Bind the HTTP server.
///
/// Readiness is flagged once the socket is bound; the letter store must
/// already be initialised. Signal handling is left to [`drain_on`].
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "letter server listening");
    health_state.mark_ready();
    Ok(server)
}
