//! Graceful shutdown: fail liveness first, then drain the server.

use std::future::Future;

use actix_web::dev::ServerHandle;
use actix_web::web;
use tracing::{info, warn};

use backend::inbound::http::health::HealthState;

/// Resolve on Ctrl-C or, on Unix, `SIGTERM`.
pub(crate) async fn termination_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(%error, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                warn!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}

/// Wait for `signal`, mark the service unhealthy and stop the server
/// gracefully.
pub(crate) async fn drain_on<F>(
    signal: F,
    health_state: web::Data<HealthState>,
    handle: ServerHandle,
) where
    F: Future<Output = ()>,
{
    signal.await;
    info!("shutdown requested; failing liveness and draining connections");
    health_state.mark_unhealthy();
    handle.stop(true).await;
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpServer};

    use super::*;

    #[actix_web::test]
    async fn signal_fails_liveness_then_stops_server() {
        let health_state = web::Data::new(HealthState::new());
        let server = HttpServer::new(App::new)
            .workers(1)
            .disable_signals()
            .bind(("127.0.0.1", 0))
            .expect("bind ephemeral port")
            .run();
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);

        drain_on(std::future::ready(()), health_state.clone(), handle).await;

        assert!(!health_state.is_alive());
        running
            .await
            .expect("server task joins")
            .expect("server stops cleanly");
    }
}
