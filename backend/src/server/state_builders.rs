//! Builders for the HTTP state port bundle.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use backend::domain::LetterService;
use backend::domain::ports::LetterStore;
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::InMemoryLetterStore;
use backend::outbound::persistence::DieselLetterStore;

use super::ServerConfig;

fn service_state<S>(store: S, config: &ServerConfig) -> HttpState
where
    S: LetterStore + 'static,
{
    let service = Arc::new(LetterService::new(Arc::new(store)).with_policy(config.policy));
    HttpState::new(service.clone(), service)
}

/// Wire the letter ports against PostgreSQL when a pool is configured,
/// otherwise against a process-local store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => service_state(DieselLetterStore::new(pool.clone()), config),
        None => {
            warn!("no database configured; letters are kept in memory and lost on restart");
            service_state(InMemoryLetterStore::new(), config)
        }
    };
    web::Data::new(state)
}
