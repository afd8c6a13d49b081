//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the letter driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LetterCommand, LetterQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub letters: Arc<dyn LetterCommand>,
    pub letters_query: Arc<dyn LetterQuery>,
}

impl HttpState {
    /// Bundle the letter ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::LetterService;
    /// use backend::inbound::http::state::HttpState;
    /// use backend::outbound::memory::InMemoryLetterStore;
    ///
    /// let service = Arc::new(LetterService::new(Arc::new(InMemoryLetterStore::new())));
    /// let state = HttpState::new(service.clone(), service);
    /// # let _ = state;
    /// ```
    pub fn new(letters: Arc<dyn LetterCommand>, letters_query: Arc<dyn LetterQuery>) -> Self {
        Self {
            letters,
            letters_query,
        }
    }
}
