//! Driven port over the spatial letter store.
//!
//! Adapters own connection handling, transactions and distance measurement.
//! The domain only sees validated points, radii and letter rows.

use async_trait::async_trait;

use crate::domain::{GeoPoint, Letter, LetterId, NearbyLetter, NewLetter, SearchRadius};

use super::define_port_error;

define_port_error! {
    /// Errors raised by letter store adapters.
    pub enum LetterStoreError {
        /// The store could not be reached or a connection could not be
        /// checked out.
        Connection => "letter store connection failed",
        /// A statement ran past the configured timeout.
        Timeout => "letter store query timed out",
        /// The store rejected a write that violates a schema constraint.
        Constraint => "letter store constraint violated",
        /// Any other query failure, including undecodable rows.
        Query => "letter store query failed",
    }
}

impl LetterStoreError {
    /// True for failures that say nothing about the request itself.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::Timeout { .. })
    }
}

/// Port for writing and reading geotagged letters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LetterStore: Send + Sync {
    /// Persist one letter and return its store-assigned identifier.
    ///
    /// The write is atomic: on error nothing is stored.
    async fn insert(&self, letter: &NewLetter) -> Result<LetterId, LetterStoreError>;

    /// Every stored letter. Order is unspecified but stable within a call.
    async fn list_all(&self) -> Result<Vec<Letter>, LetterStoreError>;

    /// Every letter whose geodesic distance to `origin` is at most `radius`
    /// metres, with that distance attached.
    async fn query_nearby(
        &self,
        origin: GeoPoint,
        radius: SearchRadius,
    ) -> Result<Vec<NearbyLetter>, LetterStoreError>;
}
