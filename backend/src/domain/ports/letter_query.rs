//! Driving port for reading letters.
//!
//! Inbound adapters use this port for the unfiltered map view and for
//! proximity queries without depending on the store.

use async_trait::async_trait;

use crate::domain::{Error, LetterView, NearbyLetterView};

/// Every stored letter with content visible.
#[derive(Debug, Clone, PartialEq)]
pub struct ListLettersResponse {
    pub letters: Vec<LetterView>,
}

/// Unvalidated proximity query.
///
/// `radius_metres` falls back to the server's default search radius when
/// absent. There is deliberately no way to pass a disclosure radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FindNearbyLettersRequest {
    pub longitude: f64,
    pub latitude: f64,
    pub radius_metres: Option<f64>,
}

/// Letters within the search radius, closest first.
#[derive(Debug, Clone, PartialEq)]
pub struct FindNearbyLettersResponse {
    pub letters: Vec<NearbyLetterView>,
}

/// Driving port for letter reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LetterQuery: Send + Sync {
    /// List every letter without redaction.
    async fn list_all(&self) -> Result<ListLettersResponse, Error>;

    /// List letters near a point, redacting content beyond the disclosure
    /// radius.
    async fn find_nearby(
        &self,
        request: FindNearbyLettersRequest,
    ) -> Result<FindNearbyLettersResponse, Error>;
}
