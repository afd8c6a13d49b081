//! Letter domain service.
//!
//! Implements the letter driving ports on top of a [`LetterStore`]: input
//! validation for writes, the unfiltered listing, and proximity queries with
//! distance-gated disclosure. Every store failure is resolved into a domain
//! [`Error`] here; nothing adapter-specific escapes.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error, warn};

use crate::domain::ports::{
    CreateLetterRequest, CreateLetterResponse, FindNearbyLettersRequest,
    FindNearbyLettersResponse, LetterCommand, LetterQuery, LetterStore, LetterStoreError,
    ListLettersResponse,
};
use crate::domain::{
    DisclosurePolicy, Error, GeoPoint, GeoPointValidationError, LetterContent,
    LetterContentValidationError, LetterView, NearbyLetterView, NewLetter, SearchRadius,
    SearchRadiusValidationError,
};

const STORE_UNAVAILABLE_MESSAGE: &str = "letter store is temporarily unavailable";

fn map_store_error(operation: &'static str, err: LetterStoreError) -> Error {
    if err.is_unavailable() {
        warn!(operation, error = %err, "letter store unavailable");
        Error::service_unavailable(STORE_UNAVAILABLE_MESSAGE)
    } else {
        error!(operation, error = %err, "letter store operation failed");
        Error::internal(format!("{operation} failed: {err}"))
    }
}

fn invalid_content(err: LetterContentValidationError) -> Error {
    let code = match err {
        LetterContentValidationError::Empty => "empty_content",
        LetterContentValidationError::TooLong { .. } => "content_too_long",
    };
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": "content",
        "code": code,
    }))
}

fn invalid_point(err: GeoPointValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": "coordinate_out_of_range",
    }))
}

fn invalid_radius(err: SearchRadiusValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": "max_distance",
        "code": "invalid_search_radius",
    }))
}

/// Letter service implementing [`LetterCommand`] and [`LetterQuery`].
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use backend::domain::LetterService;
/// use backend::domain::ports::{CreateLetterRequest, LetterCommand};
/// use backend::outbound::memory::InMemoryLetterStore;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let service = LetterService::new(Arc::new(InMemoryLetterStore::new()));
/// let created = service
///     .create(CreateLetterRequest {
///         content: "hello".to_owned(),
///         longitude: 139.767,
///         latitude: 35.681,
///     })
///     .await
///     .expect("letter stored");
/// assert_eq!(created.letter_id.get(), 1);
/// # });
/// ```
#[derive(Clone)]
pub struct LetterService<S> {
    store: Arc<S>,
    policy: DisclosurePolicy,
}

impl<S> LetterService<S> {
    /// Create a service over `store` using the default disclosure policy.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            policy: DisclosurePolicy::default(),
        }
    }

    /// Replace the disclosure policy.
    #[must_use]
    pub fn with_policy(mut self, policy: DisclosurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The policy applied to nearby queries.
    pub fn policy(&self) -> DisclosurePolicy {
        self.policy
    }
}

#[async_trait]
impl<S> LetterCommand for LetterService<S>
where
    S: LetterStore,
{
    async fn create(&self, request: CreateLetterRequest) -> Result<CreateLetterResponse, Error> {
        let CreateLetterRequest {
            content,
            longitude,
            latitude,
        } = request;
        let content = LetterContent::new(content).map_err(invalid_content)?;
        let location = GeoPoint::new(longitude, latitude).map_err(invalid_point)?;

        let letter_id = self
            .store
            .insert(&NewLetter { content, location })
            .await
            .map_err(|err| map_store_error("insert letter", err))?;

        debug!(%letter_id, "letter stored");
        Ok(CreateLetterResponse { letter_id })
    }
}

#[async_trait]
impl<S> LetterQuery for LetterService<S>
where
    S: LetterStore,
{
    async fn list_all(&self) -> Result<ListLettersResponse, Error> {
        let letters = self
            .store
            .list_all()
            .await
            .map_err(|err| map_store_error("list letters", err))?;

        Ok(ListLettersResponse {
            letters: letters.into_iter().map(LetterView::from).collect(),
        })
    }

    async fn find_nearby(
        &self,
        request: FindNearbyLettersRequest,
    ) -> Result<FindNearbyLettersResponse, Error> {
        let origin =
            GeoPoint::new(request.longitude, request.latitude).map_err(invalid_point)?;
        let radius = SearchRadius::new(
            request
                .radius_metres
                .unwrap_or(self.policy.default_search_radius_metres()),
        )
        .map_err(invalid_radius)?;

        if radius.selects_nothing() {
            return Ok(FindNearbyLettersResponse {
                letters: Vec::new(),
            });
        }

        let rows = self
            .store
            .query_nearby(origin, radius)
            .await
            .map_err(|err| map_store_error("query nearby letters", err))?;

        let mut letters: Vec<NearbyLetterView> = rows
            .into_iter()
            .map(|row| {
                let disclosure = self.policy.decide(row.distance_metres);
                NearbyLetterView::project(row, disclosure)
            })
            .collect();
        letters.sort_by(|a, b| {
            a.distance_metres
                .total_cmp(&b.distance_metres)
                .then_with(|| a.id.cmp(&b.id))
        });

        debug!(
            found = letters.len(),
            radius_metres = radius.metres(),
            "nearby letters resolved"
        );
        Ok(FindNearbyLettersResponse { letters })
    }
}

#[cfg(test)]
#[path = "letter_service_tests.rs"]
mod tests;
