//! Letter HTTP handlers.
//!
//! ```text
//! GET  /
//! POST /letters
//! GET  /letters
//! GET  /nearby_letters?latitude=&longitude=&max_distance=
//! ```
//!
//! Field names are snake case to match the existing clients.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{
    CreateLetterRequest, FindNearbyLettersRequest, FindNearbyLettersResponse,
    ListLettersResponse,
};
use crate::domain::{LetterView, NearbyLetterView};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Confirmation returned after a letter is stored.
pub const LETTER_LEFT_MESSAGE: &str = "letter left";

/// Greeting returned by the root endpoint.
pub const GREETING_MESSAGE: &str = "Hello, world!";

/// Request payload for leaving a letter.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateLetterBody {
    /// Letter text: at least one non-whitespace character, at most 2000
    /// characters.
    #[schema(
        example = "Meet me by the fountain",
        min_length = 1,
        max_length = 2000,
        pattern = r"\S"
    )]
    pub content: String,
    #[schema(example = 35.681)]
    pub latitude: f64,
    #[schema(example = 139.767)]
    pub longitude: f64,
}

/// Single-message response body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

/// One letter in the unfiltered listing.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LetterBody {
    pub id: i64,
    pub content: String,
    #[schema(format = "date-time")]
    pub date_time: String,
    pub longitude: f64,
    pub latitude: f64,
}

impl From<LetterView> for LetterBody {
    fn from(view: LetterView) -> Self {
        Self {
            id: view.id.get(),
            content: view.content,
            date_time: view.created_at.to_rfc3339(),
            longitude: view.location.longitude(),
            latitude: view.location.latitude(),
        }
    }
}

/// Response for `GET /letters`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LettersBody {
    pub letters: Vec<LetterBody>,
}

impl From<ListLettersResponse> for LettersBody {
    fn from(response: ListLettersResponse) -> Self {
        Self {
            letters: response.letters.into_iter().map(LetterBody::from).collect(),
        }
    }
}

/// Query parameters for `GET /nearby_letters`.
#[derive(Debug, Clone, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NearbyLettersQuery {
    /// Latitude of the caller, in degrees.
    pub latitude: f64,
    /// Longitude of the caller, in degrees.
    pub longitude: f64,
    /// Search radius in metres; defaults to 50.
    pub max_distance: Option<f64>,
}

/// One letter near the caller. `content` is null beyond the disclosure
/// radius.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct NearbyLetterBody {
    pub id: i64,
    #[schema(nullable = true)]
    pub content: Option<String>,
    #[schema(format = "date-time")]
    pub date_time: String,
    pub longitude: f64,
    pub latitude: f64,
    /// Geodesic distance from the caller in metres.
    pub distance: f64,
}

impl From<NearbyLetterView> for NearbyLetterBody {
    fn from(view: NearbyLetterView) -> Self {
        Self {
            id: view.id.get(),
            content: view.content,
            date_time: view.created_at.to_rfc3339(),
            longitude: view.location.longitude(),
            latitude: view.location.latitude(),
            distance: view.distance_metres,
        }
    }
}

/// Response for `GET /nearby_letters`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct NearbyLettersBody {
    pub letters: Vec<NearbyLetterBody>,
}

impl From<FindNearbyLettersResponse> for NearbyLettersBody {
    fn from(response: FindNearbyLettersResponse) -> Self {
        Self {
            letters: response
                .letters
                .into_iter()
                .map(NearbyLetterBody::from)
                .collect(),
        }
    }
}

/// Greeting used as a connectivity check by clients.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Greeting", body = MessageBody)),
    tags = ["letters"],
    operation_id = "root"
)]
#[get("/")]
pub async fn root() -> web::Json<MessageBody> {
    web::Json(MessageBody::new(GREETING_MESSAGE))
}

/// Leave a letter at a location.
///
/// # Examples
/// ```no_run
/// use actix_web::web;
/// use backend::inbound::http::letters::{CreateLetterBody, MessageBody, create_letter};
/// use backend::inbound::http::{ApiResult, state::HttpState};
///
/// async fn call_handler(state: web::Data<HttpState>) -> ApiResult<web::Json<MessageBody>> {
///     let payload = web::Json(CreateLetterBody {
///         content: "hello".to_owned(),
///         latitude: 35.681,
///         longitude: 139.767,
///     });
///     create_letter(state, payload).await
/// }
/// ```
#[utoipa::path(
    post,
    path = "/letters",
    request_body = CreateLetterBody,
    responses(
        (status = 200, description = "Letter stored", body = MessageBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Letter store unavailable", body = ErrorSchema)
    ),
    tags = ["letters"],
    operation_id = "createLetter"
)]
#[post("/letters")]
pub async fn create_letter(
    state: web::Data<HttpState>,
    payload: web::Json<CreateLetterBody>,
) -> ApiResult<web::Json<MessageBody>> {
    let CreateLetterBody {
        content,
        latitude,
        longitude,
    } = payload.into_inner();

    let response = state
        .letters
        .create(CreateLetterRequest {
            content,
            longitude,
            latitude,
        })
        .await?;

    info!(letter_id = %response.letter_id, "letter left");
    Ok(web::Json(MessageBody::new(LETTER_LEFT_MESSAGE)))
}

/// Every letter, content included, for the map view.
#[utoipa::path(
    get,
    path = "/letters",
    responses(
        (status = 200, description = "All letters", body = LettersBody),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Letter store unavailable", body = ErrorSchema)
    ),
    tags = ["letters"],
    operation_id = "listLetters"
)]
#[get("/letters")]
pub async fn list_letters(state: web::Data<HttpState>) -> ApiResult<web::Json<LettersBody>> {
    let response = state.letters_query.list_all().await?;
    Ok(web::Json(LettersBody::from(response)))
}

/// Letters within `max_distance` metres, closest first. Content is only
/// revealed for letters within the disclosure radius.
#[utoipa::path(
    get,
    path = "/nearby_letters",
    params(NearbyLettersQuery),
    responses(
        (status = 200, description = "Letters near the caller", body = NearbyLettersBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Letter store unavailable", body = ErrorSchema)
    ),
    tags = ["letters"],
    operation_id = "nearbyLetters"
)]
#[get("/nearby_letters")]
pub async fn nearby_letters(
    state: web::Data<HttpState>,
    query: web::Query<NearbyLettersQuery>,
) -> ApiResult<web::Json<NearbyLettersBody>> {
    let NearbyLettersQuery {
        latitude,
        longitude,
        max_distance,
    } = query.into_inner();

    let response = state
        .letters_query
        .find_nearby(FindNearbyLettersRequest {
            longitude,
            latitude,
            radius_metres: max_distance,
        })
        .await?;

    Ok(web::Json(NearbyLettersBody::from(response)))
}

#[cfg(test)]
#[path = "letters_tests.rs"]
mod tests;
