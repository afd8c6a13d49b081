//! OpenAPI documentation for the letter API.
//!
//! Registers the letter and health endpoints plus the error envelope schema
//! wrappers. Served by Swagger UI in debug builds and printed by the
//! `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::letters::{
    CreateLetterBody, LetterBody, LettersBody, MessageBody, NearbyLetterBody, NearbyLettersBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Letters backend API",
        description = "Leave geotagged letters and read the ones left nearby."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::letters::root,
        crate::inbound::http::letters::create_letter,
        crate::inbound::http::letters::list_letters,
        crate::inbound::http::letters::nearby_letters,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateLetterBody,
        MessageBody,
        LetterBody,
        LettersBody,
        NearbyLetterBody,
        NearbyLettersBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "letters", description = "Leaving and discovering letters"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
