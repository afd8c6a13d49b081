//! Domain primitives, policy and services.
//!
//! Purpose: model letters, coordinates and the disclosure rule without any
//! knowledge of HTTP or SQL. Inbound adapters talk to the driving ports in
//! [`ports`]; outbound adapters implement [`ports::LetterStore`].
//!
//! Public surface:
//! - `Error` / `ErrorCode` — transport-agnostic failure payload.
//! - `GeoPoint`, `SearchRadius`, `geodesic_distance_metres` — geography.
//! - `DisclosurePolicy`, `disclosure_decision` — content redaction rule.
//! - `Letter`, `LetterView`, `NearbyLetterView` — entity and projections.
//! - `LetterService` — implementation of the letter driving ports.

pub mod disclosure;
pub mod error;
pub mod geo;
pub mod letter;
mod letter_service;
pub mod ports;
pub mod trace_id;

pub use self::disclosure::{
    DEFAULT_SEARCH_RADIUS_METRES, DISCLOSURE_RADIUS_METRES, Disclosure, DisclosurePolicy,
    DisclosurePolicyError, disclosure_decision,
};
pub use self::error::{Error, ErrorCode};
pub use self::geo::{
    GeoPoint, GeoPointValidationError, MEAN_EARTH_RADIUS_METRES, SRID_WGS84, SearchRadius,
    SearchRadiusValidationError, geodesic_distance_metres,
};
pub use self::letter::{
    Letter, LetterContent, LetterContentValidationError, LetterId, LetterView,
    MAX_CONTENT_CHARS, NearbyLetter, NearbyLetterView, NewLetter,
};
pub use self::letter_service::LetterService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
