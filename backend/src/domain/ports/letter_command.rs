//! Driving port for writing letters.

use async_trait::async_trait;

use crate::domain::{Error, LetterId};

/// Unvalidated input for leaving a letter.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateLetterRequest {
    pub content: String,
    pub longitude: f64,
    pub latitude: f64,
}

/// Result of a successful write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateLetterResponse {
    pub letter_id: LetterId,
}

/// Driving port for letter writes.
///
/// Validation failures surface as [`crate::domain::ErrorCode::InvalidRequest`]
/// and leave the store untouched.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LetterCommand: Send + Sync {
    /// Validate and persist one letter.
    async fn create(&self, request: CreateLetterRequest) -> Result<CreateLetterResponse, Error>;
}
