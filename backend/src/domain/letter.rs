//! Letter aggregate and its per-query read projections.
//!
//! A letter is written once and never changed. The store owns the durable
//! record; [`LetterView`] and [`NearbyLetterView`] are computed for a single
//! query and never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::disclosure::Disclosure;
use super::geo::GeoPoint;

/// Maximum letter length in Unicode scalar values.
pub const MAX_CONTENT_CHARS: usize = 2000;

/// Store-assigned letter identifier. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LetterId(i64);

impl LetterId {
    /// Wrap a raw identifier issued by a store.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for LetterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reasons letter text is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LetterContentValidationError {
    /// Content is empty or only whitespace.
    #[error("content must not be empty")]
    Empty,
    /// Content exceeds [`MAX_CONTENT_CHARS`].
    #[error("content must be at most {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Validated letter text.
///
/// ## Invariants
/// - Contains at least one non-whitespace character.
/// - At most [`MAX_CONTENT_CHARS`] characters.
///
/// The text is stored exactly as written; surrounding whitespace is kept.
///
/// # Examples
/// ```
/// use backend::domain::LetterContent;
///
/// assert!(LetterContent::new("hello").is_ok());
/// assert!(LetterContent::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterContent(String);

impl LetterContent {
    /// Validate letter text.
    pub fn new(content: impl Into<String>) -> Result<Self, LetterContentValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(LetterContentValidationError::Empty);
        }
        let actual = content.chars().count();
        if actual > MAX_CONTENT_CHARS {
            return Err(LetterContentValidationError::TooLong {
                max: MAX_CONTENT_CHARS,
                actual,
            });
        }
        Ok(Self(content))
    }

    /// Borrow the text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for LetterContent {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// A letter ready to be written to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLetter {
    pub content: LetterContent,
    pub location: GeoPoint,
}

/// A persisted letter as read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Letter {
    pub id: LetterId,
    pub content: String,
    pub location: GeoPoint,
    pub created_at: DateTime<Utc>,
}

/// A persisted letter together with its distance to a query point.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyLetter {
    pub letter: Letter,
    pub distance_metres: f64,
}

/// Unfiltered projection used by the map view; content always visible.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterView {
    pub id: LetterId,
    pub content: String,
    pub location: GeoPoint,
    pub created_at: DateTime<Utc>,
}

impl From<Letter> for LetterView {
    fn from(value: Letter) -> Self {
        let Letter {
            id,
            content,
            location,
            created_at,
        } = value;
        Self {
            id,
            content,
            location,
            created_at,
        }
    }
}

/// Nearby-query projection. `content` is `None` when redacted.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyLetterView {
    pub id: LetterId,
    pub content: Option<String>,
    pub location: GeoPoint,
    pub created_at: DateTime<Utc>,
    pub distance_metres: f64,
}

impl NearbyLetterView {
    /// Project a nearby row, applying a disclosure decision to its content.
    pub fn project(row: NearbyLetter, disclosure: Disclosure) -> Self {
        let NearbyLetter {
            letter,
            distance_metres,
        } = row;
        Self {
            id: letter.id,
            content: disclosure.apply(letter.content),
            location: letter.location,
            created_at: letter.created_at,
            distance_metres,
        }
    }

    /// True when content was withheld.
    pub fn is_redacted(&self) -> bool {
        self.content.is_none()
    }
}
