//! Distance-gated disclosure of letter content.
//!
//! A nearby query always reveals that a letter exists, where it is, and when
//! it was left. Its text is revealed only when the requester stands within
//! the disclosure radius. The radius is fixed server-side and never taken
//! from a request.

use thiserror::Error;

/// Default disclosure threshold in metres.
pub const DISCLOSURE_RADIUS_METRES: f64 = 15.0;

/// Default search radius in metres, used when a nearby query omits one.
pub const DEFAULT_SEARCH_RADIUS_METRES: f64 = 50.0;

/// Outcome of the disclosure check for one letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disclosure {
    /// Content is passed through.
    Visible,
    /// Content is replaced by the redaction marker.
    Redacted,
}

impl Disclosure {
    /// Apply the decision to a letter's content.
    pub fn apply(self, content: String) -> Option<String> {
        match self {
            Self::Visible => Some(content),
            Self::Redacted => None,
        }
    }
}

/// Decide whether content at `distance_metres` may be shown.
///
/// The boundary is inclusive. A non-finite distance is never visible.
///
/// # Examples
/// ```
/// use backend::domain::{Disclosure, disclosure_decision};
///
/// assert_eq!(disclosure_decision(15.0, 15.0), Disclosure::Visible);
/// assert_eq!(disclosure_decision(20.0, 15.0), Disclosure::Redacted);
/// ```
pub fn disclosure_decision(distance_metres: f64, threshold_metres: f64) -> Disclosure {
    if distance_metres <= threshold_metres {
        Disclosure::Visible
    } else {
        Disclosure::Redacted
    }
}

/// Invalid disclosure policy configuration.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DisclosurePolicyError {
    /// A radius is negative, NaN or infinite.
    #[error("{name} must be a finite, non-negative number of metres, got {value}")]
    InvalidRadius { name: &'static str, value: f64 },
    /// The disclosure radius is wider than the default search radius.
    #[error(
        "disclosure radius ({disclosure} m) must not exceed the default search radius ({search} m)"
    )]
    DisclosureExceedsSearch { disclosure: f64, search: f64 },
}

/// Server-side radii governing nearby queries.
///
/// ## Invariants
/// - Both radii are finite and non-negative.
/// - `disclosure_radius <= default_search_radius`.
///
/// # Examples
/// ```
/// use backend::domain::DisclosurePolicy;
///
/// let policy = DisclosurePolicy::default();
/// assert_eq!(policy.disclosure_radius_metres(), 15.0);
/// assert_eq!(policy.default_search_radius_metres(), 50.0);
/// assert!(DisclosurePolicy::new(100.0, 50.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisclosurePolicy {
    disclosure_radius: f64,
    default_search_radius: f64,
}

impl DisclosurePolicy {
    /// Validate and build a policy.
    pub fn new(
        disclosure_radius_metres: f64,
        default_search_radius_metres: f64,
    ) -> Result<Self, DisclosurePolicyError> {
        check_radius("disclosure radius", disclosure_radius_metres)?;
        check_radius("default search radius", default_search_radius_metres)?;
        if disclosure_radius_metres > default_search_radius_metres {
            return Err(DisclosurePolicyError::DisclosureExceedsSearch {
                disclosure: disclosure_radius_metres,
                search: default_search_radius_metres,
            });
        }
        Ok(Self {
            disclosure_radius: disclosure_radius_metres,
            default_search_radius: default_search_radius_metres,
        })
    }

    /// Disclosure threshold in metres.
    pub fn disclosure_radius_metres(&self) -> f64 {
        self.disclosure_radius
    }

    /// Search radius applied when the caller omits one.
    pub fn default_search_radius_metres(&self) -> f64 {
        self.default_search_radius
    }

    /// Decide visibility for a letter at `distance_metres`.
    pub fn decide(&self, distance_metres: f64) -> Disclosure {
        disclosure_decision(distance_metres, self.disclosure_radius)
    }
}

impl Default for DisclosurePolicy {
    fn default() -> Self {
        Self {
            disclosure_radius: DISCLOSURE_RADIUS_METRES,
            default_search_radius: DEFAULT_SEARCH_RADIUS_METRES,
        }
    }
}

fn check_radius(name: &'static str, value: f64) -> Result<(), DisclosurePolicyError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DisclosurePolicyError::InvalidRadius { name, value })
    }
}
