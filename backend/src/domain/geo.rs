//! Geographic primitives: WGS84 points, search radii and geodesic distance.
//!
//! Coordinates are geographic, not Cartesian, so distances are measured on
//! the Earth's surface in metres. The in-process calculation uses the
//! haversine formula on the IUGG mean radius; the PostGIS adapter measures
//! on the WGS84 spheroid. The two agree to within about 0.5% which is far
//! below the disclosure and search thresholds the service works with.

use serde::{Deserialize, Serialize};

/// Spatial reference identifier for WGS84 longitude/latitude.
pub const SRID_WGS84: i32 = 4326;

/// IUGG mean Earth radius in metres.
pub const MEAN_EARTH_RADIUS_METRES: f64 = 6_371_008.8;

/// Reasons a coordinate pair is rejected.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeoPointValidationError {
    /// Longitude is not finite or lies outside [-180, 180].
    #[error("longitude must be a finite number between -180 and 180, got {0}")]
    Longitude(f64),
    /// Latitude is not finite or lies outside [-90, 90].
    #[error("latitude must be a finite number between -90 and 90, got {0}")]
    Latitude(f64),
}

impl GeoPointValidationError {
    /// Name of the offending request field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Longitude(_) => "longitude",
            Self::Latitude(_) => "latitude",
        }
    }
}

/// A validated WGS84 point.
///
/// ## Invariants
/// - `longitude` is finite and within [-180, 180].
/// - `latitude` is finite and within [-90, 90].
///
/// # Examples
/// ```
/// use backend::domain::GeoPoint;
///
/// let tokyo_station = GeoPoint::new(139.767, 35.681).expect("valid point");
/// assert_eq!(tokyo_station.longitude(), 139.767);
/// assert!(GeoPoint::new(0.0, 200.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeoPointDto", into = "GeoPointDto")]
pub struct GeoPoint {
    longitude: f64,
    latitude: f64,
}

impl GeoPoint {
    /// Validate and construct a point. Longitude comes first, matching the
    /// x/y order PostGIS uses.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, GeoPointValidationError> {
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoPointValidationError::Longitude(longitude));
        }
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoPointValidationError::Latitude(latitude));
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Geodesic distance to `other` in metres.
    pub fn distance_to(&self, other: &Self) -> f64 {
        geodesic_distance_metres(*self, *other)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct GeoPointDto {
    longitude: f64,
    latitude: f64,
}

impl From<GeoPoint> for GeoPointDto {
    fn from(value: GeoPoint) -> Self {
        Self {
            longitude: value.longitude,
            latitude: value.latitude,
        }
    }
}

impl TryFrom<GeoPointDto> for GeoPoint {
    type Error = GeoPointValidationError;

    fn try_from(value: GeoPointDto) -> Result<Self, Self::Error> {
        Self::new(value.longitude, value.latitude)
    }
}

/// Great-circle distance between two points in metres (haversine).
///
/// # Examples
/// ```
/// use backend::domain::{GeoPoint, geodesic_distance_metres};
///
/// let a = GeoPoint::new(0.0, 0.0).expect("valid");
/// let b = GeoPoint::new(0.0, 1.0).expect("valid");
/// let metres = geodesic_distance_metres(a, b);
/// assert!((metres - 111_195.0).abs() < 1.0);
/// ```
pub fn geodesic_distance_metres(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi_a = a.latitude.to_radians();
    let phi_b = b.latitude.to_radians();
    let half_d_phi = (b.latitude - a.latitude).to_radians() / 2.0;
    let half_d_lambda = (b.longitude - a.longitude).to_radians() / 2.0;

    let h = half_d_phi.sin().powi(2) + phi_a.cos() * phi_b.cos() * half_d_lambda.sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points.
    2.0 * MEAN_EARTH_RADIUS_METRES * h.sqrt().min(1.0).asin()
}

/// Reasons a search radius is rejected.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum SearchRadiusValidationError {
    /// The radius is NaN or infinite.
    #[error("max_distance must be a finite number of metres, got {0}")]
    NotFinite(f64),
}

/// Caller-controlled upper bound for nearby queries, in metres.
///
/// Zero and negative radii are accepted and select nothing. There is no
/// upper bound; slow scans are cut off by the store's statement timeout.
///
/// # Examples
/// ```
/// use backend::domain::SearchRadius;
///
/// let radius = SearchRadius::new(100.0).expect("valid radius");
/// assert!(!radius.selects_nothing());
/// assert!(SearchRadius::new(0.0).expect("valid radius").selects_nothing());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SearchRadius(f64);

impl SearchRadius {
    /// Validate a radius in metres.
    pub fn new(metres: f64) -> Result<Self, SearchRadiusValidationError> {
        if !metres.is_finite() {
            return Err(SearchRadiusValidationError::NotFinite(metres));
        }
        Ok(Self(metres))
    }

    /// Radius in metres.
    pub fn metres(self) -> f64 {
        self.0
    }

    /// True when no letter can fall inside the radius.
    pub fn selects_nothing(self) -> bool {
        self.0 <= 0.0
    }

    /// Inclusive containment test for a measured distance.
    pub fn contains(self, distance_metres: f64) -> bool {
        !self.selects_nothing() && distance_metres <= self.0
    }
}
