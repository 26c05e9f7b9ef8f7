//! Great-circle distance and bounding-box helpers.
//!
//! The engine never does true spatial indexing — candidate retrieval works on
//! rectangular lat/lon windows, and exact distances are only computed for the
//! small pools those windows return.

use std::f64::consts::PI;

const EARTH_RADIUS_KM: f64 = 6371.0;
const KM_PER_LAT_DEGREE: f64 = 111.0;
const KM_PER_LON_DEGREE_AT_EQUATOR: f64 = 111.320;

/// A WGS84 point in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// A rectangular lat/lon window used for candidate retrieval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    /// Build the window of roughly `radius_km` around `center`.
    ///
    /// Longitude span widens with latitude so the physical width stays
    /// ~constant; see [`bbox_degrees`] for the pole guard.
    #[must_use]
    pub fn around(center: GeoPoint, radius_km: f64) -> Self {
        let (lat_deg, lon_deg) = bbox_degrees(radius_km, center.latitude);
        Self {
            lat_min: center.latitude - lat_deg,
            lat_max: center.latitude + lat_deg,
            lon_min: center.longitude - lon_deg,
            lon_max: center.longitude + lon_deg,
        }
    }

    /// Whether the point falls inside this window (edges inclusive).
    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.lat_min
            && latitude <= self.lat_max
            && longitude >= self.lon_min
            && longitude <= self.lon_max
    }
}

/// Great-circle distance between two points in kilometers.
///
/// Standard haversine with R = 6371.0 km. Symmetric, zero for identical
/// points, never negative.
#[must_use]
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Convert a radius in kilometers to (lat, lon) half-spans in degrees.
///
/// The `max(0.0001, cos(lat))` clamp keeps the longitude span finite near the
/// poles; irrelevant for the deployment region but required for correctness
/// at any latitude.
#[must_use]
pub fn bbox_degrees(radius_km: f64, latitude: f64) -> (f64, f64) {
    let lat_deg = radius_km / KM_PER_LAT_DEGREE;
    let lon_deg =
        radius_km / (KM_PER_LON_DEGREE_AT_EQUATOR * (latitude * PI / 180.0).cos().max(0.0001));
    (lat_deg, lon_deg)
}
