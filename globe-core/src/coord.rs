//! Coordinate normalization applied before every provider call.

use crate::model::Coordinate;

/// Clamp latitude into [-90, 90]. NaN becomes 0.
pub fn clamp_latitude(lat: f64) -> f64 {
    if lat.is_nan() {
        return 0.0;
    }
    lat.clamp(-90.0, 90.0)
}

/// Wrap longitude into [-180, 180). Non-finite input becomes 0.
pub fn wrap_longitude(lon: f64) -> f64 {
    if !lon.is_finite() {
        return 0.0;
    }
    if (-180.0..180.0).contains(&lon) {
        return lon;
    }
    let wrapped = ((lon + 180.0) % 360.0 + 360.0) % 360.0 - 180.0;
    // Float rounding can land exactly on the excluded upper edge.
    if wrapped >= 180.0 { wrapped - 360.0 } else { wrapped }
}

pub fn normalize(lat: f64, lon: f64) -> Coordinate {
    Coordinate {
        latitude: clamp_latitude(lat),
        longitude: wrap_longitude(lon),
    }
}
