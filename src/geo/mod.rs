//! Geographic value types and the spherical Web Mercator projection.
//!
//! All map math runs in f64. Values only drop to f32 once they are
//! camera-relative pixel offsets (see [`crate::map::MapViewport::to_world`]).

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_4, PI};
use std::fmt;

use crate::constants::DEFAULT_SPAN_DEGREES;

/// Earth radius used by EPSG:3857, in metres
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Latitude limit of the square Web Mercator world
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_779_806_59;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Forward Web Mercator projection, in metres east/north of (0, 0).
    pub fn to_mercator(self) -> (f64, f64) {
        let lat = self
            .latitude
            .clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE)
            .to_radians();
        let x = EARTH_RADIUS_M * self.longitude.to_radians();
        let y = EARTH_RADIUS_M * (FRAC_PI_4 + lat / 2.0).tan().ln();
        (x, y)
    }

    /// Inverse Web Mercator projection. Longitude is wrapped into [-180, 180).
    pub fn from_mercator(x: f64, y: f64) -> Self {
        let longitude = (x / EARTH_RADIUS_M).to_degrees();
        let latitude = (2.0 * (y / EARTH_RADIUS_M).exp().atan() - PI / 2.0).to_degrees();
        Self {
            latitude,
            longitude: wrap_longitude(longitude),
        }
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// Latitude and longitude extent of a visible region, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSpan {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Default for CoordinateSpan {
    fn default() -> Self {
        Self {
            latitude_delta: DEFAULT_SPAN_DEGREES,
            longitude_delta: DEFAULT_SPAN_DEGREES,
        }
    }
}

/// Label shown on a dropped pin
pub fn pin_label(coordinate: GeoCoordinate) -> String {
    format!(
        "latitude: {}, longitude: {}",
        degrees(coordinate.latitude),
        degrees(coordinate.longitude)
    )
}

/// Shortest round-trip decimal, always with a fractional part (`35.0`, not `35`)
fn degrees(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

fn wrap_longitude(longitude: f64) -> f64 {
    if (-180.0..180.0).contains(&longitude) {
        longitude
    } else {
        (longitude + 180.0).rem_euclid(360.0) - 180.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_pin_label_format() {
        let label = pin_label(GeoCoordinate::new(35.1, 139.1));
        assert_eq!(label, "latitude: 35.1, longitude: 139.1");
    }

    #[test]
    fn test_pin_label_negative_and_integral() {
        let label = pin_label(GeoCoordinate::new(-33.0, 151.2093));
        assert_eq!(label, "latitude: -33.0, longitude: 151.2093");
        let label = pin_label(GeoCoordinate::new(0.0, 180.0));
        assert_eq!(label, "latitude: 0.0, longitude: 180.0");
    }

    #[test]
    fn test_mercator_origin() {
        let (x, y) = GeoCoordinate::new(0.0, 0.0).to_mercator();
        assert_close(x, 0.0);
        assert_close(y, 0.0);
    }

    #[test]
    fn test_mercator_inverse_recovers_coordinate() {
        let tokyo = GeoCoordinate::new(35.681236, 139.767125);
        let (x, y) = tokyo.to_mercator();
        let back = GeoCoordinate::from_mercator(x, y);
        assert_close(back.latitude, tokyo.latitude);
        assert_close(back.longitude, tokyo.longitude);
    }

    #[test]
    fn test_mercator_antimeridian_extent() {
        let (x, _) = GeoCoordinate::new(0.0, 180.0).to_mercator();
        assert_close(x, PI * EARTH_RADIUS_M);
    }

    #[test]
    fn test_mercator_clamps_poles() {
        let (_, y_pole) = GeoCoordinate::new(90.0, 0.0).to_mercator();
        let (_, y_limit) = GeoCoordinate::new(MAX_MERCATOR_LATITUDE, 0.0).to_mercator();
        assert!(y_pole.is_finite());
        assert_close(y_pole, y_limit);
    }

    #[test]
    fn test_from_mercator_wraps_longitude() {
        let (x, y) = GeoCoordinate::new(10.0, 170.0).to_mercator();
        let shifted = GeoCoordinate::from_mercator(x + 20.0_f64.to_radians() * EARTH_RADIUS_M, y);
        assert!((shifted.longitude - -170.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_span() {
        let span = CoordinateSpan::default();
        assert_eq!(span.latitude_delta, 0.05);
        assert_eq!(span.longitude_delta, 0.05);
    }
}
