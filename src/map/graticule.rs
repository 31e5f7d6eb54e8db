use bevy::prelude::*;

use super::MapViewport;
use crate::geo::{GeoCoordinate, EARTH_RADIUS_M, MAX_MERCATOR_LATITUDE};
use crate::theme;

/// Candidate line spacings in degrees, coarse to fine
const SPACINGS: [f64; 14] = [
    30.0, 10.0, 5.0, 2.0, 1.0, 0.5, 0.2, 0.1, 0.05, 0.02, 0.01, 0.005, 0.002, 0.001,
];

/// Minimum gap between neighbouring lines, in pixels
const MIN_LINE_GAP_PX: f64 = 90.0;

/// Pick the finest spacing that keeps lines at least `MIN_LINE_GAP_PX` apart
pub fn graticule_spacing(degrees_per_pixel: f64) -> f64 {
    let min_spacing = degrees_per_pixel * MIN_LINE_GAP_PX;
    SPACINGS
        .iter()
        .rev()
        .copied()
        .find(|s| *s >= min_spacing)
        .unwrap_or(SPACINGS[0])
}

/// Multiples of `spacing` inside [min, max]
pub fn lines_between(min: f64, max: f64, spacing: f64) -> Vec<f64> {
    let start = (min / spacing).ceil() as i64;
    let end = (max / spacing).floor() as i64;
    (start..=end).map(|i| i as f64 * spacing).collect()
}

/// Meridians and parallels visible in a viewport, in degrees
#[derive(Debug, Clone, PartialEq)]
pub struct GraticuleLines {
    pub spacing: f64,
    pub meridians: Vec<f64>,
    pub parallels: Vec<f64>,
}

pub fn graticule_lines(viewport: &MapViewport) -> GraticuleLines {
    let (south_west, north_east) = viewport.visible_bounds();
    let spacing = graticule_spacing((viewport.metres_per_pixel() / EARTH_RADIUS_M).to_degrees());

    // Wrapped bounds (antimeridian in view, or zoomed out past the whole world) get no meridians
    let meridians = if north_east.longitude > south_west.longitude {
        lines_between(south_west.longitude, north_east.longitude, spacing)
    } else {
        Vec::new()
    };

    let south = south_west.latitude.max(-MAX_MERCATOR_LATITUDE);
    let north = north_east.latitude.min(MAX_MERCATOR_LATITUDE);

    GraticuleLines {
        spacing,
        meridians,
        parallels: lines_between(south, north, spacing),
    }
}

pub fn draw_graticule(mut gizmos: Gizmos, viewport: Res<MapViewport>) {
    let lines = graticule_lines(&viewport);
    let center = viewport.center();
    let size = viewport.size();

    let top = size.y / 2.0;
    let bottom = -top;
    let right = size.x / 2.0;
    let left = -right;

    for longitude in lines.meridians {
        let x = viewport
            .to_world(GeoCoordinate::new(center.latitude, longitude))
            .x;
        gizmos.line_2d(Vec2::new(x, bottom), Vec2::new(x, top), line_color(longitude));
    }

    for latitude in lines.parallels {
        let y = viewport
            .to_world(GeoCoordinate::new(latitude, center.longitude))
            .y;
        gizmos.line_2d(Vec2::new(left, y), Vec2::new(right, y), line_color(latitude));
    }
}

fn line_color(degrees: f64) -> Color {
    if degrees == 0.0 {
        theme::EQUATOR_COLOR
    } else {
        theme::GRATICULE_COLOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::CoordinateSpan;

    #[test]
    fn test_spacing_for_city_zoom() {
        // About 0.00006 degrees per pixel at a 0.05 degree span on a wide window
        assert_eq!(graticule_spacing(0.05 / 800.0), 0.01);
    }

    #[test]
    fn test_spacing_for_world_zoom() {
        assert_eq!(graticule_spacing(360.0 / 800.0), 30.0);
        assert_eq!(graticule_spacing(10.0), 30.0);
    }

    #[test]
    fn test_spacing_for_street_zoom() {
        assert_eq!(graticule_spacing(1e-7), 0.001);
    }

    #[test]
    fn test_lines_between_includes_bounds() {
        assert_eq!(lines_between(-1.0, 1.0, 0.5), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    }

    fn viewport_at(center: GeoCoordinate) -> MapViewport {
        MapViewport::new(center, CoordinateSpan::default(), Vec2::new(800.0, 600.0))
    }

    #[test]
    fn test_city_view_has_both_directions() {
        let lines = graticule_lines(&viewport_at(GeoCoordinate::new(35.0, 139.0)));
        assert_eq!(lines.spacing, 0.01);
        assert!(!lines.meridians.is_empty());
        assert!(!lines.parallels.is_empty());
    }

    #[test]
    fn test_antimeridian_view_keeps_parallels() {
        let lines = graticule_lines(&viewport_at(GeoCoordinate::new(-17.0, 180.0)));
        assert!(lines.meridians.is_empty());
        assert!(!lines.parallels.is_empty());
        assert!(lines.parallels.iter().all(|lat| (-17.1..=-16.9).contains(lat)));
    }

    #[test]
    fn test_lines_between_empty() {
        assert!(lines_between(0.1, 0.4, 0.5).is_empty());
    }
}
