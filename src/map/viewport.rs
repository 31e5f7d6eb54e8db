//! The visible map region and screen/geo conversions.
//!
//! The camera never moves. Everything is drawn at camera-relative pixel
//! offsets computed here, so f32 render coordinates stay small at any zoom.

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::constants::{
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, MAX_METRES_PER_PIXEL, MIN_METRES_PER_PIXEL,
    REGION_ANIMATION_SECS,
};
use crate::geo::{CoordinateSpan, GeoCoordinate};

#[derive(Debug, Clone, PartialEq)]
struct RegionAnimation {
    from_center: DVec2,
    from_mpp: f64,
    to_center: DVec2,
    to_mpp: f64,
    elapsed: f32,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MapViewport {
    /// Centre in Web Mercator metres
    center: DVec2,
    metres_per_pixel: f64,
    /// Viewport size in logical pixels
    size: Vec2,
    animation: Option<RegionAnimation>,
}

impl Default for MapViewport {
    fn default() -> Self {
        Self::new(
            GeoCoordinate::new(0.0, 0.0),
            CoordinateSpan::default(),
            Vec2::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
        )
    }
}

impl MapViewport {
    pub fn new(center: GeoCoordinate, span: CoordinateSpan, size: Vec2) -> Self {
        let mut viewport = Self {
            center: mercator(center),
            metres_per_pixel: 1.0,
            size,
            animation: None,
        };
        viewport.metres_per_pixel = viewport.fit_span(center, span);
        viewport
    }

    pub fn center(&self) -> GeoCoordinate {
        GeoCoordinate::from_mercator(self.center.x, self.center.y)
    }

    /// Where the viewport is heading: the animation target, or the centre if idle
    pub fn destination_center(&self) -> GeoCoordinate {
        let target = self
            .animation
            .as_ref()
            .map(|a| a.to_center)
            .unwrap_or(self.center);
        GeoCoordinate::from_mercator(target.x, target.y)
    }

    pub fn metres_per_pixel(&self) -> f64 {
        self.metres_per_pixel
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn resize(&mut self, size: Vec2) {
        if size.x > 0.0 && size.y > 0.0 {
            self.size = size;
        }
    }

    /// Window point (origin top-left, y down) to camera-relative world point (y up)
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(screen.x - self.size.x / 2.0, self.size.y / 2.0 - screen.y)
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x + self.size.x / 2.0, self.size.y / 2.0 - world.y)
    }

    /// Geographic coordinate under a window point
    pub fn project(&self, screen: Vec2) -> GeoCoordinate {
        let offset = self.screen_to_world(screen).as_dvec2() * self.metres_per_pixel;
        let metres = self.center + offset;
        GeoCoordinate::from_mercator(metres.x, metres.y)
    }

    /// Camera-relative render position of a coordinate
    pub fn to_world(&self, coordinate: GeoCoordinate) -> Vec2 {
        ((mercator(coordinate) - self.center) / self.metres_per_pixel).as_vec2()
    }

    /// Show `span` around `center`, easing there when `animated`
    pub fn set_region(&mut self, center: GeoCoordinate, span: CoordinateSpan, animated: bool) {
        let to_center = mercator(center);
        let to_mpp = self.fit_span(center, span);

        if animated {
            self.animation = Some(RegionAnimation {
                from_center: self.center,
                from_mpp: self.metres_per_pixel,
                to_center,
                to_mpp,
                elapsed: 0.0,
            });
        } else {
            self.animation = None;
            self.center = to_center;
            self.metres_per_pixel = to_mpp;
        }
    }

    /// Step a running region animation
    pub fn advance(&mut self, dt: f32) {
        let Some(animation) = self.animation.as_mut() else {
            return;
        };

        animation.elapsed += dt;
        let t = (animation.elapsed / REGION_ANIMATION_SECS).clamp(0.0, 1.0) as f64;
        let eased = t * t * (3.0 - 2.0 * t);

        self.center = animation.from_center.lerp(animation.to_center, eased);
        // Interpolate zoom geometrically so it feels linear to the eye
        self.metres_per_pixel =
            animation.from_mpp * (animation.to_mpp / animation.from_mpp).powf(eased);

        if t >= 1.0 {
            self.center = animation.to_center;
            self.metres_per_pixel = animation.to_mpp;
            self.animation = None;
        }
    }

    /// Move the map with the pointer; `delta` is in window pixels (y down)
    pub fn pan_by_pixels(&mut self, delta: Vec2) {
        self.animation = None;
        self.center.x -= delta.x as f64 * self.metres_per_pixel;
        self.center.y += delta.y as f64 * self.metres_per_pixel;
    }

    /// Zoom by `factor` (>1 zooms out) keeping the point under `anchor` fixed
    pub fn zoom_at(&mut self, anchor: Vec2, factor: f64) {
        self.animation = None;
        let offset = self.screen_to_world(anchor).as_dvec2();
        let anchor_metres = self.center + offset * self.metres_per_pixel;
        self.metres_per_pixel =
            (self.metres_per_pixel * factor).clamp(MIN_METRES_PER_PIXEL, MAX_METRES_PER_PIXEL);
        self.center = anchor_metres - offset * self.metres_per_pixel;
    }

    /// Geographic bounds of the viewport as (south-west, north-east)
    pub fn visible_bounds(&self) -> (GeoCoordinate, GeoCoordinate) {
        let south_west = self.project(Vec2::new(0.0, self.size.y));
        let north_east = self.project(Vec2::new(self.size.x, 0.0));
        (south_west, north_east)
    }

    fn fit_span(&self, center: GeoCoordinate, span: CoordinateSpan) -> f64 {
        let half_lat = span.latitude_delta / 2.0;
        let half_lon = span.longitude_delta / 2.0;
        let south_west = mercator(GeoCoordinate::new(
            center.latitude - half_lat,
            center.longitude - half_lon,
        ));
        let north_east = mercator(GeoCoordinate::new(
            center.latitude + half_lat,
            center.longitude + half_lon,
        ));
        let extent = north_east - south_west;

        let mpp = (extent.x / self.size.x as f64).max(extent.y / self.size.y as f64);
        mpp.clamp(MIN_METRES_PER_PIXEL, MAX_METRES_PER_PIXEL)
    }
}

fn mercator(coordinate: GeoCoordinate) -> DVec2 {
    let (x, y) = coordinate.to_mercator();
    DVec2::new(x, y)
}
