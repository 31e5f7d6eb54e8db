//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels (also the initial viewport width)
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;

/// Default window height in pixels (also the initial viewport height)
pub const DEFAULT_WINDOW_HEIGHT: f32 = 800.0;

/// Latitude and longitude extent shown when recentering on a fix
pub const DEFAULT_SPAN_DEGREES: f64 = 0.05;

/// Duration of an animated region change, in seconds
pub const REGION_ANIMATION_SECS: f32 = 0.35;

/// How long the left button must be held before a long press begins
pub const LONG_PRESS_SECS: f32 = 0.5;

/// Cursor travel (pixels) that turns a held press into a pan instead of a long press
pub const LONG_PRESS_SLOP_PX: f32 = 8.0;

/// Maximum distance (pixels) between a click and a pin for the pin to be selected
pub const PIN_HIT_RADIUS_PX: f32 = 14.0;

/// Radius of the drawn pin head, in pixels
pub const PIN_RADIUS_PX: f32 = 7.0;

/// Width of a rendered route line, in pixels
pub const ROUTE_LINE_WIDTH: f32 = 3.0;

/// Zoom limits, in metres per screen pixel
pub const MIN_METRES_PER_PIXEL: f64 = 0.05;
pub const MAX_METRES_PER_PIXEL: f64 = 80_000.0;

/// Default timeout for geolocation and routing requests
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
