//! Centralized color theme for the application.
//!
//! This module provides all colors used for map rendering and the egui overlay.
//! Modify values here to change the application's color scheme.

use bevy::prelude::Color;

// ============================================================================
// Map Background
// ============================================================================

/// Pale land tone behind the graticule
pub const MAP_BACKGROUND: Color = Color::srgb(0.93, 0.92, 0.88);

// ============================================================================
// Graticule Colors
// ============================================================================

/// Semi-transparent grey meridians and parallels
pub const GRATICULE_COLOR: Color = Color::srgba(0.45, 0.45, 0.45, 0.35);

/// Slightly stronger line for the equator and prime meridian
pub const EQUATOR_COLOR: Color = Color::srgba(0.3, 0.3, 0.55, 0.6);

// ============================================================================
// Annotation Colors
// ============================================================================

/// Red pin head
pub const PIN_COLOR: Color = Color::srgb(0.9, 0.15, 0.15);

/// Pin whose callout is showing
pub const PIN_SELECTED_COLOR: Color = Color::srgb(1.0, 0.45, 0.1);

// ============================================================================
// Overlay Colors
// ============================================================================

/// Orange walking route
pub const ROUTE_COLOR: Color = Color::srgb(1.0, 0.5, 0.0);

// ============================================================================
// User Location
// ============================================================================

pub const USER_LOCATION_COLOR: Color = Color::srgb(0.0, 0.48, 1.0);

pub const USER_LOCATION_HALO: Color = Color::srgba(0.0, 0.48, 1.0, 0.35);

// ============================================================================
// UI Colors (egui)
// ============================================================================

pub mod ui {
    use bevy_egui::egui;

    /// Amber background for the location advisory banner
    pub const ADVISORY_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(250, 225, 150);

    /// Dark text on the advisory banner
    pub const ADVISORY_TEXT: egui::Color32 = egui::Color32::from_rgb(60, 45, 10);

    /// Grey for help/hint text
    pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;

    /// Orange distance/time readout, matching the route line
    pub const ROUTE_TEXT: egui::Color32 = egui::Color32::from_rgb(255, 128, 0);

    /// Red for error messages
    pub const ERROR_TEXT: egui::Color32 = egui::Color32::RED;
}
