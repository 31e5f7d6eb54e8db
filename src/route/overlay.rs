//! Route overlays and their rendering.

use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};
use bevy::prelude::*;

use super::backend::RoutePath;
use crate::constants::ROUTE_LINE_WIDTH;
use crate::geo::GeoCoordinate;
use crate::map::MapViewport;
use crate::theme;

/// Kinds of overlay the map can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    WalkingRoute,
}

/// How an overlay kind is stroked
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStroke {
    pub color: Color,
    pub width: f32,
}

impl OverlayKind {
    pub fn stroke(&self) -> OverlayStroke {
        match self {
            OverlayKind::WalkingRoute => OverlayStroke {
                color: theme::ROUTE_COLOR,
                width: ROUTE_LINE_WIDTH,
            },
        }
    }
}

/// A rendered path. Derived from a routing response, never edited.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct RouteOverlay {
    pub kind: OverlayKind,
    pub points: Vec<GeoCoordinate>,
    /// Metres
    pub distance: f64,
    /// Seconds
    pub duration: f64,
}

impl RouteOverlay {
    pub fn walking(path: &RoutePath) -> Self {
        Self {
            kind: OverlayKind::WalkingRoute,
            points: path.points.clone(),
            distance: path.distance,
            duration: path.duration,
        }
    }
}

/// Gizmo group for route lines, so they get their own stroke width
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct RouteGizmoGroup;

pub fn configure_route_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<RouteGizmoGroup>();
    config.line.width = OverlayKind::WalkingRoute.stroke().width;
}

pub fn draw_route_overlays(
    mut gizmos: Gizmos<RouteGizmoGroup>,
    viewport: Res<MapViewport>,
    overlays: Query<&RouteOverlay>,
) {
    for overlay in overlays.iter() {
        if overlay.points.len() < 2 {
            continue;
        }

        let stroke = overlay.kind.stroke();
        gizmos.linestrip_2d(
            overlay.points.iter().map(|p| viewport.to_world(*p)),
            stroke.color,
        );
    }
}
