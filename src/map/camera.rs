use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use super::MapViewport;
use crate::config::AppConfig;
use crate::geo::CoordinateSpan;

#[derive(Component)]
pub struct MapCamera;

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MapCamera, Transform::default()));
}

/// Startup system: show the configured initial region until the first fix arrives
pub fn apply_initial_region(config: Res<AppConfig>, mut viewport: ResMut<MapViewport>) {
    let span = CoordinateSpan {
        latitude_delta: config.data.region_span_degrees,
        longitude_delta: config.data.region_span_degrees,
    };
    viewport.set_region(config.data.initial_center, span, false);
}

pub fn sync_viewport_size(
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<MapViewport>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };

    let size = Vec2::new(window.width(), window.height());
    if viewport.size() != size {
        viewport.resize(size);
    }
}

pub fn animate_region(time: Res<Time>, mut viewport: ResMut<MapViewport>) {
    if viewport.is_animating() {
        viewport.advance(time.delta_secs());
    }
}

/// Pan with the right or middle mouse button
pub fn map_pan(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut viewport: ResMut<MapViewport>,
) {
    if !mouse_button.any_pressed([MouseButton::Right, MouseButton::Middle]) {
        mouse_motion.clear();
        return;
    }

    for event in mouse_motion.read() {
        viewport.pan_by_pixels(event.delta);
    }
}

/// Zoom around the cursor with the mouse wheel
pub fn map_zoom(
    mut scroll_events: MessageReader<MouseWheel>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<MapViewport>,
    mut contexts: EguiContexts,
) {
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.is_pointer_over_area()
    {
        scroll_events.clear();
        return;
    }

    let anchor = window_query
        .single()
        .ok()
        .and_then(|w| w.cursor_position())
        .unwrap_or(viewport.size() / 2.0);

    for event in scroll_events.read() {
        let scroll_amount = match event.unit {
            MouseScrollUnit::Line => event.y * 0.1,
            MouseScrollUnit::Pixel => event.y * 0.001,
        };

        viewport.zoom_at(anchor, (-(scroll_amount as f64)).exp());
    }
}
