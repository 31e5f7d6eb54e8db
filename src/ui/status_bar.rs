use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::location::{AuthorizationState, LocationState, RestartSensing};
use crate::pins::PinAnnotation;
use crate::route::{RouteOverlay, RouteRequests};
use crate::theme;

/// Bottom bar: current location, pin count, route summary and the locate button
pub fn status_bar_ui(
    mut contexts: EguiContexts,
    location: Res<LocationState>,
    requests: Res<RouteRequests>,
    pins: Query<(), With<PinAnnotation>>,
    overlays: Query<&RouteOverlay>,
    mut restarts: MessageWriter<RestartSensing>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    egui::TopBottomPanel::bottom("status_bar")
        .frame(
            egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(12, 6)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let can_locate = location.services_enabled
                    && location.authorization == AuthorizationState::Authorized
                    && !location.sensing;
                if ui
                    .add_enabled(can_locate, egui::Button::new("Locate Me"))
                    .clicked()
                {
                    restarts.write(RestartSensing);
                }

                ui.label(location_text(&location));
                ui.separator();

                let count = pins.iter().count();
                ui.label(format!("{} {}", count, if count == 1 { "pin" } else { "pins" }));

                if requests.in_flight() {
                    ui.separator();
                    ui.label("Finding walking route…");
                } else if let Some(route) = overlays.iter().next() {
                    ui.separator();
                    ui.colored_label(
                        theme::ui::ROUTE_TEXT,
                        format!(
                            "Walk: {}, {}",
                            format_distance(route.distance),
                            format_duration(route.duration)
                        ),
                    );
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.colored_label(
                        theme::ui::HINT_TEXT,
                        "Hold left click to drop a pin · Click a pin for a route · Right drag to pan",
                    );
                });
            });
        });

    Ok(())
}

fn location_text(location: &LocationState) -> String {
    match (location.current_location, location.authorization) {
        (Some(coordinate), _) => format!("You are at {}", coordinate),
        (None, _) if !location.services_enabled => "Location services off".to_string(),
        (None, AuthorizationState::Authorized) if location.sensing => "Locating…".to_string(),
        (None, AuthorizationState::Authorized) => "Location unavailable".to_string(),
        (None, AuthorizationState::NotDetermined) => "Waiting for location permission".to_string(),
        (None, AuthorizationState::Denied | AuthorizationState::Restricted) => {
            "Location not permitted".to_string()
        }
    }
}

/// Metres as `850 m` or `3.2 km`
pub fn format_distance(metres: f64) -> String {
    if metres < 1000.0 {
        format!("{:.0} m", metres)
    } else {
        format!("{:.1} km", metres / 1000.0)
    }
}

/// Seconds as `12 min` or `2 h 05 min`
pub fn format_duration(seconds: f64) -> String {
    let minutes = (seconds / 60.0).round().max(1.0) as u64;
    if minutes < 60 {
        format!("{} min", minutes)
    } else {
        format!("{} h {:02} min", minutes / 60, minutes % 60)
    }
}
