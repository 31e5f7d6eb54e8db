use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::constants::PIN_RADIUS_PX;
use crate::map::MapViewport;
use crate::pins::{PinAnnotation, SelectedPin};

/// Gap between the pin head and the bottom of its callout
const CALLOUT_OFFSET_PX: f32 = 28.0;

/// Label bubble above the selected pin
pub fn pin_callout_ui(
    mut contexts: EguiContexts,
    viewport: Res<MapViewport>,
    selected: Query<&PinAnnotation, With<SelectedPin>>,
) -> Result {
    let Ok(pin) = selected.single() else {
        return Ok(());
    };

    let screen = viewport.world_to_screen(viewport.to_world(pin.coordinate));
    let anchor = egui::pos2(screen.x, screen.y - PIN_RADIUS_PX - CALLOUT_OFFSET_PX);

    egui::Area::new(egui::Id::new("pin_callout"))
        .fixed_pos(anchor)
        .pivot(egui::Align2::CENTER_BOTTOM)
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(contexts.ctx_mut()?, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.label(egui::RichText::new(&pin.label).monospace());
            });
        });

    Ok(())
}
