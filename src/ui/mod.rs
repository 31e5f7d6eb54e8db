mod callout;
mod dialogs;
mod status_bar;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Panels must render first so floating windows sit above them
        app.add_systems(
            EguiPrimaryContextPass,
            (dialogs::advisory_banner_ui, status_bar::status_bar_ui).chain(),
        )
        .add_systems(
            EguiPrimaryContextPass,
            (
                callout::pin_callout_ui,
                dialogs::permission_prompt_ui,
                dialogs::config_reset_notification_ui,
            )
                .after(status_bar::status_bar_ui),
        );
    }
}
