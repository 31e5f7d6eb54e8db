use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::ConfigResetNotification;
use crate::location::{
    answer_permission_prompt, AuthorizationChanged, LocationAdvisory, PermissionPrompt,
};
use crate::theme;

/// In-app consent prompt shown while authorization is undetermined
pub fn permission_prompt_ui(
    mut contexts: EguiContexts,
    mut prompt: ResMut<PermissionPrompt>,
    mut changes: MessageWriter<AuthorizationChanged>,
) -> Result {
    if !prompt.pending {
        return Ok(());
    }

    let mut answer = None;

    egui::Window::new("Location Access")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Allow Pinwalk to use your location?");
            ui.label(
                egui::RichText::new(
                    "Your position centers the map and is the start of walking routes.",
                )
                .color(theme::ui::HINT_TEXT),
            );
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Allow").clicked() {
                    answer = Some(true);
                }
                if ui.button("Don't Allow").clicked() {
                    answer = Some(false);
                }
            });
        });

    if let Some(allow) = answer {
        answer_permission_prompt(&mut prompt, allow, &mut changes);
    }

    Ok(())
}

/// Banner explaining why the user's position is unavailable
pub fn advisory_banner_ui(
    mut contexts: EguiContexts,
    mut advisory: ResMut<LocationAdvisory>,
) -> Result {
    let Some(notice) = advisory.current else {
        return Ok(());
    };

    let mut dismissed = false;
    let ctx = contexts.ctx_mut()?;

    egui::TopBottomPanel::top("location_advisory")
        .frame(
            egui::Frame::side_top_panel(&ctx.style())
                .fill(theme::ui::ADVISORY_BACKGROUND)
                .inner_margin(egui::Margin::symmetric(12, 6)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(notice.message()).color(theme::ui::ADVISORY_TEXT));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Dismiss").clicked() {
                        dismissed = true;
                    }
                });
            });
        });

    if dismissed {
        advisory.current = None;
    }

    Ok(())
}

/// Tell the user their config file was unusable and defaults are in effect
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    egui::Window::new("Configuration Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("The configuration file could not be loaded. Default settings are in use.");
            if let Some(reason) = &notification.reason {
                ui.label(egui::RichText::new(reason).color(theme::ui::ERROR_TEXT));
            }
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                notification.show = false;
                notification.reason = None;
            }
        });

    Ok(())
}
