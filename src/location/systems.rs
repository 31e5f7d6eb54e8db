//! Bevy systems that feed host messages through the state machine and apply its effects.

use bevy::prelude::*;
use std::collections::VecDeque;

use super::desktop::DesktopLocationService;
use super::messages::{
    AuthorizationChanged, LocationFix, RequestAuthorization, RestartSensing, SensingFailed,
};
use super::service::{LocationService, LocationServices, PermissionRequest};
use super::state::{AuthorizationState, LocationAdvisory, LocationState, PermissionPrompt};
use super::transition::{transition, LocationEvent, SensorEffect};
use crate::config::AppConfig;
use crate::dispatch::{cancel_background, run_in_background, BackgroundKind, BackgroundTask, UiCallback};
use crate::geo::CoordinateSpan;
use crate::map::MapViewport;

/// Startup system: install the desktop service unless one was provided, then ask for permission
pub fn install_location_service(
    mut commands: Commands,
    config: Res<AppConfig>,
    existing: Option<Res<LocationServices>>,
    mut state: ResMut<LocationState>,
    mut requests: MessageWriter<RequestAuthorization>,
) {
    state.services_enabled = match existing {
        Some(services) => services.0.services_enabled(),
        None => {
            let service = DesktopLocationService::from_config(&config.data);
            let enabled = service.services_enabled();
            commands.insert_resource(LocationServices(Box::new(service)));
            enabled
        }
    };

    requests.write(RequestAuthorization);
}

/// Run every pending location message through the state machine.
#[allow(clippy::too_many_arguments)]
pub fn process_location_events(
    mut commands: Commands,
    mut requests: MessageReader<RequestAuthorization>,
    mut changes: MessageReader<AuthorizationChanged>,
    mut fixes: MessageReader<LocationFix>,
    mut failures: MessageReader<SensingFailed>,
    mut restarts: MessageReader<RestartSensing>,
    mut state: ResMut<LocationState>,
    mut services: ResMut<LocationServices>,
    mut viewport: ResMut<MapViewport>,
    mut advisory: ResMut<LocationAdvisory>,
    mut prompt: ResMut<PermissionPrompt>,
    config: Res<AppConfig>,
    tasks: Query<(Entity, &BackgroundTask)>,
) {
    // Messages of different types carry no relative order, so each frame is
    // processed in a fixed one: requests, authorization changes, fixes,
    // failures, restarts. A revocation therefore lands before a fix from the
    // same frame, and the state machine drops that fix.
    let mut pending: VecDeque<LocationEvent> = VecDeque::new();
    pending.extend(requests.read().map(|_| LocationEvent::PermissionRequested));
    pending.extend(
        changes
            .read()
            .map(|msg| LocationEvent::AuthorizationChanged(msg.status)),
    );
    pending.extend(fixes.read().map(|msg| LocationEvent::Fix(msg.coordinate)));
    pending.extend(
        failures
            .read()
            .map(|msg| LocationEvent::SensingFailed(msg.error.clone())),
    );
    pending.extend(restarts.read().map(|_| LocationEvent::RestartRequested));

    let span = CoordinateSpan {
        latitude_delta: config.data.region_span_degrees,
        longitude_delta: config.data.region_span_degrees,
    };

    // Sensing tasks spawned this frame are not visible to `tasks` yet
    let mut spawned: Vec<Entity> = Vec::new();

    while let Some(event) = pending.pop_front() {
        debug!("Location event: {:?}", event);
        let (next, effects) = transition(&state, event);
        *state = next;

        for effect in effects {
            match effect {
                SensorEffect::PromptForPermission => match services.0.request_permission() {
                    PermissionRequest::Prompt => prompt.pending = true,
                    PermissionRequest::Resolved(status) => {
                        pending.push_back(LocationEvent::AuthorizationChanged(status));
                    }
                },
                SensorEffect::StartSensing => {
                    info!("Starting location sensing");
                    let sensing = services.0.start_sensing();
                    let task =
                        run_in_background(&mut commands, BackgroundKind::Sensing, async move {
                            let result = sensing.await;
                            Box::new(move |world: &mut World| match result {
                                Ok(coordinate) => {
                                    world.write_message(LocationFix { coordinate });
                                }
                                Err(error) => {
                                    world.write_message(SensingFailed { error });
                                }
                            }) as UiCallback
                        });
                    spawned.push(task);
                }
                SensorEffect::StopSensing => {
                    services.0.stop_sensing();
                    cancel_background(&mut commands, &tasks, BackgroundKind::Sensing);
                    for task in spawned.drain(..) {
                        commands.entity(task).despawn();
                    }
                }
                SensorEffect::RecenterMap(coordinate) => {
                    info!("Current location {}", coordinate);
                    viewport.set_region(coordinate, span, true);
                }
                SensorEffect::Advise(notice) => {
                    warn!("{}", notice.message());
                    advisory.current = Some(notice);
                }
                SensorEffect::ReportSensingFailure(error) => {
                    warn!("Location sensing failed: {}", error);
                }
            }
        }
    }
}

/// Resolve the in-app permission prompt with the user's answer
pub fn answer_permission_prompt(
    prompt: &mut PermissionPrompt,
    allow: bool,
    changes: &mut MessageWriter<AuthorizationChanged>,
) {
    prompt.pending = false;
    let status = if allow {
        AuthorizationState::Authorized
    } else {
        AuthorizationState::Denied
    };
    info!("Location permission {}", status);
    changes.write(AuthorizationChanged { status });
}
