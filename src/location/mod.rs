//! Location authorization and the user's current position.
//!
//! The coordinator is a pure state machine ([`transition`]) driven by host
//! messages. Its effects (prompting, starting and stopping the sensor,
//! recentering the map, advising the user) are applied by
//! [`systems::process_location_events`] on the main schedule.
//!
//! ## Module Structure
//!
//! - [`state`] - `AuthorizationState`, `LocationState` and the advisory/prompt resources
//! - [`transition`] - the pure transition function and its events/effects
//! - [`service`] - the `LocationService` seam
//! - [`desktop`] - desktop implementation (consent prompt + IP geolocation)
//! - [`messages`] - host entry points
//! - [`systems`] - Bevy systems

mod desktop;
mod messages;
mod service;
mod state;
mod systems;
mod transition;


pub use desktop::DesktopLocationService;
pub use messages::{
    AuthorizationChanged, LocationFix, RequestAuthorization, RestartSensing, SensingFailed,
};
pub use service::{LocationService, LocationServices, PermissionRequest, SensingError};
pub use state::{Advisory, AuthorizationState, LocationAdvisory, LocationState, PermissionPrompt};
pub use systems::answer_permission_prompt;
pub use transition::{transition, LocationEvent, SensorEffect};

use bevy::prelude::*;

use crate::config::ConfigLoaded;

pub struct LocationPlugin;

impl Plugin for LocationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LocationState>()
            .init_resource::<LocationAdvisory>()
            .init_resource::<PermissionPrompt>()
            .add_message::<RequestAuthorization>()
            .add_message::<AuthorizationChanged>()
            .add_message::<LocationFix>()
            .add_message::<SensingFailed>()
            .add_message::<RestartSensing>()
            .add_systems(
                Startup,
                systems::install_location_service.after(ConfigLoaded),
            )
            .add_systems(Update, systems::process_location_events);
    }
}
