//! Authorization and location state owned by the coordinator.

use bevy::prelude::*;
use std::fmt;

use crate::geo::GeoCoordinate;

/// Location permission as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorizationState {
    #[default]
    NotDetermined,
    Denied,
    Restricted,
    Authorized,
}

impl fmt::Display for AuthorizationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthorizationState::NotDetermined => "not determined",
            AuthorizationState::Denied => "denied",
            AuthorizationState::Restricted => "restricted",
            AuthorizationState::Authorized => "authorized",
        };
        f.write_str(name)
    }
}

/// User-facing advice about why the map cannot show the user's position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    ServicesDisabled,
    PermissionDenied,
    PermissionRestricted,
}

impl Advisory {
    pub fn message(&self) -> &'static str {
        match self {
            Advisory::ServicesDisabled => {
                "Location services are turned off. Enable them in your system privacy settings."
            }
            Advisory::PermissionDenied => {
                "Location access was denied. Allow it in settings to see your position."
            }
            Advisory::PermissionRestricted => "Location access is restricted on this device.",
        }
    }
}

/// The coordinator's view of permission and position for this session
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LocationState {
    pub authorization: AuthorizationState,
    /// Most recent fix; absent until the first one arrives
    pub current_location: Option<GeoCoordinate>,
    /// A sensing request is outstanding
    pub sensing: bool,
    /// Sensing was started this session; only an explicit restart starts it again
    pub sensing_started: bool,
    pub services_enabled: bool,
    /// The services-disabled advisory has already been shown
    pub services_reported: bool,
}

impl Default for LocationState {
    fn default() -> Self {
        Self {
            authorization: AuthorizationState::NotDetermined,
            current_location: None,
            sensing: false,
            sensing_started: false,
            services_enabled: true,
            services_reported: false,
        }
    }
}

/// The advisory currently shown in the banner
#[derive(Resource, Default)]
pub struct LocationAdvisory {
    pub current: Option<Advisory>,
}

/// Set while the in-app permission prompt is waiting for the user
#[derive(Resource, Default)]
pub struct PermissionPrompt {
    pub pending: bool,
}
