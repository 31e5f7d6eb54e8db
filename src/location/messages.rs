//! Host entry points for the location coordinator.

use bevy::prelude::*;

use super::service::SensingError;
use super::state::AuthorizationState;
use crate::geo::GeoCoordinate;

/// Ask for location permission unless it has already been decided
#[derive(Message)]
pub struct RequestAuthorization;

/// The platform reported a new authorization status
#[derive(Message, Debug, Clone, Copy)]
pub struct AuthorizationChanged {
    pub status: AuthorizationState,
}

/// The sensor produced a position
#[derive(Message, Debug, Clone, Copy)]
pub struct LocationFix {
    pub coordinate: GeoCoordinate,
}

/// The sensor could not produce a position
#[derive(Message, Debug, Clone)]
pub struct SensingFailed {
    pub error: SensingError,
}

/// Start sensing again so the next fix replaces the current location
#[derive(Message)]
pub struct RestartSensing;
