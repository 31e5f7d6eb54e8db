//! The permission/sensor seam.
//!
//! The coordinator talks to the platform only through [`LocationService`], so
//! tests can swap in a scripted double.

use bevy::prelude::*;
use futures_lite::future::Boxed;
use std::fmt;

use super::state::AuthorizationState;
use crate::geo::GeoCoordinate;

/// Outcome of asking the platform for permission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionRequest {
    /// The user must answer the in-app prompt; the answer arrives as `AuthorizationChanged`
    Prompt,
    /// The platform answered without asking the user
    Resolved(AuthorizationState),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SensingError {
    /// The location source could not be reached
    Unavailable(String),
    /// The location source answered with something unusable
    InvalidResponse(String),
    /// The source answered but could not place the device
    LocationUnknown,
}

impl fmt::Display for SensingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensingError::Unavailable(msg) => write!(f, "location source unavailable: {}", msg),
            SensingError::InvalidResponse(msg) => {
                write!(f, "invalid location response: {}", msg)
            }
            SensingError::LocationUnknown => write!(f, "location unknown"),
        }
    }
}

impl std::error::Error for SensingError {}

pub trait LocationService: Send + Sync + 'static {
    /// False when location services are switched off at the OS level
    fn services_enabled(&self) -> bool;

    fn request_permission(&mut self) -> PermissionRequest;

    /// Begin sensing; the future resolves with the next fix.
    fn start_sensing(&mut self) -> Boxed<Result<GeoCoordinate, SensingError>>;

    fn stop_sensing(&mut self);
}

/// The installed location service
#[derive(Resource)]
pub struct LocationServices(pub Box<dyn LocationService>);
