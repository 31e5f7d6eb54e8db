//! The routing seam.

use bevy::prelude::*;
use futures_lite::future::Boxed;
use std::fmt;

use crate::geo::GeoCoordinate;

/// Transportation profile for route computations. Only walking is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportMode {
    #[default]
    Walking,
}

impl TransportMode {
    /// OSRM profile name
    pub fn profile(&self) -> &'static str {
        match self {
            TransportMode::Walking => "foot",
        }
    }
}

/// One candidate route returned by the backend
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePath {
    pub points: Vec<GeoCoordinate>,
    /// Metres
    pub distance: f64,
    /// Seconds
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoutingError {
    /// The request never got an answer (DNS, TLS, timeout, ...)
    Transport(String),
    /// The backend answered with an error code
    Backend { code: String, message: String },
    /// The answer could not be understood
    InvalidResponse(String),
    /// The backend answered but offered no route
    NoRoutes,
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingError::Transport(msg) => write!(f, "routing request failed: {}", msg),
            RoutingError::Backend { code, message } => {
                write!(f, "routing backend error {}: {}", code, message)
            }
            RoutingError::InvalidResponse(msg) => write!(f, "invalid routing response: {}", msg),
            RoutingError::NoRoutes => write!(f, "no route found"),
        }
    }
}

impl std::error::Error for RoutingError {}

pub trait RoutingBackend: Send + Sync + 'static {
    /// Candidate routes from `source` to `destination`, best first
    fn compute_route(
        &self,
        source: GeoCoordinate,
        destination: GeoCoordinate,
        mode: TransportMode,
    ) -> Boxed<Result<Vec<RoutePath>, RoutingError>>;
}

/// The installed routing backend
#[derive(Resource)]
pub struct Router(pub Box<dyn RoutingBackend>);
