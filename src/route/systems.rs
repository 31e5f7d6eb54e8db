use bevy::prelude::*;

use super::backend::{RoutePath, Router, RoutingError, TransportMode};
use super::osrm::OsrmRouter;
use super::overlay::RouteOverlay;
use crate::config::AppConfig;
use crate::dispatch::{run_in_background, BackgroundKind, UiCallback};
use crate::geo::GeoCoordinate;
use crate::location::LocationState;
use crate::pins::AnnotationSelected;

/// A routing response, delivered on the main schedule
#[derive(Message, Debug, Clone)]
pub struct RouteComputed {
    pub generation: u64,
    pub destination: GeoCoordinate,
    pub result: Result<Vec<RoutePath>, RoutingError>,
}

/// Tracks the newest route request; responses to older ones are dropped
#[derive(Resource, Default, Debug)]
pub struct RouteRequests {
    latest: u64,
    in_flight: bool,
}

impl RouteRequests {
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.in_flight = true;
        self.latest
    }

    /// True if `generation` is the newest request; marks it finished
    pub fn finish(&mut self, generation: u64) -> bool {
        if generation != self.latest {
            return false;
        }
        self.in_flight = false;
        true
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }
}

/// Startup system: install the OSRM router unless one was provided
pub fn install_router(
    mut commands: Commands,
    config: Res<AppConfig>,
    existing: Option<Res<Router>>,
) {
    if existing.is_none() {
        commands.insert_resource(Router(Box::new(OsrmRouter::from_config(&config.data))));
    }
}

fn clear_overlays(commands: &mut Commands, overlays: &Query<Entity, With<RouteOverlay>>) {
    for entity in overlays.iter() {
        commands.entity(entity).despawn();
    }
}

/// Request a walking route from the current location to each selected pin
pub fn show_route(
    mut commands: Commands,
    mut selections: MessageReader<AnnotationSelected>,
    location: Res<LocationState>,
    router: Res<Router>,
    mut requests: ResMut<RouteRequests>,
    overlays: Query<Entity, With<RouteOverlay>>,
) {
    for selection in selections.read() {
        let destination = selection.coordinate;

        let Some(source) = location.current_location else {
            debug!("No current location yet, not routing to {}", destination);
            continue;
        };

        clear_overlays(&mut commands, &overlays);

        let generation = requests.begin();
        info!("Routing from {} to {} (request {})", source, destination, generation);

        let request = router
            .0
            .compute_route(source, destination, TransportMode::Walking);
        run_in_background(&mut commands, BackgroundKind::Routing, async move {
            let result = request.await;
            Box::new(move |world: &mut World| {
                world.write_message(RouteComputed {
                    generation,
                    destination,
                    result,
                });
            }) as UiCallback
        });
    }
}

/// Replace the overlay with the first candidate of the newest response
pub fn apply_route_response(
    mut commands: Commands,
    mut responses: MessageReader<RouteComputed>,
    mut requests: ResMut<RouteRequests>,
    overlays: Query<Entity, With<RouteOverlay>>,
) {
    for response in responses.read() {
        if !requests.finish(response.generation) {
            debug!(
                "Discarding superseded route response (request {})",
                response.generation
            );
            continue;
        }

        clear_overlays(&mut commands, &overlays);

        match &response.result {
            Ok(routes) => match routes.first() {
                Some(route) => {
                    info!(
                        "Route to {}: {:.0} m, {:.0} s ({} candidates)",
                        response.destination,
                        route.distance,
                        route.duration,
                        routes.len()
                    );
                    commands.spawn(RouteOverlay::walking(route));
                }
                None => warn!(
                    "Routing to {} failed: {}",
                    response.destination,
                    RoutingError::NoRoutes
                ),
            },
            Err(e) => warn!("Routing to {} failed: {}", response.destination, e),
        }
    }
}
