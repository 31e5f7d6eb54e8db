//! Walking routes from the current location to a selected pin.
//!
//! Selecting a pin clears the overlay and issues one request to the
//! [`RoutingBackend`]. When the newest response arrives, the first candidate
//! becomes the only [`RouteOverlay`] on the map. Failures leave the map
//! without an overlay; there is no retry and no straight-line fallback.

mod backend;
mod osrm;
mod overlay;
mod systems;


pub use backend::{RoutePath, Router, RoutingBackend, RoutingError, TransportMode};
pub use osrm::OsrmRouter;
pub use overlay::{OverlayKind, OverlayStroke, RouteOverlay};
pub use systems::{RouteComputed, RouteRequests};

use bevy::prelude::*;

use crate::config::ConfigLoaded;
use crate::map::ViewportSynced;

pub struct RoutePlugin;

impl Plugin for RoutePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RouteRequests>()
            .add_message::<RouteComputed>()
            .init_gizmo_group::<overlay::RouteGizmoGroup>()
            .add_systems(
                Startup,
                (
                    systems::install_router.after(ConfigLoaded),
                    overlay::configure_route_gizmos,
                ),
            )
            .add_systems(
                Update,
                (systems::show_route, systems::apply_route_response).chain(),
            )
            .add_systems(
                Update,
                overlay::draw_route_overlays.after(ViewportSynced),
            );
    }
}
