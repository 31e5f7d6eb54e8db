//! The map display surface: visible region, camera input and base drawing.
//!
//! Pins and route overlays live in their own modules and draw themselves
//! through [`MapViewport::to_world`].

mod camera;
mod graticule;
mod markers;
mod viewport;

pub use viewport::MapViewport;

use bevy::prelude::*;

use crate::config::ConfigLoaded;

/// Runs before anything that reads the viewport in a frame
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewportSynced;

pub struct MapPlugin;

impl Plugin for MapPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MapViewport>()
            .add_systems(
                Startup,
                (
                    camera::spawn_camera,
                    camera::apply_initial_region.after(ConfigLoaded),
                ),
            )
            .add_systems(
                Update,
                (
                    camera::sync_viewport_size,
                    camera::map_pan,
                    camera::map_zoom,
                    camera::animate_region,
                )
                    .chain()
                    .in_set(ViewportSynced),
            )
            .add_systems(
                Update,
                (graticule::draw_graticule, markers::draw_current_location)
                    .after(ViewportSynced),
            );
    }
}
