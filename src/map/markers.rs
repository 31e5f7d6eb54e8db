use bevy::prelude::*;

use super::MapViewport;
use crate::location::LocationState;
use crate::theme;

/// Blue dot at the most recent fix
pub fn draw_current_location(
    mut gizmos: Gizmos,
    viewport: Res<MapViewport>,
    location: Res<LocationState>,
) {
    let Some(current) = location.current_location else {
        return;
    };

    let position = viewport.to_world(current);
    gizmos.circle_2d(position, 9.0, theme::USER_LOCATION_HALO);
    gizmos.circle_2d(position, 6.0, theme::USER_LOCATION_COLOR);
    gizmos.circle_2d(position, 3.0, theme::USER_LOCATION_COLOR);
}
