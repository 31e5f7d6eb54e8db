use bevy::prelude::*;

use super::components::{PinAnnotation, SelectedPin};
use crate::constants::PIN_RADIUS_PX;
use crate::map::MapViewport;
use crate::theme;

/// Height of the marker stem above the pinned point, in pixels
const PIN_STEM_PX: f32 = 16.0;

pub fn draw_pins(
    mut gizmos: Gizmos,
    viewport: Res<MapViewport>,
    pins: Query<(&PinAnnotation, Has<SelectedPin>)>,
) {
    for (pin, selected) in pins.iter() {
        let tip = viewport.to_world(pin.coordinate);
        let head = tip + Vec2::new(0.0, PIN_STEM_PX);
        let color = if selected {
            theme::PIN_SELECTED_COLOR
        } else {
            theme::PIN_COLOR
        };

        gizmos.line_2d(tip, head - Vec2::new(0.0, PIN_RADIUS_PX), color);
        gizmos.circle_2d(head, PIN_RADIUS_PX, color);
        gizmos.circle_2d(head, PIN_RADIUS_PX * 0.4, color);
    }
}
