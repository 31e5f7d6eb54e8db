use bevy::prelude::*;

use super::components::PinAnnotation;
use super::gesture::{GesturePhase, LongPressGesture};
use crate::map::MapViewport;

/// Whether a gesture phase commits a pin.
///
/// `Began` fires the instant the hold threshold is reached, before the user has
/// committed, so it never places a pin. Every `Changed` and `Ended` does.
pub fn should_place_pin(phase: GesturePhase) -> bool {
    match phase {
        GesturePhase::Changed | GesturePhase::Ended => true,
        GesturePhase::Began | GesturePhase::Cancelled => false,
    }
}

/// Drop a pin for every qualifying long-press event. Pins are never merged.
pub fn handle_long_press(
    mut commands: Commands,
    mut gestures: MessageReader<LongPressGesture>,
    viewport: Res<MapViewport>,
) {
    for gesture in gestures.read() {
        if !should_place_pin(gesture.phase) {
            continue;
        }

        let coordinate = viewport.project(gesture.screen_point);
        let pin = PinAnnotation::new(coordinate);
        debug!("Dropping pin: {}", pin.label);
        commands.spawn(pin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_changed_and_ended_place_pins() {
        assert!(!should_place_pin(GesturePhase::Began));
        assert!(should_place_pin(GesturePhase::Changed));
        assert!(should_place_pin(GesturePhase::Ended));
        assert!(!should_place_pin(GesturePhase::Cancelled));
    }
}
