use bevy::prelude::*;

use super::components::{AnnotationSelected, PinAnnotation, SelectedPin};
use super::gesture::MapClicked;
use crate::constants::PIN_HIT_RADIUS_PX;
use crate::map::MapViewport;

/// Closest pin within the hit radius of a window point
pub fn pin_at<'a>(
    viewport: &MapViewport,
    screen_point: Vec2,
    pins: impl Iterator<Item = (Entity, &'a PinAnnotation)>,
) -> Option<(Entity, &'a PinAnnotation)> {
    let click = viewport.screen_to_world(screen_point);

    pins.map(|(entity, pin)| (entity, pin, viewport.to_world(pin.coordinate).distance(click)))
        .filter(|(_, _, distance)| *distance <= PIN_HIT_RADIUS_PX)
        .min_by(|a, b| a.2.total_cmp(&b.2))
        .map(|(entity, pin, _)| (entity, pin))
}

/// Select the clicked pin, or clear the selection when clicking empty map
pub fn select_pin_on_click(
    mut commands: Commands,
    mut clicks: MessageReader<MapClicked>,
    viewport: Res<MapViewport>,
    pins: Query<(Entity, &PinAnnotation)>,
    selected: Query<Entity, With<SelectedPin>>,
    mut selections: MessageWriter<AnnotationSelected>,
) {
    for click in clicks.read() {
        for entity in selected.iter() {
            commands.entity(entity).remove::<SelectedPin>();
        }

        let Some((entity, pin)) = pin_at(&viewport, click.screen_point, pins.iter()) else {
            continue;
        };

        commands.entity(entity).insert(SelectedPin);
        selections.write(AnnotationSelected {
            pin: entity,
            coordinate: pin.coordinate,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{CoordinateSpan, GeoCoordinate};

    const SIZE: Vec2 = Vec2::new(800.0, 600.0);

    fn viewport() -> MapViewport {
        MapViewport::new(GeoCoordinate::new(35.0, 139.0), CoordinateSpan::default(), SIZE)
    }

    #[test]
    fn test_click_on_pin_hits() {
        let viewport = viewport();
        let screen = Vec2::new(300.0, 200.0);
        let pin = PinAnnotation::new(viewport.project(screen));
        let entity = World::new().spawn_empty().id();

        let hit = pin_at(&viewport, screen + Vec2::new(5.0, 5.0), [(entity, &pin)].into_iter());
        assert_eq!(hit.map(|(e, _)| e), Some(entity));
    }

    #[test]
    fn test_click_away_from_pin_misses() {
        let viewport = viewport();
        let pin = PinAnnotation::new(viewport.project(Vec2::new(300.0, 200.0)));
        let entity = World::new().spawn_empty().id();

        let hit = pin_at(&viewport, Vec2::new(400.0, 200.0), [(entity, &pin)].into_iter());
        assert!(hit.is_none());
    }

    #[test]
    fn test_nearest_pin_wins() {
        let viewport = viewport();
        let near = PinAnnotation::new(viewport.project(Vec2::new(302.0, 200.0)));
        let far = PinAnnotation::new(viewport.project(Vec2::new(310.0, 200.0)));
        let mut world = World::new();
        let near_entity = world.spawn_empty().id();
        let far_entity = world.spawn_empty().id();

        let hit = pin_at(
            &viewport,
            Vec2::new(300.0, 200.0),
            [(far_entity, &far), (near_entity, &near)].into_iter(),
        );
        assert_eq!(hit.map(|(e, _)| e), Some(near_entity));
    }
}
