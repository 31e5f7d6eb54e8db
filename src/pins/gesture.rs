//! Long-press recognition on the primary mouse button.
//!
//! [`LongPressRecognizer`] is fed raw pointer input and decides whether the
//! pointer is doing a long press, a click, or a drag. The system that feeds it
//! only translates Bevy input into [`PointerInput`].

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::constants::{LONG_PRESS_SECS, LONG_PRESS_SLOP_PX};
use crate::map::MapViewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// A long-press gesture event from the map surface
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct LongPressGesture {
    pub phase: GesturePhase,
    /// Window position (origin top-left)
    pub screen_point: Vec2,
}

/// A short press and release without movement
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct MapClicked {
    pub screen_point: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Pressed(Vec2),
    Held { position: Vec2, dt: f32 },
    Released(Vec2),
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    Gesture(LongPressGesture),
    Click(Vec2),
    /// Pointer moved by this many pixels while dragging the map
    Drag(Vec2),
}

#[derive(Debug, Clone, Copy)]
struct Press {
    origin: Vec2,
    last: Vec2,
    held: f32,
    recognized: bool,
    dragging: bool,
}

#[derive(Resource, Default)]
pub struct LongPressRecognizer {
    press: Option<Press>,
}

impl LongPressRecognizer {
    pub fn is_tracking(&self) -> bool {
        self.press.is_some()
    }

    pub fn feed(&mut self, input: PointerInput) -> Option<PointerOutcome> {
        match input {
            PointerInput::Pressed(position) => {
                self.press = Some(Press {
                    origin: position,
                    last: position,
                    held: 0.0,
                    recognized: false,
                    dragging: false,
                });
                None
            }
            PointerInput::Held { position, dt } => {
                let press = self.press.as_mut()?;
                press.held += dt;

                if press.recognized {
                    if position == press.last {
                        return None;
                    }
                    press.last = position;
                    return Some(gesture(GesturePhase::Changed, position));
                }

                if !press.dragging && position.distance(press.origin) > LONG_PRESS_SLOP_PX {
                    press.dragging = true;
                }

                if press.dragging {
                    let delta = position - press.last;
                    press.last = position;
                    return (delta != Vec2::ZERO).then_some(PointerOutcome::Drag(delta));
                }

                if press.held >= LONG_PRESS_SECS {
                    press.recognized = true;
                    press.last = position;
                    return Some(gesture(GesturePhase::Began, position));
                }

                None
            }
            PointerInput::Released(position) => {
                let press = self.press.take()?;
                if press.recognized {
                    Some(gesture(GesturePhase::Ended, position))
                } else if !press.dragging {
                    Some(PointerOutcome::Click(position))
                } else {
                    None
                }
            }
            PointerInput::Cancel => {
                let press = self.press.take()?;
                press
                    .recognized
                    .then_some(gesture(GesturePhase::Cancelled, press.last))
            }
        }
    }
}

fn gesture(phase: GesturePhase, screen_point: Vec2) -> PointerOutcome {
    PointerOutcome::Gesture(LongPressGesture {
        phase,
        screen_point,
    })
}

/// Turn left-button input into long-press gestures, clicks and map drags
#[allow(clippy::too_many_arguments)]
pub fn recognize_pointer(
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut recognizer: ResMut<LongPressRecognizer>,
    mut viewport: ResMut<MapViewport>,
    mut gestures: MessageWriter<LongPressGesture>,
    mut clicks: MessageWriter<MapClicked>,
    mut contexts: EguiContexts,
) {
    let Ok(window) = window_query.single() else {
        return;
    };

    let cursor = window.cursor_position();

    let lost_cursor = cursor.is_none() && recognizer.is_tracking();

    let input = if keyboard.just_pressed(KeyCode::Escape) || lost_cursor {
        Some(PointerInput::Cancel)
    } else if mouse_button.just_pressed(MouseButton::Left) {
        // Presses that start on UI panels never become map gestures
        let over_ui = contexts
            .ctx_mut()
            .map(|ctx| ctx.is_pointer_over_area())
            .unwrap_or(false);
        cursor
            .filter(|_| !over_ui)
            .map(PointerInput::Pressed)
    } else if mouse_button.just_released(MouseButton::Left) {
        cursor.map(PointerInput::Released)
    } else if mouse_button.pressed(MouseButton::Left) {
        cursor.map(|position| PointerInput::Held {
            position,
            dt: time.delta_secs(),
        })
    } else {
        None
    };

    let Some(input) = input else {
        return;
    };

    match recognizer.feed(input) {
        Some(PointerOutcome::Gesture(event)) => {
            gestures.write(event);
        }
        Some(PointerOutcome::Click(screen_point)) => {
            clicks.write(MapClicked { screen_point });
        }
        Some(PointerOutcome::Drag(delta)) => viewport.pan_by_pixels(delta),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: Vec2 = Vec2::new(100.0, 100.0);

    fn held(position: Vec2, dt: f32) -> PointerInput {
        PointerInput::Held { position, dt }
    }

    fn phase(outcome: Option<PointerOutcome>) -> Option<GesturePhase> {
        match outcome {
            Some(PointerOutcome::Gesture(g)) => Some(g.phase),
            _ => None,
        }
    }

    #[test]
    fn test_short_press_is_click() {
        let mut recognizer = LongPressRecognizer::default();
        recognizer.feed(PointerInput::Pressed(P));
        assert_eq!(recognizer.feed(held(P, 0.1)), None);
        assert_eq!(
            recognizer.feed(PointerInput::Released(P)),
            Some(PointerOutcome::Click(P))
        );
    }

    #[test]
    fn test_hold_begins_then_ends() {
        let mut recognizer = LongPressRecognizer::default();
        recognizer.feed(PointerInput::Pressed(P));
        assert_eq!(recognizer.feed(held(P, 0.3)), None);
        assert_eq!(phase(recognizer.feed(held(P, 0.3))), Some(GesturePhase::Began));
        // Holding still produces nothing more
        assert_eq!(recognizer.feed(held(P, 0.3)), None);
        assert_eq!(
            phase(recognizer.feed(PointerInput::Released(P))),
            Some(GesturePhase::Ended)
        );
        assert!(!recognizer.is_tracking());
    }

    #[test]
    fn test_moving_after_recognition_reports_changes() {
        let mut recognizer = LongPressRecognizer::default();
        recognizer.feed(PointerInput::Pressed(P));
        recognizer.feed(held(P, LONG_PRESS_SECS));
        let moved = P + Vec2::new(30.0, 0.0);
        assert_eq!(phase(recognizer.feed(held(moved, 0.016))), Some(GesturePhase::Changed));
        let moved_again = moved + Vec2::new(5.0, 5.0);
        let outcome = recognizer.feed(held(moved_again, 0.016));
        assert_eq!(
            outcome,
            Some(PointerOutcome::Gesture(LongPressGesture {
                phase: GesturePhase::Changed,
                screen_point: moved_again,
            }))
        );
    }

    #[test]
    fn test_drag_before_threshold_pans_instead() {
        let mut recognizer = LongPressRecognizer::default();
        recognizer.feed(PointerInput::Pressed(P));
        let far = P + Vec2::new(20.0, 0.0);
        assert_eq!(
            recognizer.feed(held(far, 0.1)),
            Some(PointerOutcome::Drag(Vec2::new(20.0, 0.0)))
        );
        // Never becomes a long press, even when held long enough
        assert_eq!(recognizer.feed(held(far, 2.0)), None);
        assert_eq!(recognizer.feed(PointerInput::Released(far)), None);
    }

    #[test]
    fn test_small_jitter_still_recognized() {
        let mut recognizer = LongPressRecognizer::default();
        recognizer.feed(PointerInput::Pressed(P));
        let jitter = P + Vec2::new(2.0, -2.0);
        assert_eq!(
            phase(recognizer.feed(held(jitter, LONG_PRESS_SECS))),
            Some(GesturePhase::Began)
        );
    }

    #[test]
    fn test_cancel_only_reports_recognized_press() {
        let mut recognizer = LongPressRecognizer::default();
        recognizer.feed(PointerInput::Pressed(P));
        assert_eq!(recognizer.feed(PointerInput::Cancel), None);

        recognizer.feed(PointerInput::Pressed(P));
        recognizer.feed(held(P, LONG_PRESS_SECS));
        assert_eq!(
            phase(recognizer.feed(PointerInput::Cancel)),
            Some(GesturePhase::Cancelled)
        );
        assert_eq!(recognizer.feed(PointerInput::Released(P)), None);
    }

    #[test]
    fn test_held_without_press_is_ignored() {
        let mut recognizer = LongPressRecognizer::default();
        assert_eq!(recognizer.feed(held(P, 5.0)), None);
    }
}
