//! Pin placement: long-press gestures become map annotations.
//!
//! ## Module Structure
//!
//! - [`gesture`] - long-press recognizer and the gesture/click messages
//! - [`placement`] - turns qualifying gestures into [`PinAnnotation`] entities
//! - [`selection`] - click hit testing and [`AnnotationSelected`]
//! - [`rendering`] - gizmo markers

mod components;
mod gesture;
mod placement;
mod rendering;
mod selection;


pub use components::{AnnotationSelected, PinAnnotation, SelectedPin};
pub use gesture::{GesturePhase, LongPressGesture, MapClicked};
pub use placement::should_place_pin;

use bevy::prelude::*;

use crate::map::ViewportSynced;

pub struct PinPlugin;

impl Plugin for PinPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<gesture::LongPressRecognizer>()
            .add_message::<LongPressGesture>()
            .add_message::<MapClicked>()
            .add_message::<AnnotationSelected>()
            .add_systems(
                Update,
                (
                    gesture::recognize_pointer,
                    placement::handle_long_press,
                    selection::select_pin_on_click,
                )
                    .chain()
                    .before(ViewportSynced),
            )
            .add_systems(Update, rendering::draw_pins.after(ViewportSynced));
    }
}
