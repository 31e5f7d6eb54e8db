use bevy::prelude::*;

use crate::geo::{pin_label, GeoCoordinate};

/// A dropped pin on the map
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PinAnnotation {
    pub coordinate: GeoCoordinate,
    /// Callout text, `"latitude: <lat>, longitude: <lon>"`
    pub label: String,
}

impl PinAnnotation {
    pub fn new(coordinate: GeoCoordinate) -> Self {
        Self {
            coordinate,
            label: pin_label(coordinate),
        }
    }
}

/// Marker for the pin whose callout is showing
#[derive(Component)]
pub struct SelectedPin;

/// A pin was selected on the map
#[derive(Message, Debug, Clone, Copy)]
pub struct AnnotationSelected {
    pub pin: Entity,
    pub coordinate: GeoCoordinate,
}
