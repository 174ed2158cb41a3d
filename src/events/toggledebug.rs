//! Debug overlay switching.
//!
//! Emitting a [`ToggleDebugEvent`] flips the presence of the [`DebugMode`]
//! resource. Systems that draw overlays gate on that resource.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::resources::debugmode::DebugMode;

/// Asks for the debug overlay to be switched on or off.
///
/// Carries no data; the observer just flips the marker resource.
#[derive(Event, Debug, Clone, Copy)]
pub struct ToggleDebugEvent {}

/// Observer that flips [`DebugMode`] on each toggle event.
pub fn toggle_debug_observer(
    _trigger: On<ToggleDebugEvent>,
    mut commands: Commands,
    marker: Option<Res<DebugMode>>,
) {
    let enable = marker.is_none();
    if enable {
        commands.insert_resource(DebugMode);
    } else {
        commands.remove_resource::<DebugMode>();
    }
    info!("Debug overlay {}", if enable { "on" } else { "off" });
}
