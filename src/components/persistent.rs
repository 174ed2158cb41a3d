//! Cleanup survivor marker.
//!
//! Scene cleanup despawns every entity without a [`Persistent`] component.
//! Infrastructure entities such as global observers and registered systems
//! carry it so state transitions leave them alone.

use bevy_ecs::prelude::Component;

/// Tag component marking entities that survive scene cleanup.
#[derive(Component, Clone, Debug)]
pub struct Persistent;
