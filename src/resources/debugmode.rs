//! Debug overlay marker.
//!
//! Present while collider outlines, entity markers and timing text should be
//! drawn. Toggled at runtime from the keyboard.

use bevy_ecs::prelude::Resource;

/// Marker resource raised while debug rendering is on.
#[derive(Resource, Clone, Copy)]
pub struct DebugMode;
