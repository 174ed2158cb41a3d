//! World-space position component.
//!
//! [`MapPosition`] is the pivot point of an entity in world (map) coordinates.
//! The render system places sprites relative to it and the movement system
//! integrates velocities into it. For screen-fixed UI, see
//! [`ScreenPosition`](super::screenposition::ScreenPosition).

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// World-space position (pivot) of an entity, in pixels. Y grows downward.
#[derive(Component, Clone, Copy, Debug)]
pub struct MapPosition {
    pub pos: Vector2,
}

impl MapPosition {
    /// Create a MapPosition from x and y.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2 { x, y },
        }
    }

    /// Create a MapPosition from an existing Vector2.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn from_vec(pos: Vector2) -> Self {
        Self { pos }
    }
}
