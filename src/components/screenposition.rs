//! HUD anchor component.
//!
//! [`ScreenPosition`] anchors an entity in render-target pixels, bypassing
//! the camera transform. The coin counter and the dialogue line use it; world
//! entities carry a [`MapPosition`](super::mapposition::MapPosition) instead.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Fixed pixel anchor for HUD entities.
///
/// Plain x/y rather than a vector: HUD text never does vector math, it just
/// needs a draw anchor. The text pass draws it once the camera scope ends.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct ScreenPosition {
    pub x: f32,
    pub y: f32,
}

impl ScreenPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The anchor as a raylib vector, for draw calls that want one.
    pub fn anchor(&self) -> Vector2 {
        Vector2 {
            x: self.x,
            y: self.y,
        }
    }
}
