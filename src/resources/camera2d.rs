//! World to screen camera shared by the follow logic and the render pass.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Camera2D, Vector2};

/// The active 2D camera parameters, wrapping raylib's [`Camera2D`].
#[derive(Resource)]
pub struct Camera2DRes(pub Camera2D);

impl Camera2DRes {
    /// Camera anchored at the middle of a `w` by `h` viewport, unrotated and
    /// at 1:1 zoom. The world target starts at the origin.
    pub fn centered(w: f32, h: f32) -> Self {
        Camera2DRes(Camera2D {
            target: Vector2 { x: 0.0, y: 0.0 },
            offset: Vector2 {
                x: w * 0.5,
                y: h * 0.5,
            },
            rotation: 0.0,
            zoom: 1.0,
        })
    }
}
