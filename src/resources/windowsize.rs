//! Real OS window dimensions.
//!
//! These usually differ from the fixed internal render resolution. The value
//! is refreshed every frame so resizes are picked up immediately.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{RaylibHandle, Rectangle, Vector2};

/// Current OS window size in pixels.
///
/// Use this for scaling the internal render target onto the window; game and
/// HUD code should use [`ScreenSize`](crate::resources::screensize::ScreenSize)
/// instead.
#[derive(Resource, Clone, Copy)]
pub struct WindowSize {
    pub w: i32,
    pub h: i32,
}

impl WindowSize {
    /// Snapshot the current OS window dimensions.
    pub fn measure(rl: &RaylibHandle) -> Self {
        Self {
            w: rl.get_screen_width(),
            h: rl.get_screen_height(),
        }
    }

    /// Destination rectangle that fits the render target into the window.
    ///
    /// Scales uniformly to the largest size that still fits, then centers.
    /// The leftover space becomes black bars, on the sides or on top and
    /// bottom depending on which axis limited the scale.
    pub fn letterbox_rect(&self, target_w: u32, target_h: u32) -> Rectangle {
        let tw = target_w as f32;
        let th = target_h as f32;
        let scale = (self.w as f32 / tw).min(self.h as f32 / th);
        let width = tw * scale;
        let height = th * scale;
        Rectangle {
            x: (self.w as f32 - width) / 2.0,
            y: (self.h as f32 - height) / 2.0,
            width,
            height,
        }
    }

    /// Map a window space position into render target space.
    ///
    /// Undoes the letterbox transform. Positions inside the black bars clamp
    /// to the nearest game edge.
    pub fn to_game_coords(&self, window_pos: Vector2, target_w: u32, target_h: u32) -> Vector2 {
        let rect = self.letterbox_rect(target_w, target_h);
        // The rect preserves aspect ratio, so one scale covers both axes.
        let scale = target_w as f32 / rect.width;
        Vector2 {
            x: ((window_pos.x - rect.x) * scale).clamp(0.0, target_w as f32),
            y: ((window_pos.y - rect.y) * scale).clamp(0.0, target_h as f32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_wide_window_gets_side_bars() {
        let window = WindowSize { w: 1280, h: 360 };
        let rect = window.letterbox_rect(640, 360);
        assert!(approx_eq(rect.width, 640.0)); // scale 1, centered
        assert!(approx_eq(rect.x, 320.0));
        assert!(approx_eq(rect.y, 0.0));
        assert!(approx_eq(rect.height, 360.0));
    }

    #[test]
    fn test_tall_window_gets_top_and_bottom_bars() {
        let window = WindowSize { w: 640, h: 720 };
        let rect = window.letterbox_rect(640, 360);
        assert!(approx_eq(rect.height, 360.0));
        assert!(approx_eq(rect.y, 180.0));
        assert!(approx_eq(rect.x, 0.0));
    }

    #[test]
    fn test_mouse_in_bar_clamps_to_edge() {
        let window = WindowSize { w: 1280, h: 360 };
        let pos = window.to_game_coords(Vector2 { x: 10.0, y: 100.0 }, 640, 360);
        assert!(approx_eq(pos.x, 0.0)); // left bar
        assert!(approx_eq(pos.y, 100.0));
    }

    #[test]
    fn test_scaled_window_maps_back_to_game_pixels() {
        let window = WindowSize { w: 1280, h: 720 };
        let pos = window.to_game_coords(Vector2 { x: 640.0, y: 360.0 }, 640, 360);
        assert!(approx_eq(pos.x, 320.0));
        assert!(approx_eq(pos.y, 180.0));
    }
}
