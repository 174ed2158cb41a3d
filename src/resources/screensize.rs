//! Logical render size resource.
//!
//! Holds the fixed internal resolution the game renders at before the result
//! is letterboxed onto the real window. HUD layout reads this, never the
//! window size.

use bevy_ecs::prelude::Resource;

/// Internal render resolution in pixels.
#[derive(Resource, Clone, Copy)]
pub struct ScreenSize {
    pub w: i32,
    pub h: i32,
}

impl ScreenSize {
    /// Build from the configured render resolution.
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            w: w as i32,
            h: h as i32,
        }
    }
}
