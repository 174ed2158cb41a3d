//! Per-frame keyboard input resource.
//!
//! [`InputState`] holds one [`KeyState`] per game action, refreshed once per
//! frame by the input system. Movement uses A/D with the arrow keys as an
//! alternative, space jumps, E interacts.

use bevy_ecs::prelude::Resource;
use raylib::prelude::KeyboardKey;

/// Edge-tracked state of one bound key.
#[derive(Debug, Clone, Copy)]
pub struct KeyState {
    /// Bound keyboard key.
    pub key: KeyboardKey,
    /// Held down this frame.
    pub down: bool,
    /// Went down this frame.
    pub pressed: bool,
    /// Went up this frame.
    pub released: bool,
}

impl KeyState {
    fn bound_to(key: KeyboardKey) -> Self {
        Self {
            key,
            down: false,
            pressed: false,
            released: false,
        }
    }

    /// Fold this frame's raw key level into the edge flags. Call exactly once
    /// per frame, before anything reads the state.
    pub fn update(&mut self, down_now: bool) {
        self.pressed = down_now && !self.down;
        self.released = !down_now && self.down;
        self.down = down_now;
    }
}

impl Default for KeyState {
    fn default() -> Self {
        Self::bound_to(KeyboardKey::KEY_NULL)
    }
}

/// Keyboard state for every game action, refreshed each frame.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub move_left: KeyState,
    pub move_right: KeyState,
    // Arrow key alternatives
    pub alt_left: KeyState,
    pub alt_right: KeyState,
    // Actions
    pub jump: KeyState,
    pub interact: KeyState,
    pub back: KeyState,
    pub toggle_debug: KeyState,
    pub toggle_fullscreen: KeyState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            move_left: KeyState::bound_to(KeyboardKey::KEY_A),
            move_right: KeyState::bound_to(KeyboardKey::KEY_D),
            alt_left: KeyState::bound_to(KeyboardKey::KEY_LEFT),
            alt_right: KeyState::bound_to(KeyboardKey::KEY_RIGHT),
            jump: KeyState::bound_to(KeyboardKey::KEY_SPACE),
            interact: KeyState::bound_to(KeyboardKey::KEY_E),
            back: KeyState::bound_to(KeyboardKey::KEY_ESCAPE),
            toggle_debug: KeyState::bound_to(KeyboardKey::KEY_F11),
            toggle_fullscreen: KeyState::bound_to(KeyboardKey::KEY_F10),
        }
    }
}

impl InputState {
    /// Horizontal movement axis in {-1, 0, 1}.
    ///
    /// Primary and alternative bindings are merged; holding both directions
    /// cancels out.
    pub fn horizontal_axis(&self) -> f32 {
        let right = self.move_right.down || self.alt_right.down;
        let left = self.move_left.down || self.alt_left.down;
        (right as i32 - left as i32) as f32
    }
}
