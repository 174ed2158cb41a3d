//! Coin pickup component.
//!
//! Coins are sensor-collider entities. When the player enters one, the
//! pickup observer in [`crate::systems::collision`] despawns the coin, adds
//! its value to the `coins` world signal and plays the pickup cue.

use bevy_ecs::prelude::Component;

/// A collectible coin worth `value` units.
#[derive(Component, Clone, Copy, Debug)]
pub struct Coin {
    pub value: i32,
}

impl Coin {
    pub fn new(value: i32) -> Self {
        Self { value }
    }
}

impl Default for Coin {
    fn default() -> Self {
        Self { value: 1 }
    }
}
