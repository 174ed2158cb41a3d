//! Draw order component.
//!
//! [`ZIndex`] controls the drawing order of entities. Higher values are
//! drawn later, on top of lower ones: background layers use negative
//! values, the player and pickups sit above zero.

use bevy_ecs::prelude::Component;

/// Sort key for the world pass; sprites draw in ascending order.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);
