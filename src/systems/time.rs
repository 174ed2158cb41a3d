//! Frame clock update.
//!
//! Advances the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame. Runs before everything else so systems in the
//! same frame read a consistent delta.

use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Feed the raw frame delta from the window into [`WorldTime`].
pub fn update_world_time(world: &mut World, dt: f32) {
    world.resource_mut::<WorldTime>().advance(dt);
}
