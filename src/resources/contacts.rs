//! Book keeping for collider overlaps across frames.
//!
//! The collision detector compares the overlaps it finds this frame against
//! this resource to decide which contacts just started and which just ended,
//! then stores the new sets. Without it every frame of continued overlap
//! would look like a fresh contact.

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::FxHashSet;

/// Overlap sets carried over from the previous physics tick.
#[derive(Resource, Debug, Default)]
pub struct ActiveContacts {
    /// Solid versus solid contacts, keyed by [`pair_key`].
    pub solid: FxHashSet<(Entity, Entity)>,
    /// Sensor overlaps as `(sensor, visitor)`.
    pub sensor: FxHashSet<(Entity, Entity)>,
}

/// Canonical ordering for a solid contact pair.
///
/// Solid contacts are symmetric, so the pair is stored smaller entity first
/// to make `(a, b)` and `(b, a)` the same key.
pub fn pair_key(a: Entity, b: Entity) -> (Entity, Entity) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::World;

    #[test]
    fn test_pair_key_is_symmetric() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        assert_eq!(pair_key(a, b), pair_key(b, a));
        assert_eq!(pair_key(a, a), (a, a));
    }
}
