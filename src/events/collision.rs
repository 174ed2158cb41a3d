//! Collision and sensor overlap events.
//!
//! The collision detector triggers [`CollisionEvent`] when two solid
//! colliders start or stop touching, and [`SensorEvent`] when something
//! enters or leaves a sensor volume. Observers subscribe to these to react in
//! a decoupled way; this module carries the one observer every solid body
//! needs, the [`ContactState`] bookkeeper.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::components::contactstate::ContactState;

/// Fired when two solid colliders start or stop overlapping.
///
/// `a` and `b` are the participants, in no particular order. `started` is
/// true on contact begin and false on contact end; continued overlap fires
/// nothing.
#[derive(Event, Debug, Clone, Copy)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
    pub started: bool,
}

/// Fired when an entity enters or leaves a sensor volume.
///
/// `sensor` is the entity owning the non solid collider, `visitor` the solid
/// one that moved into it. `entered` is true on entry, false on exit.
#[derive(Event, Debug, Clone, Copy)]
pub struct SensorEvent {
    pub sensor: Entity,
    pub visitor: Entity,
    pub entered: bool,
}

/// Keeps [`ContactState`] counters in sync with solid contact events.
///
/// Each participant that carries a `ContactState` gets its counter bumped on
/// contact start and dropped on contact end. Entities without the component
/// are ignored.
pub fn contact_state_observer(
    trigger: On<CollisionEvent>,
    mut states: Query<&mut ContactState>,
) {
    let event = trigger.event();
    for entity in [event.a, event.b] {
        if let Ok(mut state) = states.get_mut(entity) {
            if event.started {
                state.add();
            } else {
                state.remove();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trigger_contact(world: &mut World, a: Entity, b: Entity, started: bool) {
        world.trigger(CollisionEvent { a, b, started });
    }

    #[test]
    fn test_contact_state_tracks_start_and_end() {
        let mut world = World::new();
        world.add_observer(contact_state_observer);

        let a = world.spawn(ContactState::default()).id();
        let b = world.spawn_empty().id();

        trigger_contact(&mut world, a, b, true);
        assert!(world.get::<ContactState>(a).unwrap().touching());

        trigger_contact(&mut world, a, b, false);
        assert!(!world.get::<ContactState>(a).unwrap().touching());
    }

    #[test]
    fn test_overlapping_contacts_keep_touching_until_last_ends() {
        let mut world = World::new();
        world.add_observer(contact_state_observer);

        let a = world.spawn(ContactState::default()).id();
        let b = world.spawn_empty().id();
        let c = world.spawn_empty().id();

        trigger_contact(&mut world, a, b, true);
        trigger_contact(&mut world, c, a, true);
        trigger_contact(&mut world, a, b, false);
        // still touching c
        assert!(world.get::<ContactState>(a).unwrap().touching());

        trigger_contact(&mut world, c, a, false);
        assert!(!world.get::<ContactState>(a).unwrap().touching());
    }
}
