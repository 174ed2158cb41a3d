//! World wide signal store.
//!
//! [`WorldSignals`] is the world wide counterpart of the per entity
//! [`Signals`](crate::components::signals::Signals) component, sharing its
//! [`Signal`] value type. Systems that have no entity to hang data on
//! communicate through it: the coin total, the current dialogue line, quit
//! requests, and named entities of interest such as the player.

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::components::signals::Signal;

/// Signals shared by every system, keyed by name.
///
/// Each key holds one [`Signal`]; writing a different type under the same
/// key replaces the old value. Flags are presence only booleans and live in
/// their own set.
#[derive(Debug, Clone, Resource, Default)]
pub struct WorldSignals {
    values: FxHashMap<String, Signal>,
    raised: FxHashSet<String>,
}

impl WorldSignals {
    pub fn set_scalar(&mut self, key: impl Into<String>, value: f32) {
        self.values.insert(key.into(), Signal::Scalar(value));
    }

    pub fn get_scalar(&self, key: &str) -> Option<f32> {
        match self.values.get(key) {
            Some(Signal::Scalar(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn set_integer(&mut self, key: impl Into<String>, value: i32) {
        self.values.insert(key.into(), Signal::Integer(value));
    }

    pub fn get_integer(&self, key: &str) -> Option<i32> {
        match self.values.get(key) {
            Some(Signal::Integer(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), Signal::Text(value.into()));
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(Signal::Text(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Drop a string signal. Keys holding another type are left alone.
    pub fn remove_string(&mut self, key: &str) {
        if matches!(self.values.get(key), Some(Signal::Text(_))) {
            self.values.remove(key);
        }
    }

    pub fn set_entity(&mut self, key: impl Into<String>, entity: Entity) {
        self.values.insert(key.into(), Signal::Handle(entity));
    }

    pub fn get_entity(&self, key: &str) -> Option<Entity> {
        match self.values.get(key) {
            Some(Signal::Handle(e)) => Some(*e),
            _ => None,
        }
    }

    /// Drop an entity signal. Keys holding another type are left alone.
    pub fn remove_entity(&mut self, key: &str) {
        if matches!(self.values.get(key), Some(Signal::Handle(_))) {
            self.values.remove(key);
        }
    }

    /// Raw slot access, for readers that take any signal type.
    pub fn signal(&self, key: &str) -> Option<&Signal> {
        self.values.get(key)
    }

    pub fn set_flag(&mut self, key: impl Into<String>) {
        self.raised.insert(key.into());
    }

    pub fn clear_flag(&mut self, key: &str) {
        self.raised.remove(key);
    }

    pub fn has_flag(&self, key: &str) -> bool {
        self.raised.contains(key)
    }

    /// All scalar signals, for the debug overlay.
    pub fn scalars(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        self.values.iter().filter_map(|(k, v)| match v {
            Signal::Scalar(x) => Some((k.as_str(), *x)),
            _ => None,
        })
    }

    /// All integer signals, for the debug overlay.
    pub fn integers(&self) -> impl Iterator<Item = (&str, i32)> + '_ {
        self.values.iter().filter_map(|(k, v)| match v {
            Signal::Integer(x) => Some((k.as_str(), *x)),
            _ => None,
        })
    }

    /// All raised flags, for the debug overlay.
    pub fn flags(&self) -> impl Iterator<Item = &str> + '_ {
        self.raised.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_signals() {
        let mut s = WorldSignals::default();
        s.set_string("dialogue", "hello");
        assert_eq!(s.get_string("dialogue"), Some("hello"));
        s.remove_string("dialogue");
        assert_eq!(s.get_string("dialogue"), None);
    }

    #[test]
    fn test_remove_leaves_other_types_alone() {
        let mut s = WorldSignals::default();
        s.set_integer("coins", 3);
        s.remove_string("coins"); // wrong type, no-op
        assert_eq!(s.get_integer("coins"), Some(3));
    }

    #[test]
    fn test_entity_handles() {
        let mut world = bevy_ecs::world::World::new();
        let player = world.spawn_empty().id();

        let mut s = WorldSignals::default();
        s.set_entity("player", player);
        assert_eq!(s.get_entity("player"), Some(player));
        s.remove_entity("player");
        assert_eq!(s.get_entity("player"), None);
    }
}
