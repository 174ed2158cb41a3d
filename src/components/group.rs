//! Named group tag component.
//!
//! Entities tagged with a [`Group`] can be matched by name in collision
//! observers and sensor masks ("player", "ground", "coin", "npc", ...).
//! Group names come partly from level data, so they are owned strings.

use bevy_ecs::prelude::Component;

/// Name tag identifying which logical group an entity belongs to.
#[derive(Component, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Group(String);

impl Group {
    /// Create a group tag with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The group name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_name_roundtrip() {
        let g = Group::new("ground");
        assert_eq!(g.name(), "ground");
    }

    #[test]
    fn test_group_equality() {
        assert_eq!(Group::new("coin"), Group::new("coin"));
        assert_ne!(Group::new("coin"), Group::new("npc"));
    }
}
