//! Solid contact tracking component.
//!
//! [`ContactState`] counts how many solid collisions an entity is currently
//! involved in. It is maintained by the contact observer in
//! [`crate::events::collision`], which increments the count on a collision
//! start and decrements it on the matching end. Enter and stay collapse into
//! "count is nonzero".
//!
//! The platformer motor reads this to decide whether it may write the
//! horizontal velocity while airborne.

use bevy_ecs::prelude::Component;

/// Number of active solid contacts for this entity.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct ContactState {
    contacts: u32,
}

impl ContactState {
    /// Whether the entity is touching at least one solid collider.
    pub fn touching(&self) -> bool {
        self.contacts > 0
    }

    /// Record a contact start.
    pub fn add(&mut self) {
        self.contacts += 1;
    }

    /// Record a contact end. Saturates at zero so a stray end event cannot
    /// underflow the count.
    pub fn remove(&mut self) {
        self.contacts = self.contacts.saturating_sub(1);
    }
}
