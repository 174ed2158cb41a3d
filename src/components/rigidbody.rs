//! Rigid body component for entities moved by the physics step.
//!
//! A body carries a velocity plus a set of named acceleration forces that can
//! be toggled or retuned at runtime (gravity, wind, knockback). The movement
//! system sums the enabled forces each tick, applies friction and integrates
//! the position.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;
use rustc_hash::FxHashMap;

/// A named contribution to a body's acceleration, in px/s^2.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AccelerationForce {
    pub value: Vector2,
    pub enabled: bool,
}

/// Velocity and force state integrated by the movement system.
#[derive(Component, Clone, Debug, Default)]
pub struct RigidBody {
    /// Current velocity in px/s. Positive y is downward.
    pub velocity: Vector2,
    /// Named acceleration forces summed while enabled.
    forces: FxHashMap<String, AccelerationForce>,
    /// Velocity damping factor per second. Zero means no damping.
    pub friction: f32,
    /// Downward speed cap in px/s, if any.
    pub max_fall_speed: Option<f32>,
    /// Frozen bodies are skipped by the physics step entirely.
    pub frozen: bool,
}

impl RigidBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_max_fall_speed(mut self, max_fall_speed: f32) -> Self {
        self.max_fall_speed = Some(max_fall_speed);
        self
    }

    /// Add or replace a force, enabled.
    pub fn add_force(&mut self, key: impl Into<String>, value: Vector2) {
        let force = AccelerationForce {
            value,
            enabled: true,
        };
        self.forces.insert(key.into(), force);
    }

    /// Builder form of [`add_force`](Self::add_force).
    pub fn with_force(mut self, key: impl Into<String>, value: Vector2) -> Self {
        self.add_force(key, value);
        self
    }

    /// Drop a force entirely, returning whatever was stored under the key.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn remove_force(&mut self, key: &str) -> Option<AccelerationForce> {
        self.forces.remove(key)
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn force(&self, key: &str) -> Option<&AccelerationForce> {
        self.forces.get(key)
    }

    /// Mutable access to a force, for toggling or retuning it in place.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn force_mut(&mut self, key: &str) -> Option<&mut AccelerationForce> {
        self.forces.get_mut(key)
    }

    /// Sum of all enabled forces.
    pub fn total_acceleration(&self) -> Vector2 {
        self.forces
            .values()
            .filter(|f| f.enabled)
            .fold(Vector2::zero(), |acc, f| acc + f.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forces_start_enabled() {
        let mut body = RigidBody::new();
        body.add_force("gravity", Vector2::new(0.0, 900.0));
        let force = body.force("gravity").unwrap();
        assert!(force.enabled);
        assert_eq!(force.value.y, 900.0);
    }

    #[test]
    fn test_adding_under_same_key_replaces() {
        let mut body = RigidBody::new();
        body.add_force("knockback", Vector2::new(-300.0, 0.0));
        body.add_force("knockback", Vector2::new(150.0, 0.0));
        assert_eq!(body.force("knockback").unwrap().value.x, 150.0);
    }

    #[test]
    fn test_disabled_force_keeps_its_value() {
        let mut body = RigidBody::new();
        body.add_force("wind", Vector2::new(5.0, 0.0));
        body.force_mut("wind").unwrap().enabled = false;
        let force = body.force("wind").unwrap();
        assert!(!force.enabled);
        assert_eq!(force.value.x, 5.0);
    }

    #[test]
    fn test_missing_key_lookups_return_none() {
        let mut body = RigidBody::new();
        assert!(body.force("nope").is_none());
        assert!(body.force_mut("nope").is_none());
        assert!(body.remove_force("nope").is_none());
    }

    #[test]
    fn test_removal_hands_back_the_stored_force() {
        let mut body = RigidBody::new();
        body.add_force("gravity", Vector2::new(0.0, 900.0));
        let removed = body.remove_force("gravity").unwrap();
        assert_eq!(removed.value.y, 900.0);
        assert!(body.force("gravity").is_none());
    }

    #[test]
    fn test_total_acceleration_counts_only_enabled_forces() {
        let mut body = RigidBody::new();
        body.add_force("gravity", Vector2::new(0.0, 900.0));
        body.add_force("wind", Vector2::new(-20.0, 0.0));
        body.force_mut("wind").unwrap().enabled = false;
        let total = body.total_acceleration();
        assert_eq!(total.x, 0.0);
        assert_eq!(total.y, 900.0);

        body.force_mut("wind").unwrap().enabled = true;
        assert_eq!(body.total_acceleration().x, -20.0);
    }

    #[test]
    fn test_total_acceleration_of_empty_body_is_zero() {
        assert_eq!(RigidBody::new().total_acceleration(), Vector2::zero());
    }

    #[test]
    fn test_builder_chain() {
        let body = RigidBody::new()
            .with_friction(0.5)
            .with_max_fall_speed(400.0)
            .with_force("gravity", Vector2::new(0.0, 900.0));
        assert_eq!(body.friction, 0.5);
        assert_eq!(body.max_fall_speed, Some(400.0));
        assert!(body.force("gravity").is_some());
        assert!(!body.frozen);
    }
}
