//! Downward ground probe for platformer characters.

use bevy_ecs::prelude::Component;

const DEFAULT_RADIUS: f32 = 6.0;
const DEFAULT_DISTANCE: f32 = 10.0;

/// Casts a circle of `radius` downward over `distance` from the entity
/// position each physics tick and records whether it hit a solid collider.
///
/// With a `mask` set, only colliders on entities in that [`Group`] count as
/// ground. `grounded` holds the result of the latest cast.
///
/// [`Group`]: crate::components::group::Group
#[derive(Component, Clone, Debug)]
pub struct GroundSensor {
    pub radius: f32,
    pub distance: f32,
    pub mask: Option<String>,
    pub grounded: bool,
}

impl Default for GroundSensor {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS, DEFAULT_DISTANCE)
    }
}

impl GroundSensor {
    pub fn new(radius: f32, distance: f32) -> Self {
        Self {
            radius,
            distance,
            mask: None,
            grounded: false,
        }
    }

    /// Restrict the probe to colliders whose entity is in the named group.
    pub fn with_mask(mut self, mask: impl Into<String>) -> Self {
        self.mask = Some(mask.into());
        self
    }
}
