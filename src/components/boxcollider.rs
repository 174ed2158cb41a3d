//! Axis aligned box collider.

use bevy_ecs::prelude::Component;
use raylib::prelude::{Rectangle, Vector2};

/// Axis aligned box attached to an entity's map position.
///
/// Solid colliders block and get resolved against each other; non solid ones
/// act as sensor volumes that only report overlaps (coins, talk zones).
/// `offset` displaces the box from the entity position, which marks the box
/// center.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct BoxCollider {
    pub size: Vector2,
    pub offset: Vector2,
    pub solid: bool,
}

impl BoxCollider {
    /// Solid collider of the given size, centered on the entity position.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vector2::new(width, height),
            offset: Vector2::zero(),
            solid: true,
        }
    }

    /// Sensor volume of the given size. Overlaps are reported but never
    /// resolved.
    pub fn sensor(width: f32, height: f32) -> Self {
        Self {
            size: Vector2::new(width, height),
            offset: Vector2::zero(),
            solid: false,
        }
    }

    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }

    /// World space rectangle of this collider for an entity at `pos`.
    pub fn get_aabb(&self, pos: &Vector2) -> Rectangle {
        Rectangle {
            x: pos.x + self.offset.x - self.size.x / 2.0,
            y: pos.y + self.offset.y - self.size.y / 2.0,
            width: self.size.x,
            height: self.size.y,
        }
    }

    /// Min and max corners of the world space box for an entity at `pos`.
    pub fn aabb(&self, pos: &Vector2) -> (Vector2, Vector2) {
        let min = Vector2::new(
            pos.x + self.offset.x - self.size.x / 2.0,
            pos.y + self.offset.y - self.size.y / 2.0,
        );
        let max = Vector2::new(min.x + self.size.x, min.y + self.size.y);
        (min, max)
    }

    /// True if the two world space boxes overlap.
    pub fn overlaps(&self, pos: &Vector2, other: &BoxCollider, other_pos: &Vector2) -> bool {
        let (min_a, max_a) = self.aabb(pos);
        let (min_b, max_b) = other.aabb(other_pos);
        min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
    }

    /// True if `point` lies inside the world space box of an entity at `pos`.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn contains_point(&self, pos: &Vector2, point: &Vector2) -> bool {
        let (min, max) = self.aabb(pos);
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_is_centered_on_position() {
        let collider = BoxCollider::new(10.0, 20.0);
        let pos = Vector2::new(100.0, 50.0);
        let (min, max) = collider.aabb(&pos);
        assert_eq!(min.x, 95.0);
        assert_eq!(min.y, 40.0);
        assert_eq!(max.x, 105.0);
        assert_eq!(max.y, 60.0);
    }

    #[test]
    fn test_offset_shifts_aabb() {
        let collider = BoxCollider::new(10.0, 10.0).with_offset(Vector2::new(0.0, 5.0));
        let pos = Vector2::new(0.0, 0.0);
        let (min, max) = collider.aabb(&pos);
        assert_eq!(min.y, 0.0);
        assert_eq!(max.y, 10.0);
        assert_eq!(min.x, -5.0);
        assert_eq!(max.x, 5.0);
    }

    #[test]
    fn test_get_aabb_matches_corner_form() {
        let collider = BoxCollider::new(8.0, 6.0).with_offset(Vector2::new(1.0, 2.0));
        let pos = Vector2::new(10.0, 10.0);
        let rect = collider.get_aabb(&pos);
        let (min, _) = collider.aabb(&pos);
        assert_eq!(rect.x, min.x);
        assert_eq!(rect.y, min.y);
        assert_eq!(rect.width, 8.0);
        assert_eq!(rect.height, 6.0);
    }

    #[test]
    fn test_overlap_detection() {
        let a = BoxCollider::new(10.0, 10.0);
        let b = BoxCollider::new(10.0, 10.0);
        let pos_a = Vector2::new(0.0, 0.0);

        assert!(a.overlaps(&pos_a, &b, &Vector2::new(5.0, 5.0)));
        assert!(a.overlaps(&pos_a, &b, &Vector2::new(9.0, 0.0)));
        assert!(!a.overlaps(&pos_a, &b, &Vector2::new(20.0, 0.0)));
        // touching edges do not count as overlap
        assert!(!a.overlaps(&pos_a, &b, &Vector2::new(10.0, 0.0)));
    }

    #[test]
    fn test_sensor_flag() {
        assert!(BoxCollider::new(4.0, 4.0).solid);
        assert!(!BoxCollider::sensor(4.0, 4.0).solid);
    }

    #[test]
    fn test_contains_point() {
        let collider = BoxCollider::new(10.0, 10.0);
        let pos = Vector2::new(0.0, 0.0);
        assert!(collider.contains_point(&pos, &Vector2::new(0.0, 0.0)));
        assert!(collider.contains_point(&pos, &Vector2::new(5.0, 5.0)));
        assert!(!collider.contains_point(&pos, &Vector2::new(5.1, 0.0)));
    }
}
