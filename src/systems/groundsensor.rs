//! Ground probe system.
//!
//! Each tick, every [`GroundSensor`] casts a circle straight down from its
//! entity's position against the solid colliders in the world. The result
//! lands in three places: the sensor's `grounded` field, the entity's
//! "grounded" signal flag for the animation rules, and a "land" audio cue on
//! the airborne to grounded edge.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::boxcollider::BoxCollider;
use crate::components::group::Group;
use crate::components::groundsensor::GroundSensor;
use crate::components::mapposition::MapPosition;
use crate::components::signals::Signals;
use crate::events::audio::AudioCmd;

/// Distance at which a circle swept straight down from `origin` first
/// touches the box `[min, max]`, within `max_distance`.
///
/// The box is expanded by the circle radius, which treats corners as square
/// and errs on the generous side. Returns `None` on a miss.
fn sweep_circle_down(
    origin: Vector2,
    radius: f32,
    max_distance: f32,
    min: Vector2,
    max: Vector2,
) -> Option<f32> {
    if origin.x < min.x - radius || origin.x > max.x + radius {
        return None;
    }
    // already past the box
    if origin.y > max.y + radius {
        return None;
    }
    let t_enter = (min.y - radius - origin.y).max(0.0);
    if t_enter > max_distance {
        return None;
    }
    Some(t_enter)
}

/// Refresh every ground sensor against the current solid colliders.
pub fn ground_sensor(
    mut sensors: Query<(Entity, &MapPosition, &mut GroundSensor, &mut Signals)>,
    colliders: Query<(Entity, &MapPosition, &BoxCollider, Option<&Group>)>,
    mut audio_cmds: MessageWriter<AudioCmd>,
) {
    for (sensor_entity, sensor_pos, mut sensor, mut signals) in sensors.iter_mut() {
        let mut grounded = false;
        for (entity, position, collider, group) in colliders.iter() {
            if entity == sensor_entity {
                continue;
            }
            if !collider.solid {
                continue;
            }
            if let Some(mask) = &sensor.mask {
                if !group.is_some_and(|g| g.name() == mask) {
                    continue;
                }
            }
            let (min, max) = collider.aabb(&position.pos);
            if sweep_circle_down(sensor_pos.pos, sensor.radius, sensor.distance, min, max)
                .is_some()
            {
                grounded = true;
                break;
            }
        }

        // landing edge
        if grounded && !sensor.grounded {
            audio_cmds.write(AudioCmd::PlayFx {
                key: "land".to_string(),
            });
        }

        sensor.grounded = grounded;
        if grounded {
            signals.set_flag("grounded");
        } else {
            signals.clear_flag("grounded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_hits_box_below() {
        // box top at y=20, probe from y=0 with radius 2
        let hit = sweep_circle_down(
            Vector2::new(5.0, 0.0),
            2.0,
            30.0,
            Vector2::new(0.0, 20.0),
            Vector2::new(10.0, 30.0),
        );
        assert_eq!(hit, Some(18.0));
    }

    #[test]
    fn test_sweep_misses_beyond_distance() {
        let hit = sweep_circle_down(
            Vector2::new(5.0, 0.0),
            2.0,
            10.0,
            Vector2::new(0.0, 20.0),
            Vector2::new(10.0, 30.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_sweep_misses_to_the_side() {
        let hit = sweep_circle_down(
            Vector2::new(20.0, 0.0),
            2.0,
            100.0,
            Vector2::new(0.0, 20.0),
            Vector2::new(10.0, 30.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_sweep_radius_widens_reach() {
        // x=11 misses with a point but hits with radius 2
        let miss = sweep_circle_down(
            Vector2::new(11.0, 0.0),
            0.0,
            100.0,
            Vector2::new(0.0, 20.0),
            Vector2::new(10.0, 30.0),
        );
        assert!(miss.is_none());
        let hit = sweep_circle_down(
            Vector2::new(11.0, 0.0),
            2.0,
            100.0,
            Vector2::new(0.0, 20.0),
            Vector2::new(10.0, 30.0),
        );
        assert!(hit.is_some());
    }

    #[test]
    fn test_sweep_inside_box_reports_zero() {
        let hit = sweep_circle_down(
            Vector2::new(5.0, 25.0),
            2.0,
            10.0,
            Vector2::new(0.0, 20.0),
            Vector2::new(10.0, 30.0),
        );
        assert_eq!(hit, Some(0.0));
    }

    #[test]
    fn test_sweep_ignores_box_above() {
        let hit = sweep_circle_down(
            Vector2::new(5.0, 50.0),
            2.0,
            100.0,
            Vector2::new(0.0, 20.0),
            Vector2::new(10.0, 30.0),
        );
        assert!(hit.is_none());
    }
}
