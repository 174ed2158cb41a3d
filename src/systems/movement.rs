//! Physics integration step.
//!
//! Applies the enabled forces of every [`RigidBody`] to its velocity, damps
//! it, clamps the fall speed and advances the owning [`MapPosition`]. Runs
//! once per tick before collision detection so the detector sees settled
//! positions.

use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::worldtime::WorldTime;

pub fn movement(mut query: Query<(&mut MapPosition, &mut RigidBody)>, time: Res<WorldTime>) {
    for (mut position, mut body) in query.iter_mut() {
        if body.frozen {
            continue;
        }

        let acceleration = body.total_acceleration();
        body.velocity = body.velocity + acceleration.scale_by(time.delta);

        if body.friction > 0.0 {
            // linear damping, clamped so oversized steps cannot reverse the velocity
            let factor = (1.0 - body.friction * time.delta).max(0.0);
            body.velocity = body.velocity.scale_by(factor);
        }

        if let Some(cap) = body.max_fall_speed {
            if body.velocity.y > cap {
                body.velocity.y = cap;
            }
        }

        let delta = body.velocity.scale_by(time.delta);
        position.pos = position.pos + delta;
    }
}
