//! Platformer motor system and the jump observer.
//!
//! [`platformer_motor`] turns the horizontal input axis into accumulated
//! motor speed, faces the sprite toward the last nonzero input and writes the
//! speed into the rigid body. [`jump_observer`] reacts to the jump action
//! with a vertical impulse while grounded.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::components::contactstate::ContactState;
use crate::components::groundsensor::GroundSensor;
use crate::components::motor::PlatformerMotor;
use crate::components::rigidbody::RigidBody;
use crate::components::signals::Signals;
use crate::components::sprite::Sprite;
use crate::events::audio::AudioCmd;
use crate::events::input::{InputAction, InputEvent};
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;

/// Drive every motor from the input axis.
///
/// The accumulated motor speed only reaches the rigid body while the entity
/// is grounded or free of solid contacts; pressed against a wall in the air
/// it keeps accumulating without pushing into the obstacle. The "speed" and
/// "vspeed" signals feed the animation rules.
pub fn platformer_motor(
    mut query: Query<(
        &mut PlatformerMotor,
        &mut RigidBody,
        &mut Sprite,
        &mut Signals,
        &GroundSensor,
        Option<&ContactState>,
    )>,
    input: Res<InputState>,
    time: Res<WorldTime>,
) {
    for (mut motor, mut body, mut sprite, mut signals, sensor, contact) in query.iter_mut() {
        motor.move_input = input.horizontal_axis();
        motor.integrate_speed(time.delta);

        // face the last nonzero input
        if motor.move_input > 0.0 {
            sprite.flip_h = false;
        } else if motor.move_input < 0.0 {
            sprite.flip_h = true;
        }

        let touching = contact.is_some_and(|c| c.touching());
        if sensor.grounded || !touching {
            body.velocity.x = motor.current_speed;
        }

        // released input zeroes this immediately even while speed brakes off
        signals.set_scalar("speed", (motor.current_speed * motor.move_input).abs());
        signals.set_scalar("vspeed", body.velocity.y);
    }
}

/// Observer that performs a jump on the jump action's press edge.
///
/// Only grounded entities jump; the impulse adds to the current vertical
/// velocity rather than replacing it.
pub fn jump_observer(
    trigger: On<InputEvent>,
    mut players: Query<(&PlatformerMotor, &GroundSensor, &mut RigidBody)>,
    mut audio_cmds: MessageWriter<AudioCmd>,
) {
    let event = trigger.event();
    if event.action != InputAction::Jump || !event.pressed {
        return;
    }

    for (motor, sensor, mut body) in players.iter_mut() {
        if !sensor.grounded {
            continue;
        }
        body.velocity.y -= motor.jump_impulse;
        audio_cmds.write(AudioCmd::PlayFx {
            key: "jump".to_string(),
        });
    }
}
