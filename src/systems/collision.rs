//! Collision detection, contact events and overlap resolution.
//!
//! [`collision_detector`] runs after the physics step. It finds every
//! overlapping collider pair, compares against the previous tick's
//! [`ActiveContacts`] to trigger start/end
//! [`CollisionEvent`](crate::events::collision::CollisionEvent)s and
//! enter/exit [`SensorEvent`](crate::events::collision::SensorEvent)s, then
//! pushes solid pairs apart along the axis of least penetration.
//!
//! The gameplay observers reacting to sensor events live here too: coin
//! pickup and NPC proximity tracking.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;
use smallvec::SmallVec;

use crate::components::boxcollider::BoxCollider;
use crate::components::coin::Coin;
use crate::components::group::Group;
use crate::components::interactable::{Interactable, Interactor};
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::events::audio::AudioCmd;
use crate::events::collision::{CollisionEvent, SensorEvent};
use crate::resources::contacts::{ActiveContacts, pair_key};
use crate::resources::worldsignals::WorldSignals;

/// Upper bound on separation passes per tick. Stacked overlaps settle over a
/// few passes; anything left resolves next tick.
const MAX_RESOLVE_PASSES: usize = 4;

type PairBuf = SmallVec<[(Entity, Entity); 8]>;

/// Detect overlaps, emit contact transitions and separate solid pairs.
pub fn collision_detector(
    mut query: Query<(
        Entity,
        &mut MapPosition,
        &BoxCollider,
        Option<&mut RigidBody>,
    )>,
    mut contacts: ResMut<ActiveContacts>,
    mut commands: Commands,
) {
    // Phase 1: read-only detection of this tick's overlap sets.
    let mut solid_now = rustc_hash::FxHashSet::default();
    let mut sensor_now = rustc_hash::FxHashSet::default();

    for [(entity_a, position_a, collider_a, _), (entity_b, position_b, collider_b, _)] in
        query.iter_combinations()
    {
        if !collider_a.overlaps(&position_a.pos, collider_b, &position_b.pos) {
            continue;
        }
        match (collider_a.solid, collider_b.solid) {
            (true, true) => {
                solid_now.insert(pair_key(entity_a, entity_b));
            }
            (false, true) => {
                sensor_now.insert((entity_a, entity_b));
            }
            (true, false) => {
                sensor_now.insert((entity_b, entity_a));
            }
            // two sensors never interact
            (false, false) => {}
        }
    }

    // Diff against the previous tick. Ends fire before starts so an entity
    // moving between volumes exits the old one first.
    let ended: PairBuf = contacts
        .solid
        .iter()
        .filter(|pair| !solid_now.contains(*pair))
        .copied()
        .collect();
    let started: PairBuf = solid_now
        .iter()
        .filter(|pair| !contacts.solid.contains(*pair))
        .copied()
        .collect();
    let exited: PairBuf = contacts
        .sensor
        .iter()
        .filter(|pair| !sensor_now.contains(*pair))
        .copied()
        .collect();
    let entered: PairBuf = sensor_now
        .iter()
        .filter(|pair| !contacts.sensor.contains(*pair))
        .copied()
        .collect();

    for (a, b) in ended {
        commands.trigger(CollisionEvent {
            a,
            b,
            started: false,
        });
    }
    for (a, b) in started {
        commands.trigger(CollisionEvent {
            a,
            b,
            started: true,
        });
    }
    for (sensor, visitor) in exited {
        commands.trigger(SensorEvent {
            sensor,
            visitor,
            entered: false,
        });
    }
    for (sensor, visitor) in entered {
        commands.trigger(SensorEvent {
            sensor,
            visitor,
            entered: true,
        });
    }

    contacts.solid = solid_now;
    contacts.sensor = sensor_now;

    // Phase 2: push solid pairs apart. Static geometry never moves; a pair
    // of dynamic bodies splits the correction.
    for _ in 0..MAX_RESOLVE_PASSES {
        let mut any_resolved = false;

        let mut combos = query.iter_combinations_mut();
        while let Some(
            [
                (_, mut position_a, collider_a, mut body_a),
                (_, mut position_b, collider_b, mut body_b),
            ],
        ) = combos.fetch_next()
        {
            if !collider_a.solid || !collider_b.solid {
                continue;
            }
            let a_dynamic = body_a.as_ref().is_some_and(|b| !b.frozen);
            let b_dynamic = body_b.as_ref().is_some_and(|b| !b.frozen);
            if !a_dynamic && !b_dynamic {
                continue;
            }

            let (min_a, max_a) = collider_a.aabb(&position_a.pos);
            let (min_b, max_b) = collider_b.aabb(&position_b.pos);
            let pen_x = max_a.x.min(max_b.x) - min_a.x.max(min_b.x);
            let pen_y = max_a.y.min(max_b.y) - min_a.y.max(min_b.y);
            if pen_x <= 0.0 || pen_y <= 0.0 {
                continue;
            }
            any_resolved = true;

            let center_a_x = (min_a.x + max_a.x) / 2.0;
            let center_a_y = (min_a.y + max_a.y) / 2.0;
            let center_b_x = (min_b.x + max_b.x) / 2.0;
            let center_b_y = (min_b.y + max_b.y) / 2.0;

            let (push_a, push_b) = if a_dynamic && b_dynamic {
                (0.5, 0.5)
            } else if a_dynamic {
                (1.0, 0.0)
            } else {
                (0.0, 1.0)
            };

            if pen_x < pen_y {
                // Separate horizontally, kill velocity pointing into the contact.
                if center_a_x < center_b_x {
                    position_a.pos.x -= pen_x * push_a;
                    position_b.pos.x += pen_x * push_b;
                    if let Some(body) = body_a.as_mut() {
                        if body.velocity.x > 0.0 {
                            body.velocity.x = 0.0;
                        }
                    }
                    if let Some(body) = body_b.as_mut() {
                        if body.velocity.x < 0.0 {
                            body.velocity.x = 0.0;
                        }
                    }
                } else {
                    position_a.pos.x += pen_x * push_a;
                    position_b.pos.x -= pen_x * push_b;
                    if let Some(body) = body_a.as_mut() {
                        if body.velocity.x < 0.0 {
                            body.velocity.x = 0.0;
                        }
                    }
                    if let Some(body) = body_b.as_mut() {
                        if body.velocity.x > 0.0 {
                            body.velocity.x = 0.0;
                        }
                    }
                }
            } else {
                // Separate vertically.
                if center_a_y < center_b_y {
                    position_a.pos.y -= pen_y * push_a;
                    position_b.pos.y += pen_y * push_b;
                    if let Some(body) = body_a.as_mut() {
                        if body.velocity.y > 0.0 {
                            body.velocity.y = 0.0;
                        }
                    }
                    if let Some(body) = body_b.as_mut() {
                        if body.velocity.y < 0.0 {
                            body.velocity.y = 0.0;
                        }
                    }
                } else {
                    position_a.pos.y += pen_y * push_a;
                    position_b.pos.y -= pen_y * push_b;
                    if let Some(body) = body_a.as_mut() {
                        if body.velocity.y < 0.0 {
                            body.velocity.y = 0.0;
                        }
                    }
                    if let Some(body) = body_b.as_mut() {
                        if body.velocity.y > 0.0 {
                            body.velocity.y = 0.0;
                        }
                    }
                }
            }
        }

        if !any_resolved {
            break;
        }
    }
}

/// Observer that collects a coin when the player enters its sensor.
///
/// Despawns the coin, adds its value to the "coins" world signal and plays
/// the pickup cue with a slight random pitch so repeated pickups do not sound
/// mechanical.
pub fn coin_pickup_observer(
    trigger: On<SensorEvent>,
    coins: Query<&Coin>,
    groups: Query<&Group>,
    mut signals: ResMut<WorldSignals>,
    mut audio_cmds: MessageWriter<AudioCmd>,
    mut commands: Commands,
) {
    let event = trigger.event();
    if !event.entered {
        return;
    }
    let Ok(coin) = coins.get(event.sensor) else {
        return;
    };
    let is_player = groups
        .get(event.visitor)
        .map(|g| g.name() == "player")
        .unwrap_or(false);
    if !is_player {
        return;
    }

    let total = signals.get_integer("coins").unwrap_or(0) + coin.value;
    signals.set_integer("coins", total);
    info!("Coin collected, total is now {}", total);

    let pitch = 0.9 + fastrand::f32() * 0.2;
    audio_cmds.write(AudioCmd::PitchFx {
        key: "coin".to_string(),
        pitch,
    });
    audio_cmds.write(AudioCmd::PlayFx {
        key: "coin".to_string(),
    });

    commands.entity(event.sensor).despawn();
}

/// Observer that tracks which NPC the player can talk to.
///
/// Entering an NPC's sensor volume makes it the interact target; leaving
/// clears the target again, but only if that NPC still holds it, so walking
/// through overlapping volumes keeps the newest one. The dialogue line is
/// dropped together with the target.
pub fn npc_proximity_observer(
    trigger: On<SensorEvent>,
    interactables: Query<&Interactable>,
    mut interactors: Query<&mut Interactor>,
    mut signals: ResMut<WorldSignals>,
) {
    let event = trigger.event();
    if interactables.get(event.sensor).is_err() {
        return;
    }
    let Ok(mut interactor) = interactors.get_mut(event.visitor) else {
        return;
    };

    if event.entered {
        interactor.target = Some(event.sensor);
        info!("NPC {:?} in reach", event.sensor);
    } else if interactor.target == Some(event.sensor) {
        interactor.target = None;
        // a removed signal leaves bound text untouched, an empty one clears it
        signals.set_string("dialogue", String::new());
        info!("NPC {:?} out of reach", event.sensor);
    }
}
