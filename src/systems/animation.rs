//! Clip selection and playback systems.
//!
//! [`animation_controller`] decides which clip an entity should play by
//! evaluating its controller rules against the entity's
//! [`Signals`](crate::components::signals::Signals), then [`animation`]
//! advances the chosen clip and writes the current frame's sheet offset into
//! the [`Sprite`](crate::components::sprite::Sprite). Clip definitions live
//! in the [`AnimationStore`](crate::resources::animationstore::AnimationStore);
//! entities only carry the key of the clip they play.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::animation::{Animation, AnimationController};
use crate::components::signals::Signals;
use crate::components::sprite::Sprite;
use crate::resources::animationstore::AnimationStore;
use crate::resources::worldtime::WorldTime;

/// Advance animation playback and update the sprite's source offset.
pub fn animation(
    mut query: Query<(&mut Animation, &mut Sprite)>,
    clips: Res<AnimationStore>,
    time: Res<WorldTime>,
) {
    for (mut anim, mut sprite) in query.iter_mut() {
        let Some(clip) = clips.get(&anim.key) else {
            continue;
        };
        if clip.frame_count == 0 || clip.fps <= 0.0 {
            continue;
        }

        anim.timer += time.delta;
        let frame_duration = 1.0 / clip.fps;
        while anim.timer >= frame_duration {
            anim.timer -= frame_duration;
            anim.frame += 1;
            if anim.frame >= clip.frame_count {
                if clip.looped {
                    anim.frame = 0;
                } else {
                    // hold the last frame
                    anim.frame = clip.frame_count - 1;
                    anim.timer = 0.0;
                    break;
                }
            }
        }

        sprite.offset = Vector2 {
            x: clip.first_frame.x + anim.frame as f32 * clip.stride,
            y: clip.first_frame.y,
        };
        if sprite.tex_key.as_str() != &*clip.tex_key {
            sprite.tex_key = clip.tex_key.to_string();
        }
    }
}

/// Switch each entity's clip according to its controller rules.
///
/// The first matching rule wins; no match selects the fallback. A switch
/// restarts playback from frame zero, re-selecting the current clip does
/// nothing.
pub fn animation_controller(mut query: Query<(&AnimationController, &mut Animation, &Signals)>) {
    for (controller, mut animation, signals) in query.iter_mut() {
        let mut target = controller.fallback_key.as_str();
        for rule in &controller.rules {
            if rule.condition.eval(signals) {
                target = rule.key.as_str();
                break;
            }
        }
        if animation.key != target {
            animation.restart(target);
        }
    }
}
