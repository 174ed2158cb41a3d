//! Input systems.
//!
//! [`update_input_state`] polls raylib once per bound key each frame, folds
//! the result into [`InputState`](crate::resources::input::InputState) and
//! triggers [`InputEvent`](crate::events::input::InputEvent)s on press and
//! release edges. The debug and fullscreen toggles fire their own events
//! instead.

use bevy_ecs::prelude::*;

use crate::events::input::{InputAction, InputEvent};
use crate::events::toggledebug::ToggleDebugEvent;
use crate::events::togglefullscreen::ToggleFullscreenEvent;
use crate::resources::input::{InputState, KeyState};

/// Poll the keyboard and refresh the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSendMut<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    let input = &mut *input;
    let bindings: [(&mut KeyState, Option<InputAction>); 9] = [
        (&mut input.move_left, Some(InputAction::MoveLeft)),
        (&mut input.move_right, Some(InputAction::MoveRight)),
        (&mut input.alt_left, Some(InputAction::MoveLeft)),
        (&mut input.alt_right, Some(InputAction::MoveRight)),
        (&mut input.jump, Some(InputAction::Jump)),
        (&mut input.interact, Some(InputAction::Interact)),
        (&mut input.back, Some(InputAction::Back)),
        // Toggles skip the generic event and fire their own below.
        (&mut input.toggle_debug, None),
        (&mut input.toggle_fullscreen, None),
    ];

    for (state, action) in bindings {
        state.update(rl.is_key_down(state.key));
        let Some(action) = action else {
            continue;
        };
        if state.pressed {
            commands.trigger(InputEvent {
                action,
                pressed: true,
            });
        }
        if state.released {
            commands.trigger(InputEvent {
                action,
                pressed: false,
            });
        }
    }

    if input.toggle_debug.pressed {
        commands.trigger(ToggleDebugEvent {});
    }
    if input.toggle_fullscreen.pressed {
        commands.trigger(ToggleFullscreenEvent {});
    }
}
