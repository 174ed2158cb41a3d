//! Input action events and the observers hanging off them.
//!
//! [`InputEvent`] is triggered on the press and release edges of the logical
//! actions in [`InputAction`]. Gameplay reacts through observers instead of
//! polling [`InputState`](crate::resources::input::InputState), so bindings
//! stay in one place.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::interactable::{Interactable, Interactor};
use crate::events::audio::AudioCmd;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::worldsignals::WorldSignals;

/// Logical input actions, abstracted from physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Walk left (default: A or Left arrow).
    MoveLeft,
    /// Walk right (default: D or Right arrow).
    MoveRight,
    /// Jump (default: Space).
    Jump,
    /// Talk to whatever is in reach (default: E).
    Interact,
    /// Back/quit (default: Escape).
    Back,
}

/// Event emitted on the press or release edge of an input action.
#[derive(Event, Debug, Clone, Copy)]
pub struct InputEvent {
    /// The input action that triggered this event.
    pub action: InputAction,
    /// Whether the action was pressed (true) or released (false).
    pub pressed: bool,
}

/// Observer that handles the interact action.
///
/// When the player presses interact while an NPC is in reach (tracked by the
/// [`Interactor`] component), the NPC's dialogue line is published as the
/// "dialogue" world string and its cue, if any, is played.
pub fn interact_observer(
    trigger: On<InputEvent>,
    interactors: Query<&Interactor>,
    interactables: Query<&Interactable>,
    mut signals: ResMut<WorldSignals>,
    mut audio_cmds: MessageWriter<AudioCmd>,
) {
    let event = trigger.event();
    if event.action != InputAction::Interact || !event.pressed {
        return;
    }

    for interactor in interactors.iter() {
        let Some(target) = interactor.target else {
            continue;
        };
        let Ok(interactable) = interactables.get(target) else {
            debug!("Interact target {:?} has no Interactable", target);
            continue;
        };
        info!("Interacting with {:?}: {}", target, interactable.line);
        signals.set_string("dialogue", interactable.line.clone());
        if let Some(cue) = &interactable.cue {
            audio_cmds.write(AudioCmd::PlayFx { key: cue.clone() });
        }
    }
}

/// Observer that requests a quit transition on the back action.
pub fn quit_on_back_observer(trigger: On<InputEvent>, mut next_state: ResMut<NextGameState>) {
    let event = trigger.event();
    if event.action == InputAction::Back && event.pressed {
        info!("Back action pressed, requesting quit");
        next_state.request(GameStates::Quitting);
    }
}
