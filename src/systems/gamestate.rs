//! Game state polling helpers.
//!
//! [`apply_pending_state`] turns a pending [`NextGameState`] request into a
//! [`GameStateChangedEvent`] once per frame; [`is_playing`] is the run
//! condition gating gameplay systems.

use bevy_ecs::prelude::*;

use crate::events::gamestate::GameStateChangedEvent;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};

/// Emit a state change event when a transition has been requested.
pub fn apply_pending_state(mut commands: Commands, next_state: Res<NextGameState>) {
    if next_state.is_pending() {
        commands.trigger(GameStateChangedEvent {});
    }
}

/// Run condition: true while the game is in the Playing state.
pub fn is_playing(state: Res<GameState>) -> bool {
    state.get() == GameStates::Playing
}
