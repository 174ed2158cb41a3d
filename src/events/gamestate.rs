//! Game state transition event and observer.
//!
//! Systems request a state change through [`NextGameState`]; the polling
//! system emits a [`GameStateChangedEvent`] and the observer here applies the
//! transition. Each state maps to an optional enter hook and an optional exit
//! hook, resolved by name through
//! [`StateHooks`](crate::resources::statehooks::StateHooks), so adding a
//! state means adding a row to the two match tables below.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::statehooks::StateHooks;

/// Signals that a pending game state transition should be applied now.
///
/// Triggering it runs [`gamestate_observer`], which consumes the
/// pending value of [`NextGameState`]. Without a pending value the trigger is
/// a no-op.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Hook run when `state` becomes current, if any.
fn enter_hook(state: GameStates) -> Option<&'static str> {
    match state {
        GameStates::Boot => None,
        GameStates::Setup => Some("setup"),
        GameStates::Playing => Some("enter_play"),
        GameStates::Quitting => Some("quit_game"),
    }
}

/// Hook run when `state` stops being current, if any.
fn exit_hook(state: GameStates) -> Option<&'static str> {
    match state {
        // Level entities go away; persistent infrastructure stays.
        GameStates::Playing => Some("clean_all_entities"),
        _ => None,
    }
}

/// Observer that applies a pending game state transition.
///
/// Consumes the request from [`NextGameState`], writes the new value into
/// [`GameState`], then runs the old state's exit hook followed by the new
/// state's enter hook. An unbound hook is a wiring error and panics.
pub fn gamestate_observer(
    _trigger: On<GameStateChangedEvent>,
    mut commands: Commands,
    mut next_game_state: Option<ResMut<NextGameState>>,
    mut game_state: Option<ResMut<GameState>>,
    hooks: Res<StateHooks>,
) {
    let (Some(next_game_state), Some(game_state)) =
        (next_game_state.as_deref_mut(), game_state.as_deref_mut())
    else {
        warn!("Game state resources missing, dropping the transition");
        return;
    };

    let Some(new_state) = next_game_state.take() else {
        debug!("No state change pending.");
        return;
    };

    let old_state = game_state.get();
    info!("Transitioning from {:?} to {:?}", old_state, new_state);
    game_state.apply(new_state);

    // Exit the old state before entering the new one.
    let keys = [exit_hook(old_state), enter_hook(new_state)];
    for key in keys.into_iter().flatten() {
        let id = hooks
            .get(key)
            .unwrap_or_else(|| panic!("state hook '{}' is not bound", key));
        commands.run_system(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Resource, Default)]
    struct CallLog(Vec<&'static str>);

    fn hooked_world() -> World {
        let mut world = World::new();
        world.init_resource::<CallLog>();
        world.init_resource::<GameState>();
        world.init_resource::<NextGameState>();

        let mut hooks = StateHooks::new();
        for name in ["setup", "enter_play", "quit_game", "clean_all_entities"] {
            let id = world.register_system(move |mut log: ResMut<CallLog>| {
                log.0.push(name);
            });
            hooks.bind(name, id);
        }
        world.insert_resource(hooks);

        world.add_observer(gamestate_observer);
        world.flush();
        world
    }

    #[test]
    fn test_transition_runs_enter_hook() {
        let mut world = hooked_world();

        world.resource_mut::<NextGameState>().request(GameStates::Setup);
        world.trigger(GameStateChangedEvent {});
        world.flush();

        assert_eq!(world.resource::<GameState>().get(), GameStates::Setup);
        assert_eq!(world.resource::<CallLog>().0, vec!["setup"]);
        assert!(!world.resource::<NextGameState>().is_pending());
    }

    #[test]
    fn test_leaving_playing_runs_exit_before_enter() {
        let mut world = hooked_world();
        world.resource_mut::<GameState>().apply(GameStates::Playing);

        world
            .resource_mut::<NextGameState>()
            .request(GameStates::Quitting);
        world.trigger(GameStateChangedEvent {});
        world.flush();

        assert_eq!(
            world.resource::<CallLog>().0,
            vec!["clean_all_entities", "quit_game"]
        );
    }

    #[test]
    fn test_trigger_without_pending_state_is_a_noop() {
        let mut world = hooked_world();

        world.trigger(GameStateChangedEvent {});
        world.flush();

        assert_eq!(world.resource::<GameState>().get(), GameStates::Boot);
        assert!(world.resource::<CallLog>().0.is_empty());
    }
}
