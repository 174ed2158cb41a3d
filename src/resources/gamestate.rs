//! High level game state resources.
//!
//! [`GameState`] holds the authoritative current state; [`NextGameState`]
//! holds a requested transition. Systems never flip the state directly, they
//! request a transition and
//! [`gamestate_observer`](crate::events::gamestate::gamestate_observer)
//! applies it together with the enter and exit hooks.

use bevy_ecs::prelude::Resource;

/// Discrete high level states the game can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStates {
    /// Before the state machine has been kicked for the first time.
    #[default]
    Boot,
    Setup,
    Playing,
    Quitting,
}

/// Authoritative current game state. Starts in [`GameStates::Boot`].
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameState(GameStates);

impl GameState {
    pub fn get(&self) -> GameStates {
        self.0
    }

    /// Overwrite the current state without running any hooks. The transition
    /// observer calls this; everyone else goes through [`NextGameState`].
    pub fn apply(&mut self, state: GameStates) {
        self.0 = state;
    }
}

/// Intent to change to a new game state, if any.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NextGameState(Option<GameStates>);

impl NextGameState {
    /// Request a transition. A later request in the same frame wins.
    ///
    /// `apply_pending_state` picks the request up and emits the change event.
    pub fn request(&mut self, next: GameStates) {
        self.0 = Some(next);
    }

    pub fn is_pending(&self) -> bool {
        self.0.is_some()
    }

    /// Consume the pending request, leaving none behind.
    pub fn take(&mut self) -> Option<GameStates> {
        self.0.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_clears_the_request() {
        let mut next = NextGameState::default();
        assert!(!next.is_pending());

        next.request(GameStates::Playing);
        assert!(next.is_pending());
        assert_eq!(next.take(), Some(GameStates::Playing));
        assert!(!next.is_pending());
        assert_eq!(next.take(), None);
    }

    #[test]
    fn test_later_request_wins() {
        let mut next = NextGameState::default();
        next.request(GameStates::Playing);
        next.request(GameStates::Quitting);
        assert_eq!(next.take(), Some(GameStates::Quitting));
    }
}
