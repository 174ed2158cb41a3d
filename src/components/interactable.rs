//! NPC interaction components.
//!
//! An [`Interactable`] marks an entity the player can talk to. It sits on a
//! sensor collider; when the player walks into the volume, the proximity
//! observer stores the entity in the player's [`Interactor`], and leaving the
//! volume clears it again. Pressing the interact action while a target is set
//! publishes the NPC's line to the `dialogue` world signal and plays the
//! optional cue.

use bevy_ecs::prelude::{Component, Entity};

/// Something the player can interact with: a spoken line plus an optional
/// audio cue id played when the line is delivered.
#[derive(Component, Clone, Debug)]
pub struct Interactable {
    pub line: String,
    pub cue: Option<String>,
}

impl Interactable {
    pub fn new(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            cue: None,
        }
    }

    /// Builder-style: play this cue when the interaction fires.
    pub fn with_cue(mut self, cue: impl Into<String>) -> Self {
        self.cue = Some(cue.into());
        self
    }
}

/// The player's side of the interaction: which interactable, if any, is
/// currently in reach.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Interactor {
    pub target: Option<Entity>,
}
