//! Named one-shot systems for state transitions.
//!
//! The game registers its lifecycle systems (setup, level spawn, teardown)
//! as one-shot systems and binds their [`SystemId`]s here under string keys.
//! The state observer resolves hooks through this resource, so the transition
//! machinery never has to name a concrete system.

use bevy_ecs::prelude::Resource;
use bevy_ecs::system::SystemId;
use rustc_hash::FxHashMap;

/// Registry of one-shot systems addressable by hook name.
#[derive(Resource, Default)]
pub struct StateHooks {
    hooks: FxHashMap<&'static str, SystemId>,
}

impl StateHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a registered system to a hook name, replacing any previous
    /// binding.
    pub fn bind(&mut self, name: &'static str, id: SystemId) {
        self.hooks.insert(name, id);
    }

    /// Resolve a hook name to its system, if bound.
    pub fn get(&self, name: &str) -> Option<SystemId> {
        self.hooks.get(name).copied()
    }
}
