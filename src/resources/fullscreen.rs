//! Window mode marker.
//!
//! Present while the window runs fullscreen. The fullscreen toggle observer
//! inserts and removes it; the config watcher reads it to spot mismatches.

use bevy_ecs::prelude::Resource;

/// Marker resource raised while the window is fullscreen.
#[derive(Resource, Clone, Copy)]
pub struct FullScreen;
