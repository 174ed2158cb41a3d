//! Animation clip registry.
//!
//! Stores immutable sprite sheet clip definitions shared by every entity that
//! plays them. The animation system looks clips up by string key to advance
//! frames; the render pass uses them to pick the source rectangle.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector2;
use rustc_hash::FxHashMap;

/// Central registry of reusable animation clips keyed by string IDs.
#[derive(Resource, Default)]
pub struct AnimationStore {
    clips: FxHashMap<String, AnimationClip>,
}

impl AnimationStore {
    pub fn add(&mut self, key: impl Into<String>, clip: AnimationClip) {
        self.clips.insert(key.into(), clip);
    }

    pub fn get(&self, key: &str) -> Option<&AnimationClip> {
        self.clips.get(key)
    }
}

/// Immutable data describing one sprite sheet clip.
///
/// Frames sit side by side in the sheet: frame `n` starts at
/// `first_frame.x + stride * n`. The frame size comes from the entity's
/// [`Sprite`](crate::components::sprite::Sprite).
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    /// Texture key in [`crate::resources::assets::TextureStore`].
    pub tex_key: Arc<str>,
    /// Top left pixel of frame 0 in the sheet.
    pub first_frame: Vector2,
    /// Horizontal advance per frame in pixels.
    pub stride: f32,
    /// Number of frames in the clip.
    pub frame_count: usize,
    /// Playback speed in frames per second.
    pub fps: f32,
    /// Whether the clip wraps to frame 0 after the last frame.
    pub looped: bool,
}
