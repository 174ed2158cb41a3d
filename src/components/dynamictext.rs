//! Text drawn in screen space with a font from the [`FontStore`].
//!
//! [`FontStore`]: crate::resources::assets::FontStore

use std::sync::Arc;

use bevy_ecs::prelude::Component;
use raylib::prelude::Color;

/// Screen space text entity. The content is an `Arc<str>` so signal bindings
/// can swap it without reallocating when the value is unchanged.
#[derive(Component, Clone, Debug)]
pub struct DynamicText {
    pub text: Arc<str>,
    /// Key into the font store.
    pub font_key: String,
    pub font_size: f32,
    pub spacing: f32,
    pub color: Color,
}

impl DynamicText {
    pub fn new(text: impl Into<Arc<str>>, font_key: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font_key: font_key.into(),
            font_size,
            spacing: 1.0,
            color: Color::WHITE,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}
