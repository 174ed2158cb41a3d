use bevy_ecs::prelude::Component;
use raylib::prelude::{Rectangle, Vector2};

/// Sprite is identified by a texture key, its frame size in pixels and an
/// offset into the texture when it is a spritesheet. The offset selects the
/// current frame and is normally written by the animation system.
/// The origin is the pivot point (in pixels) relative to the frame's top-left,
/// used for placement when rendering; `flip_h` mirrors the frame horizontally
/// so the character faces its movement direction.
#[derive(Component, Clone, Debug)]
pub struct Sprite {
    pub tex_key: String,
    pub width: f32,
    pub height: f32,
    pub offset: Vector2,
    pub origin: Vector2,
    pub flip_h: bool,
    pub flip_v: bool,
}

impl Sprite {
    /// Create a sprite showing the full texture area `width` x `height`
    /// starting at the texture's top-left, with the pivot at the top-left.
    pub fn new(tex_key: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            tex_key: tex_key.into(),
            width,
            height,
            offset: Vector2::zero(),
            origin: Vector2::zero(),
            flip_h: false,
            flip_v: false,
        }
    }

    /// Builder-style: set the pivot point in frame pixels.
    pub fn with_origin(mut self, origin: Vector2) -> Self {
        self.origin = origin;
        self
    }

    /// Builder-style: select a frame by its top left pixel in the sheet.
    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }

    /// Frame rectangle in the sheet. Flips mirror through negative extents,
    /// which raylib draws mirrored without moving the pivot.
    pub fn source_rect(&self) -> Rectangle {
        Rectangle {
            x: self.offset.x,
            y: self.offset.y,
            width: if self.flip_h { -self.width } else { self.width },
            height: if self.flip_v { -self.height } else { self.height },
        }
    }

    /// World space rectangle covered by the frame for an entity at `pos`.
    pub fn world_rect(&self, pos: Vector2) -> Rectangle {
        Rectangle {
            x: pos.x - self.origin.x,
            y: pos.y - self.origin.y,
            width: self.width,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_rect_follows_the_sheet_offset() {
        let mut sprite = Sprite::new("sheet", 32.0, 32.0).with_offset(Vector2::new(64.0, 32.0));
        let src = sprite.source_rect();
        assert_eq!(src.x, 64.0);
        assert_eq!(src.y, 32.0);
        assert_eq!(src.width, 32.0);

        sprite.flip_h = true;
        assert_eq!(sprite.source_rect().width, -32.0);
        assert_eq!(sprite.source_rect().height, 32.0);
    }

    #[test]
    fn test_world_rect_is_anchored_at_the_pivot() {
        let sprite = Sprite::new("sheet", 32.0, 32.0).with_origin(Vector2::new(16.0, 32.0));
        let rect = sprite.world_rect(Vector2::new(100.0, 200.0));
        assert_eq!(rect.x, 84.0);
        assert_eq!(rect.y, 168.0);
        assert_eq!(rect.width, 32.0);
        assert_eq!(rect.height, 32.0);
    }
}
