//! Fixed resolution render target.
//!
//! All game content is drawn into a framebuffer texture at the internal
//! resolution, which the frame end blits onto the window with letterboxing.
//! Rendering stays resolution independent that way.

use log::debug;
use raylib::ffi::{self, TextureFilter};
use raylib::prelude::{RaylibHandle, RaylibThread, Rectangle, RenderTexture2D};

/// Filtering used when scaling the render target onto the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFilter {
    /// Nearest neighbor. Sharp pixels, right for pixel art.
    #[default]
    Nearest,
    /// Bilinear interpolation. Smooth scaling for high resolution art.
    Bilinear,
}

impl RenderFilter {
    /// Parse a config file value. Anything unrecognized falls back to
    /// nearest.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "bilinear" | "linear" => RenderFilter::Bilinear,
            _ => RenderFilter::Nearest,
        }
    }

    /// Config file spelling of this filter.
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderFilter::Nearest => "nearest",
            RenderFilter::Bilinear => "bilinear",
        }
    }

    fn to_raylib(self) -> i32 {
        match self {
            RenderFilter::Nearest => TextureFilter::TEXTURE_FILTER_POINT as i32,
            RenderFilter::Bilinear => TextureFilter::TEXTURE_FILTER_BILINEAR as i32,
        }
    }
}

/// Framebuffer texture at the internal game resolution.
///
/// NonSend resource: `RenderTexture2D` wraps GPU state that must stay on the
/// main thread.
pub struct RenderTarget {
    pub texture: RenderTexture2D,
    /// Internal render width in pixels.
    pub width: u32,
    /// Internal render height in pixels.
    pub height: u32,
    filter: RenderFilter,
}

impl RenderTarget {
    /// Create a render target at the given internal resolution.
    pub fn new(
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        width: u32,
        height: u32,
        filter: RenderFilter,
    ) -> Result<Self, String> {
        let texture = rl.load_render_texture(th, width, height).map_err(|e| {
            format!("could not create a {}x{} render texture: {}", width, height, e)
        })?;

        let mut target = RenderTarget {
            texture,
            width,
            height,
            filter,
        };
        target.apply_filter();

        Ok(target)
    }

    /// Replace the framebuffer with one at a new internal resolution. The
    /// current filter carries over; on failure the old texture stays usable.
    pub fn recreate(
        &mut self,
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        width: u32,
        height: u32,
    ) -> Result<(), String> {
        *self = Self::new(rl, th, width, height, self.filter)?;
        Ok(())
    }

    /// Change the scaling filter. No-op when unchanged, immediate otherwise.
    pub fn set_filter(&mut self, filter: RenderFilter) {
        if self.filter != filter {
            debug!("Render filter now {:?}", filter);
            self.filter = filter;
            self.apply_filter();
        }
    }

    fn apply_filter(&mut self) {
        unsafe {
            ffi::SetTextureFilter(self.texture.texture, self.filter.to_raylib());
        }
    }

    /// Source rectangle for blitting this texture.
    ///
    /// The height is negative to flip the Y axis, compensating for OpenGL's
    /// inverted texture coordinates.
    pub fn source_rect(&self) -> Rectangle {
        Rectangle {
            x: 0.0,
            y: 0.0,
            width: self.width as f32,
            height: -(self.height as f32),
        }
    }
}
