//! Keyed stores for GPU-backed assets.
//!
//! Textures and fonts are loaded once during setup and referenced by string
//! key from components, so entities never own GPU handles themselves. Both
//! stores are the same shape, so they share one generic map type.
//!
//! Note: raylib textures and fonts must stay on the main thread, so these are
//! non-send resources. Insert with `insert_non_send_resource` and access via
//! `NonSend`/`NonSendMut`.

use raylib::prelude::{Font, Texture2D};
use rustc_hash::FxHashMap;

/// Loaded textures, keyed by the names sprites and animation clips use.
pub type TextureStore = AssetStore<Texture2D>;

/// Loaded fonts, keyed by the names
/// [`DynamicText`](crate::components::dynamictext::DynamicText) uses.
pub type FontStore = AssetStore<Font>;

/// String-keyed map of loaded assets.
pub struct AssetStore<A> {
    assets: FxHashMap<String, A>,
}

impl<A> AssetStore<A> {
    pub fn new() -> Self {
        Self {
            assets: FxHashMap::default(),
        }
    }

    pub fn add(&mut self, key: impl Into<String>, asset: A) {
        self.assets.insert(key.into(), asset);
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&A> {
        self.assets.get(key.as_ref())
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }
}

impl<A> Default for AssetStore<A> {
    fn default() -> Self {
        Self::new()
    }
}
