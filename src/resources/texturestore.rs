//! Loaded GPU textures keyed by name.
//!
//! The render sink resolves [`DrawCall`](crate::systems::render::DrawCall)
//! texture keys here. Everything else in the crate only sees the
//! [`TextureInfo`] returned on load.

use log::{error, info};
use raylib::prelude::*;
use rustc_hash::FxHashMap;

use crate::resources::atlas::TextureInfo;

#[derive(Default)]
pub struct TextureStore {
    pub map: FxHashMap<String, Texture2D>,
}

impl TextureStore {
    pub fn new() -> Self {
        TextureStore {
            map: FxHashMap::default(),
        }
    }

    /// Load an image file as a texture under `key`.
    ///
    /// Textures are sampled with point filtering so pixel art stays crisp.
    pub fn load(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        key: &str,
        path: &str,
    ) -> Result<TextureInfo, String> {
        let mut texture = rl.load_texture(thread, path).map_err(|e| {
            let msg = format!("Failed to load texture '{}' from {}: {}", key, path, e);
            error!("{}", msg);
            msg
        })?;
        texture.set_texture_filter(thread, TextureFilter::TEXTURE_FILTER_POINT);
        let info = TextureInfo::new(key, texture.width as f32, texture.height as f32);
        info!("Loaded texture '{}' ({}x{})", key, texture.width, texture.height);
        self.map.insert(key.to_string(), texture);
        Ok(info)
    }

    pub fn get(&self, key: &str) -> Option<&Texture2D> {
        self.map.get(key)
    }
}
