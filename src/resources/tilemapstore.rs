//! Named tilemap registry.
//!
//! Scenes usually hold more than one map (overworld, interiors). The store
//! owns each [`Tilemap`] under a string key; renderers look maps up by key.

use std::collections::hash_map::Entry;

use bevy_ecs::prelude::Resource;
use log::warn;
use rustc_hash::FxHashMap;

use crate::resources::tilemap::Tilemap;

/// Registry of tilemaps by key.
#[derive(Resource, Debug, Default)]
pub struct TilemapStore {
    pub map: FxHashMap<String, Tilemap>,
}

impl TilemapStore {
    /// Create an empty store.
    pub fn new() -> Self {
        TilemapStore {
            map: FxHashMap::default(),
        }
    }

    /// Create an empty tilemap under `key` and return it for loading.
    ///
    /// An existing map with the same key is replaced.
    pub fn add(&mut self, key: impl Into<String>, tile_width: f32, tile_height: f32) -> &mut Tilemap {
        let tilemap = Tilemap::new(tile_width, tile_height);
        match self.map.entry(key.into()) {
            Entry::Occupied(mut entry) => {
                warn!("Replacing tilemap '{}'", entry.key());
                entry.insert(tilemap);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(tilemap),
        }
    }

    /// Get a tilemap by its key.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&Tilemap> {
        self.map.get(key.as_ref())
    }

    pub fn get_mut(&mut self, key: impl AsRef<str>) -> Option<&mut Tilemap> {
        self.map.get_mut(key.as_ref())
    }

    /// Insert a tilemap with a specific key.
    pub fn insert(&mut self, key: impl Into<String>, tilemap: Tilemap) {
        self.map.insert(key.into(), tilemap);
    }

    pub fn remove(&mut self, key: impl AsRef<str>) -> Option<Tilemap> {
        self.map.remove(key.as_ref())
    }

    /// Clear all loaded tilemaps.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
