//! Layered tile grids rendered from a shared atlas.
//!
//! A [`Tilemap`] owns an ordered list of [`Layer`]s (drawn bottom to top) and
//! the tile size in world units. Each layer is a row-major grid of flat atlas
//! indices. The atlas texture is bound by [`TextureInfo`]; the GPU texture
//! itself stays in the texture store.
//!
//! # Layer file format
//!
//! ```text
//! 3          <- width in tiles
//! 2          <- height in tiles
//! 0,1,2      <- indices, row-major, comma separated
//! 3,4,5
//! ```
//!
//! Entries past `width * height` are ignored. A short file is padded with
//! tile 0, and an unreadable index becomes 0; both are logged. A header
//! larger than [`MAX_LAYER_CELLS`] cells fails the load.

use std::path::Path;

use log::{error, info, warn};
use raylib::prelude::Vector2;

use crate::geom::Point;
use crate::resources::atlas::{TextureInfo, Tileset};
use crate::resources::camera2d::CameraContext;
use crate::systems::render::DrawSink;

/// Largest grid a layer file may declare (4096 x 4096).
pub const MAX_LAYER_CELLS: usize = 1 << 24;

/// One grid of tile indices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Layer {
    pub width: u32,
    pub height: u32,
    /// Row-major, always `width * height` long.
    pub tiles: Vec<u32>,
}

impl Layer {
    /// Parse the layer text format.
    pub fn parse(text: &str) -> Result<Self, String> {
        let mut lines = text.lines();
        let width = parse_dimension(lines.next(), "width")?;
        let height = parse_dimension(lines.next(), "height")?;

        let expected = (width as usize) * (height as usize);
        if expected > MAX_LAYER_CELLS {
            return Err(format!(
                "Layer {}x{} exceeds the {} cell limit",
                width, height, MAX_LAYER_CELLS
            ));
        }
        let mut tiles = Vec::new();
        tiles
            .try_reserve_exact(expected)
            .map_err(|e| format!("Cannot allocate {}x{} layer: {}", width, height, e))?;

        'rows: for line in lines {
            for entry in line.split(',') {
                let entry = entry.trim();
                if entry.is_empty() {
                    continue;
                }
                if tiles.len() >= expected {
                    break 'rows;
                }
                let index = entry.parse::<u32>().unwrap_or_else(|_| {
                    warn!("Invalid tile index '{}' at cell {}, using 0", entry, tiles.len());
                    0
                });
                tiles.push(index);
            }
        }

        if tiles.len() < expected {
            warn!(
                "Layer declares {}x{} tiles but only {} were given, padding with 0",
                width,
                height,
                tiles.len()
            );
            tiles.resize(expected, 0);
        }

        Ok(Layer {
            width,
            height,
            tiles,
        })
    }

    /// Tile index at `(column, row)`, or `None` outside the grid.
    pub fn get(&self, tile: Point) -> Option<u32> {
        if tile.x < 0 || tile.y < 0 {
            return None;
        }
        let (x, y) = (tile.x as u32, tile.y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles.get((y * self.width + x) as usize).copied()
    }
}

/// Each dimension must fit in a `u16`.
fn parse_dimension(line: Option<&str>, what: &str) -> Result<u32, String> {
    let line = line.ok_or_else(|| format!("Layer is missing its {} line", what))?;
    line.trim()
        .parse::<u16>()
        .map(u32::from)
        .map_err(|e| format!("Invalid layer {} '{}': {}", what, line.trim(), e))
}

/// Tile grid layers plus the atlas they sample from.
#[derive(Debug, Clone, Default)]
pub struct Tilemap {
    tile_width: f32,
    tile_height: f32,
    layers: Vec<Layer>,
    texture: Option<TextureInfo>,
}

impl Tilemap {
    /// Empty tilemap with the given tile size in world units.
    pub fn new(tile_width: f32, tile_height: f32) -> Self {
        Tilemap {
            tile_width,
            tile_height,
            layers: Vec::new(),
            texture: None,
        }
    }

    pub fn tile_width(&self) -> f32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> f32 {
        self.tile_height
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Append an already-built layer on top of the existing ones.
    pub fn push_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Load a layer file and append it. On failure nothing is appended.
    pub fn load_layer(&mut self, path: impl AsRef<Path>) -> Result<(), String> {
        let path = path.as_ref();
        let result = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read layer file {:?}: {}", path, e))
            .and_then(|text| Layer::parse(&text));
        match result {
            Ok(layer) => {
                info!(
                    "Loaded layer {:?} ({}x{}) as layer {}",
                    path,
                    layer.width,
                    layer.height,
                    self.layers.len()
                );
                self.layers.push(layer);
                Ok(())
            }
            Err(e) => {
                error!("{}", e);
                Err(e)
            }
        }
    }

    /// Parse `text` as a layer and append it. On failure nothing is appended.
    pub fn load_layer_from_str(&mut self, text: &str) -> Result<(), String> {
        let layer = Layer::parse(text).inspect_err(|e| error!("{}", e))?;
        self.layers.push(layer);
        Ok(())
    }

    /// Bind the atlas sampled by [`draw`](Tilemap::draw).
    pub fn set_texture(&mut self, texture: TextureInfo) {
        self.texture = Some(texture);
    }

    pub fn texture(&self) -> Option<&TextureInfo> {
        self.texture.as_ref()
    }

    /// Tile index at `tile` in layer `layer`.
    pub fn tile_at(&self, layer: usize, tile: Point) -> Option<u32> {
        self.layers.get(layer)?.get(tile)
    }

    /// Emit one draw call per cell per layer, bottom layer first.
    ///
    /// Nothing is drawn until a texture is bound, or when the atlas is
    /// narrower than a single tile.
    pub fn draw(&self, ctx: &CameraContext, sink: &mut dyn DrawSink) {
        let Some(texture) = &self.texture else {
            return;
        };
        let tileset = Tileset::new(texture.clone(), self.tile_width, self.tile_height);
        if tileset.columns() == 0 {
            return;
        }

        for layer in &self.layers {
            if layer.width == 0 {
                continue;
            }
            for (n, &index) in layer.tiles.iter().enumerate() {
                let n = n as u32;
                let cell = Point::new((n % layer.width) as i32, (n / layer.width) as i32);
                tileset.draw_tile_index(index, self.tile_to_world(cell), ctx, sink);
            }
        }
    }

    /// Tile coordinate containing world position `world`.
    pub fn map_position_to_tile(&self, world: Vector2) -> Point {
        Point::new(
            (world.x / self.tile_width).floor() as i32,
            (world.y / self.tile_height).floor() as i32,
        )
    }

    /// World position of the top-left corner of `tile`.
    pub fn tile_to_world(&self, tile: Point) -> Vector2 {
        Vector2::new(
            tile.x as f32 * self.tile_width,
            tile.y as f32 * self.tile_height,
        )
    }
}
