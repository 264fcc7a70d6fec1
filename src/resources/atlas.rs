//! Texture atlas addressing.
//!
//! An atlas is one texture holding many fixed-size cells laid out
//! left-to-right, top-to-bottom. Tilemaps and animated sprites both pick a
//! cell by a flat index; [`atlas_cell`] turns that index into a (column, row).
//!
//! The core never touches GPU textures directly. It works with
//! [`TextureInfo`], a key into [`TextureStore`](super::texturestore::TextureStore)
//! plus the pixel size needed to compute source rectangles.

use std::sync::Arc;

use raylib::prelude::{Rectangle, Vector2};

use crate::geom::Point;
use crate::resources::camera2d::CameraContext;
use crate::systems::render::{DrawCall, DrawSink};

/// Handle to a loaded texture: its store key and pixel dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureInfo {
    pub key: Arc<str>,
    pub width: f32,
    pub height: f32,
}

impl TextureInfo {
    pub fn new(key: impl Into<Arc<str>>, width: f32, height: f32) -> Self {
        TextureInfo {
            key: key.into(),
            width,
            height,
        }
    }

    /// Number of `cell_width`-wide columns that fit in this texture.
    ///
    /// Returns 0 for a degenerate cell width, which callers treat as
    /// "nothing to sample".
    pub fn columns(&self, cell_width: f32) -> u32 {
        if cell_width <= 0.0 || !cell_width.is_finite() {
            return 0;
        }
        (self.width / cell_width) as u32
    }
}

/// Column and row of cell `index` in an atlas `columns` cells wide.
///
/// `columns` must be non-zero.
pub fn atlas_cell(index: u32, columns: u32) -> Point {
    Point::new((index % columns) as i32, (index / columns) as i32)
}

/// Source rectangle of the cell at `cell`.
pub fn cell_rect(cell: Point, cell_width: f32, cell_height: f32) -> Rectangle {
    Rectangle {
        x: cell.x as f32 * cell_width,
        y: cell.y as f32 * cell_height,
        width: cell_width,
        height: cell_height,
    }
}

/// An atlas sliced into equal tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct Tileset {
    pub texture: TextureInfo,
    pub tile_width: f32,
    pub tile_height: f32,
}

impl Tileset {
    pub fn new(texture: TextureInfo, tile_width: f32, tile_height: f32) -> Self {
        Tileset {
            texture,
            tile_width,
            tile_height,
        }
    }

    pub fn columns(&self) -> u32 {
        self.texture.columns(self.tile_width)
    }

    /// Source rectangle for flat tile `index`, or `None` when the atlas is
    /// narrower than one tile.
    pub fn source_rect(&self, index: u32) -> Option<Rectangle> {
        let columns = self.columns();
        if columns == 0 {
            return None;
        }
        Some(cell_rect(
            atlas_cell(index, columns),
            self.tile_width,
            self.tile_height,
        ))
    }

    /// Draw the tile at atlas `(column, row)` with its top-left at world `position`.
    pub fn draw_tile(
        &self,
        cell: Point,
        position: Vector2,
        ctx: &CameraContext,
        sink: &mut dyn DrawSink,
    ) {
        let source = cell_rect(cell, self.tile_width, self.tile_height);
        self.emit(source, position, ctx, sink);
    }

    /// Draw flat tile `index` with its top-left at world `position`.
    pub fn draw_tile_index(
        &self,
        index: u32,
        position: Vector2,
        ctx: &CameraContext,
        sink: &mut dyn DrawSink,
    ) {
        if let Some(source) = self.source_rect(index) {
            self.emit(source, position, ctx, sink);
        }
    }

    fn emit(&self, source: Rectangle, position: Vector2, ctx: &CameraContext, sink: &mut dyn DrawSink) {
        let screen = ctx.world_to_screen(position);
        let zoom = ctx.zoom();
        sink.draw(&DrawCall {
            texture: self.texture.key.clone(),
            source,
            dest: Rectangle {
                x: screen.x,
                y: screen.y,
                width: self.tile_width * zoom,
                height: self.tile_height * zoom,
            },
            rotation: ctx.rotation_degrees(),
        });
    }
}
