use raylib::prelude::{Rectangle, Vector2};

use crate::resources::atlas::TextureInfo;
use crate::resources::camera2d::CameraContext;
use crate::systems::render::{DrawCall, DrawSink};

/// A textured quad placed in world space.
///
/// `position` is the top-left corner in world units. `scale` multiplies the
/// drawn size on each axis; camera zoom is applied on top of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub texture: TextureInfo,
    pub position: Vector2,
    pub scale: Vector2,
    pub visible: bool,
}

impl Sprite {
    pub fn new(texture: TextureInfo, x: f32, y: f32) -> Self {
        Sprite {
            texture,
            position: Vector2::new(x, y),
            scale: Vector2::new(1.0, 1.0),
            visible: true,
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vector2::new(x, y);
    }

    pub fn set_scale(&mut self, scale_x: f32, scale_y: f32) {
        self.scale = Vector2::new(scale_x, scale_y);
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn set_texture(&mut self, texture: TextureInfo) {
        self.texture = texture;
    }

    /// Drawn width in world units.
    pub fn width(&self) -> f32 {
        self.texture.width * self.scale.x
    }

    /// Drawn height in world units.
    pub fn height(&self) -> f32 {
        self.texture.height * self.scale.y
    }

    /// Draw the whole texture.
    pub fn draw(&self, ctx: &CameraContext, sink: &mut dyn DrawSink) {
        if !self.visible {
            return;
        }
        let source = Rectangle {
            x: 0.0,
            y: 0.0,
            width: self.texture.width,
            height: self.texture.height,
        };
        self.draw_region(source, ctx, sink);
    }

    /// Draw `source` (a region of the texture) at the sprite's position.
    pub(crate) fn draw_region(&self, source: Rectangle, ctx: &CameraContext, sink: &mut dyn DrawSink) {
        let screen = ctx.world_to_screen(self.position);
        let zoom = ctx.zoom();
        sink.draw(&DrawCall {
            texture: self.texture.key.clone(),
            source,
            dest: Rectangle {
                x: screen.x,
                y: screen.y,
                width: source.width * self.scale.x * zoom,
                height: source.height * self.scale.y * zoom,
            },
            rotation: ctx.rotation_degrees(),
        });
    }
}
