//! Draw-call sink and scene rendering.
//!
//! The core never calls raylib directly. Tilemaps and sprites describe each
//! blit as a [`DrawCall`] and hand it to a [`DrawSink`]. [`RaylibSink`] is the
//! real backend; [`RecordingSink`] collects calls for tests and tooling.
//!
//! [`draw_scene`] renders one frame of the world pass from the resources and
//! unit entities held in a `bevy_ecs::World`: the tilemap layers first, then
//! every unit.

use std::sync::Arc;

use bevy_ecs::prelude::*;
use log::debug;
use raylib::prelude::*;

use crate::resources::camera2d::CameraContext;
use crate::resources::texturestore::TextureStore;
use crate::resources::tilemapstore::TilemapStore;
use crate::resources::unitgroup::UnitGroup;

/// One textured quad, already in screen space.
#[derive(Debug, Clone)]
pub struct DrawCall {
    /// Key of the texture in the [`TextureStore`].
    pub texture: Arc<str>,
    /// Region of the texture to sample, in texture pixels.
    pub source: Rectangle,
    /// Screen-space destination. `x`/`y` is the top-left corner.
    pub dest: Rectangle,
    /// Clockwise rotation in degrees around the destination's top-left.
    pub rotation: f32,
}

/// Receiver of draw calls.
pub trait DrawSink {
    fn draw(&mut self, call: &DrawCall);
}

/// Sink that keeps every call it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub calls: Vec<DrawCall>,
}

impl DrawSink for RecordingSink {
    fn draw(&mut self, call: &DrawCall) {
        self.calls.push(call.clone());
    }
}

/// Sink that blits through a raylib draw handle.
///
/// Textures are resolved by key in the [`TextureStore`]; unknown keys are
/// skipped so a failed texture load only leaves that visual absent.
pub struct RaylibSink<'a, D: RaylibDraw> {
    d: &'a mut D,
    textures: &'a TextureStore,
}

impl<'a, D: RaylibDraw> RaylibSink<'a, D> {
    pub fn new(d: &'a mut D, textures: &'a TextureStore) -> Self {
        RaylibSink { d, textures }
    }
}

impl<D: RaylibDraw> DrawSink for RaylibSink<'_, D> {
    fn draw(&mut self, call: &DrawCall) {
        match self.textures.get(&call.texture) {
            Some(tex) => {
                self.d.draw_texture_pro(
                    tex,
                    call.source,
                    call.dest,
                    Vector2 { x: 0.0, y: 0.0 },
                    call.rotation,
                    Color::WHITE,
                );
            }
            None => debug!("Skipping draw call for missing texture '{}'", call.texture),
        }
    }
}

/// Draw the tilemap stored under `map_key` and then every unit.
///
/// Rendering only reads the world; animation and glides advance in
/// [`unit_animation_system`](crate::systems::animation::unit_animation_system)
/// and [`unit_movement_system`](crate::systems::movement::unit_movement_system)
/// before this runs. The camera used is whatever [`CameraContext`] currently
/// holds.
pub fn draw_scene(world: &World, map_key: &str, sink: &mut dyn DrawSink) {
    let ctx = world.resource::<CameraContext>();

    match world.resource::<TilemapStore>().get(map_key) {
        Some(tilemap) => tilemap.draw(ctx, sink),
        None => debug!("No tilemap '{}' to draw", map_key),
    }

    match world.get_resource::<UnitGroup>() {
        Some(units) => units.draw(world, ctx, sink),
        None => debug!("No units to draw"),
    }
}
