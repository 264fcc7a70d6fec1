//! Scene setup and interaction.
//!
//! Builds the tilemap and unit entities described by [`GameConfig`] into the
//! ECS world, assembles the per-frame update schedule, and turns mouse clicks
//! into unit selection and move orders.

use bevy_ecs::prelude::*;
use log::{info, warn};
use raylib::prelude::Vector2;

use crate::components::animatedsprite::{AdvancePolicy, AnimatedSprite};
use crate::components::unit::Unit;
use crate::geom::Point;
use crate::resources::atlas::TextureInfo;
use crate::resources::camera2d::{Camera, CameraContext};
use crate::resources::gameconfig::GameConfig;
use crate::resources::tilemap::Tilemap;
use crate::resources::tilemapstore::TilemapStore;
use crate::resources::unitgroup::{spawn_unit, UnitGroup};
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::unit_animation_system;
use crate::systems::movement::unit_movement_system;

/// Key of the scene's tilemap in the [`TilemapStore`].
pub const MAP_KEY: &str = "main";

/// Textures already uploaded to the GPU, by role.
#[derive(Debug, Clone, Default)]
pub struct SceneAssets {
    pub tileset: Option<TextureInfo>,
    pub unit_texture: Option<TextureInfo>,
}

/// Insert the scene resources and unit entities into `world`.
///
/// The starting camera, centred on the map, is made current in the
/// [`CameraContext`]. Without a [`GameConfig`] resource the defaults are used.
/// Layers or descriptors that fail to load are skipped; the scene still starts.
pub fn setup_scene(world: &mut World, assets: &SceneAssets, policy: AdvancePolicy) {
    let config = world
        .get_resource::<GameConfig>()
        .cloned()
        .unwrap_or_default();

    let mut tilemap = Tilemap::new(config.tile_width, config.tile_height);
    if let Some(tileset) = &assets.tileset {
        tilemap.set_texture(tileset.clone());
    }
    for path in &config.layers {
        if tilemap.load_layer(path).is_err() {
            warn!("Skipping layer {:?}", path);
        }
    }

    world.insert_resource(UnitGroup::new());
    if let Some(texture) = &assets.unit_texture {
        let template = unit_template(texture, &config, policy);
        for &tile in &config.spawn {
            let mut sprite = template.clone();
            let pos = tilemap.tile_to_world(tile);
            sprite.sprite_mut().set_position(pos.x, pos.y);
            let mut unit = Unit::from_animated_sprite(sprite, &tilemap);
            unit.set_move_speed(config.move_speed);
            spawn_unit(world, unit);
        }
    } else if !config.spawn.is_empty() {
        warn!("No unit texture loaded; {} spawn(s) ignored", config.spawn.len());
    }
    info!(
        "Scene ready: {} layer(s), {} unit(s)",
        tilemap.layers().len(),
        world.resource::<UnitGroup>().len()
    );

    let (width, height) = map_extent(&tilemap);
    let camera = Camera::new(
        width * 0.5,
        height * 0.5,
        config.window_width as f32,
        config.window_height as f32,
        0.0,
        config.zoom,
    );

    let mut store = TilemapStore::new();
    store.insert(MAP_KEY, tilemap);

    world.init_resource::<WorldTime>();
    world.insert_resource(store);
    world.insert_resource(CameraContext::with_camera(camera));
}

/// Per-frame update: unit animation, then unit glides.
///
/// Run it after [`update_world_time`](crate::systems::time::update_world_time)
/// and before drawing.
pub fn scene_update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(unit_animation_system);
    update.add_systems(unit_movement_system.after(unit_animation_system));
    update
}

/// Sprite shared by every spawned unit, with its first clip active.
fn unit_template(texture: &TextureInfo, config: &GameConfig, policy: AdvancePolicy) -> AnimatedSprite {
    let mut sprite = AnimatedSprite::new(texture.clone(), 0.0, 0.0);
    sprite.set_advance_policy(policy);
    if let Some(path) = &config.unit_animations {
        // failure already logged by the loader
        let _ = sprite.load_animations_from_file(path);
    }
    if let Some(first) = sprite.animations().first().map(|a| a.name.clone()) {
        sprite.set_active_animation(&first);
    }
    sprite
}

/// World-space size of the largest layer.
pub fn map_extent(tilemap: &Tilemap) -> (f32, f32) {
    let columns = tilemap.layers().iter().map(|l| l.width).max().unwrap_or(0);
    let rows = tilemap.layers().iter().map(|l| l.height).max().unwrap_or(0);
    (
        columns as f32 * tilemap.tile_width(),
        rows as f32 * tilemap.tile_height(),
    )
}

/// Result of a click on the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A unit was under the cursor and is now selected.
    Selected(Entity),
    /// The selected unit was ordered to this tile.
    Ordered(Entity, Point),
    Ignored,
}

/// Select the unit under `screen`, or send the selected unit to the clicked tile.
///
/// Picking uses whatever camera [`CameraContext`] currently holds.
pub fn handle_click(
    world: &mut World,
    map_key: &str,
    screen: Vector2,
    selected: &mut Option<Entity>,
) -> ClickOutcome {
    let ctx = world.resource::<CameraContext>().clone();
    world.resource_scope(|world, store: Mut<TilemapStore>| {
        let Some(tilemap) = store.get(map_key) else {
            return ClickOutcome::Ignored;
        };

        let hit = world
            .get_resource::<UnitGroup>()
            .and_then(|units| units.find_at_screen_position(world, tilemap, &ctx, screen));
        if let Some(entity) = hit {
            *selected = Some(entity);
            return ClickOutcome::Selected(entity);
        }

        let Some(entity) = *selected else {
            return ClickOutcome::Ignored;
        };
        let Some(mut unit) = world.get_mut::<Unit>(entity) else {
            *selected = None;
            return ClickOutcome::Ignored;
        };
        let tile = tilemap.map_position_to_tile(ctx.screen_to_world(screen));
        unit.start_move_to_tile(tilemap, tile);
        ClickOutcome::Ordered(entity, tile)
    })
}
