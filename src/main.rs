//! Tile scene viewer entry point.
//!
//! Loads a layered tilemap and a handful of animated units described by an
//! INI file, then runs an interactive view over them using:
//! - **raylib** for windowing, input, and texture blits
//! - **bevy_ecs** for the world resources the scene lives in
//!
//! # Controls
//!
//! - `W`/`A`/`S`/`D` pan the camera
//! - `Q`/`E` rotate the camera
//! - mouse wheel or `+`/`-` zoom
//! - left click on a unit selects it; left click elsewhere sends it there
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config ./config.ini
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod components;
mod game;
mod geom;
mod resources;
mod systems;

use crate::components::animatedsprite::AdvancePolicy;
use crate::game::{ClickOutcome, MAP_KEY, SceneAssets, handle_click, scene_update_schedule, setup_scene};
use crate::resources::camera2d::{Camera, CameraContext};
use crate::resources::gameconfig::GameConfig;
use crate::resources::texturestore::TextureStore;
use crate::systems::render::{RaylibSink, draw_scene};
use crate::systems::time::update_world_time;
use bevy_ecs::prelude::*;
use clap::Parser;
use log::{info, warn};
use raylib::prelude::*;
use std::path::{Path, PathBuf};

/// Radians per second when rotating with Q/E.
const ROTATE_SPEED: f32 = 1.5;
/// Zoom factor per wheel notch or key press.
const ZOOM_STEP: f32 = 1.1;
const MIN_ZOOM: f32 = 0.25;
const MAX_ZOOM: f32 = 8.0;

/// Tile scene viewer
#[derive(Parser)]
#[command(version, about = "Interactive viewer for layered tilemaps and animated units")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Catch up on every missed animation frame instead of stepping once per update.
    #[arg(long)]
    catch_up: bool,
}

fn load_texture(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    textures: &mut TextureStore,
    key: &str,
    path: Option<&Path>,
) -> Option<resources::atlas::TextureInfo> {
    let path = path?;
    textures
        .load(rl, thread, key, &path.to_string_lossy())
        .ok()
}

/// Apply keyboard and wheel camera controls for one frame.
fn update_camera(rl: &RaylibHandle, camera: &mut Camera, pan_speed: f32, dt: f32) {
    let mut dx = 0.0;
    let mut dy = 0.0;
    if rl.is_key_down(KeyboardKey::KEY_A) {
        dx -= 1.0;
    }
    if rl.is_key_down(KeyboardKey::KEY_D) {
        dx += 1.0;
    }
    if rl.is_key_down(KeyboardKey::KEY_W) {
        dy -= 1.0;
    }
    if rl.is_key_down(KeyboardKey::KEY_S) {
        dy += 1.0;
    }
    // Pan speed is in world units, so it does not scale with zoom.
    let step = pan_speed * dt;
    camera.move_by(dx * step, dy * step);

    let mut rotation = camera.rotation();
    if rl.is_key_down(KeyboardKey::KEY_Q) {
        rotation -= ROTATE_SPEED * dt;
    }
    if rl.is_key_down(KeyboardKey::KEY_E) {
        rotation += ROTATE_SPEED * dt;
    }
    if rotation != camera.rotation() {
        camera.set_rotation(rotation);
    }

    let mut notches = rl.get_mouse_wheel_move();
    if rl.is_key_pressed(KeyboardKey::KEY_EQUAL) || rl.is_key_pressed(KeyboardKey::KEY_KP_ADD) {
        notches += 1.0;
    }
    if rl.is_key_pressed(KeyboardKey::KEY_MINUS)
        || rl.is_key_pressed(KeyboardKey::KEY_KP_SUBTRACT)
    {
        notches -= 1.0;
    }
    if notches != 0.0 {
        let zoom = (camera.zoom() * ZOOM_STEP.powf(notches)).clamp(MIN_ZOOM, MAX_ZOOM);
        camera.set_zoom(zoom);
    }

    let (w, h) = (rl.get_screen_width() as f32, rl.get_screen_height() as f32);
    if camera.viewport() != Vector2::new(w, h) {
        camera.set_viewport(w, h);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // --------------- Config ---------------
    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    let policy = if cli.catch_up {
        AdvancePolicy::CatchUp
    } else {
        AdvancePolicy::Step
    };

    // --------------- Raylib window & assets ---------------
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .resizable()
        .title("Tile Scene")
        .build();
    rl.set_target_fps(config.target_fps);

    let mut textures = TextureStore::new();
    let assets = SceneAssets {
        tileset: load_texture(&mut rl, &thread, &mut textures, "tileset", config.tileset.as_deref()),
        unit_texture: load_texture(
            &mut rl,
            &thread,
            &mut textures,
            "units",
            config.unit_texture.as_deref(),
        ),
    };

    // --------------- ECS world + resources ---------------
    let pan_speed = config.pan_speed;
    let mut world = World::new();
    world.insert_resource(config);
    setup_scene(&mut world, &assets, policy);
    let mut update = scene_update_schedule();
    let mut selected: Option<Entity> = None;

    // --------------- Main loop ---------------
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        update_world_time(&mut world, dt);

        if let Some(camera) = world.resource_mut::<CameraContext>().current_mut() {
            update_camera(&rl, camera, pan_speed, dt);
        }

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            let mouse = rl.get_mouse_position();
            match handle_click(&mut world, MAP_KEY, mouse, &mut selected) {
                ClickOutcome::Selected(e) => info!("Selected unit {:?}", e),
                ClickOutcome::Ordered(e, tile) => {
                    info!("Unit {:?} moving to ({}, {})", e, tile.x, tile.y)
                }
                ClickOutcome::Ignored => {}
            }
        }

        update.run(&mut world);

        let fps = rl.get_fps();
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        {
            let mut sink = RaylibSink::new(&mut d, &textures);
            draw_scene(&world, MAP_KEY, &mut sink);
        }

        // HUD is drawn in screen space
        let world_camera = world.resource_mut::<CameraContext>().use_camera(None);
        if let Some(camera) = &world_camera {
            let pos = camera.position();
            d.draw_text(
                &format!(
                    "cam ({:.0}, {:.0}) zoom {:.2} rot {:.0}  fps {}",
                    pos.x,
                    pos.y,
                    camera.zoom(),
                    camera.rotation().to_degrees(),
                    fps
                ),
                8,
                8,
                20,
                Color::RAYWHITE,
            );
        }
        let selection = match selected {
            Some(e) => format!("selected: unit {:?}", e),
            None => "selected: none".to_string(),
        };
        d.draw_text(&selection, 8, 32, 20, Color::RAYWHITE);
        world.resource_mut::<CameraContext>().use_camera(world_camera);
    }

    info!("Bye");
}
