//! Scene configuration resource.
//!
//! Settings are read from an INI file. Every key is optional; anything
//! missing keeps its default so the viewer can start without a file.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 60
//!
//! [camera]
//! zoom = 2.0
//! pan_speed = 200.0
//!
//! [map]
//! tile_width = 16
//! tile_height = 16
//! tileset = ./assets/tiles.png
//! layers = ./assets/ground.txt,./assets/decor.txt
//!
//! [units]
//! texture = ./assets/knight.png
//! animations = ./assets/knight.json
//! move_speed = 100.0
//! spawn = 2:3,5:5
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::geom::Point;

const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_ZOOM: f32 = 2.0;
const DEFAULT_PAN_SPEED: f32 = 200.0;
const DEFAULT_TILE_SIZE: f32 = 16.0;
const DEFAULT_MOVE_SPEED: f32 = 100.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,
    /// Initial camera zoom.
    pub zoom: f32,
    /// Camera pan speed in world units per second.
    pub pan_speed: f32,
    pub tile_width: f32,
    pub tile_height: f32,
    pub tileset: Option<PathBuf>,
    /// Layer files, bottom to top.
    pub layers: Vec<PathBuf>,
    pub unit_texture: Option<PathBuf>,
    pub unit_animations: Option<PathBuf>,
    pub move_speed: f32,
    /// Starting tiles, one unit per entry.
    pub spawn: Vec<Point>,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            zoom: DEFAULT_ZOOM,
            pan_speed: DEFAULT_PAN_SPEED,
            tile_width: DEFAULT_TILE_SIZE,
            tile_height: DEFAULT_TILE_SIZE,
            tileset: None,
            layers: Vec::new(),
            unit_texture: None,
            unit_animations: None,
            move_speed: DEFAULT_MOVE_SPEED,
            spawn: Vec::new(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);

        info!(
            "Loaded config: {}x{} window, fps={}, zoom={}, {} layer(s), {} unit(s)",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.zoom,
            self.layers.len(),
            self.spawn.len()
        );

        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }

        // [camera] section
        if let Some(zoom) = config.getfloat("camera", "zoom").ok().flatten() {
            if zoom > 0.0 {
                self.zoom = zoom as f32;
            } else {
                warn!("Ignoring non-positive camera zoom {}", zoom);
            }
        }
        if let Some(speed) = config.getfloat("camera", "pan_speed").ok().flatten() {
            self.pan_speed = speed as f32;
        }

        // [map] section
        if let Some(w) = config.getfloat("map", "tile_width").ok().flatten() {
            self.tile_width = w as f32;
        }
        if let Some(h) = config.getfloat("map", "tile_height").ok().flatten() {
            self.tile_height = h as f32;
        }
        if let Some(path) = config.get("map", "tileset") {
            self.tileset = Some(PathBuf::from(path));
        }
        if let Some(layers) = config.get("map", "layers") {
            self.layers = split_list(&layers).map(PathBuf::from).collect();
        }

        // [units] section
        if let Some(path) = config.get("units", "texture") {
            self.unit_texture = Some(PathBuf::from(path));
        }
        if let Some(path) = config.get("units", "animations") {
            self.unit_animations = Some(PathBuf::from(path));
        }
        if let Some(speed) = config.getfloat("units", "move_speed").ok().flatten() {
            self.move_speed = speed as f32;
        }
        if let Some(spawn) = config.get("units", "spawn") {
            self.spawn = split_list(&spawn).filter_map(parse_tile).collect();
        }
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Parse `x:y` into a tile coordinate.
fn parse_tile(entry: &str) -> Option<Point> {
    let parsed = entry.split_once(':').and_then(|(x, y)| {
        Some(Point::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
    });
    if parsed.is_none() {
        warn!("Ignoring malformed spawn tile '{}'", entry);
    }
    parsed
}
