//! Long-lived scene data.
//!
//! Most of these are inserted into the ECS world and read by the scene
//! systems. Each submodule documents the semantics of its resource(s).
//!
//! Overview
//! - `atlas` – texture descriptors and atlas cell math shared by tiles and sprites
//! - `camera2d` – view transform and the current-camera context
//! - `gameconfig` – INI-backed viewer settings
//! - `texturestore` – loaded GPU textures keyed by string IDs
//! - `tilemap` – layered tile grids and their loaders
//! - `tilemapstore` – tilemaps keyed by name
//! - `unitgroup` – ordered collection of units
//! - `worldtime` – simulation time and delta
pub mod atlas;
pub mod camera2d;
pub mod gameconfig;
pub mod texturestore;
pub mod tilemap;
pub mod tilemapstore;
pub mod unitgroup;
pub mod worldtime;
