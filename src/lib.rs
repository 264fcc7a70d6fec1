//! Tile scene library.
//!
//! This module exposes the camera, tilemap, sprite, and unit types together
//! with the scene systems for use in integration tests and as a reusable
//! library.

pub mod components;
pub mod game;
pub mod geom;
pub mod resources;
pub mod systems;
