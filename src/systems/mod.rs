//! Scene systems.
//!
//! Submodules overview
//! - [`animation`] – step unit animation clips against the world clock
//! - [`movement`] – advance unit glides by the frame delta
//! - [`render`] – draw-call sinks and the per-frame scene pass
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod movement;
pub mod render;
pub mod time;
