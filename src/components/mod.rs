//! Drawable scene objects.
//!
//! Submodules overview:
//! - [`sprite`] – textured quad placed in world space
//! - [`animatedsprite`] – sprite with named atlas animations and a JSON descriptor loader
//! - [`unit`] – tile-bound unit that glides between tiles

pub mod animatedsprite;
pub mod sprite;
pub mod unit;
