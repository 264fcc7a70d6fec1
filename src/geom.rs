//! Integer tile coordinates.
//!
//! Float positions use raylib's [`Vector2`](raylib::prelude::Vector2)
//! directly; this module only adds the integer [`Point`] used to address
//! tilemap cells.

use std::ops::{Add, Sub};

/// Integer 2D coordinate, used for tile (column, row) addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}
