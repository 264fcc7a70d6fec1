//! Grid-bound game units.
//!
//! A [`Unit`] owns an [`AnimatedSprite`] and a logical tile position on a
//! [`Tilemap`]. Ordering a move updates the tile position at once, while the
//! sprite glides from where it is to the target tile at `move_speed` world
//! units per second.
//!
//! Units are ECS components; [`crate::systems::animation`] and
//! [`crate::systems::movement`] advance them once per frame.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

use crate::components::animatedsprite::AnimatedSprite;
use crate::geom::Point;
use crate::resources::camera2d::CameraContext;
use crate::resources::tilemap::Tilemap;
use crate::systems::render::DrawSink;

/// Default glide speed, in world units per second.
pub const DEFAULT_MOVE_SPEED: f32 = 100.0;

/// Linear interpolation state of an in-progress move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveState {
    pub start: Vector2,
    pub target: Vector2,
    /// Seconds the whole move takes.
    pub duration: f32,
    /// Seconds spent so far.
    pub elapsed: f32,
    pub moving: bool,
}

impl Default for MoveState {
    fn default() -> Self {
        MoveState {
            start: Vector2::new(0.0, 0.0),
            target: Vector2::new(0.0, 0.0),
            duration: 0.0,
            elapsed: 0.0,
            moving: false,
        }
    }
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Unit {
    sprite: AnimatedSprite,
    tile_position: Point,
    movement: MoveState,
    move_speed: f32,
    animated: bool,
}

impl Unit {
    /// Wrap `sprite` in a unit, placing it on the tile under the sprite's
    /// current world position.
    pub fn from_animated_sprite(sprite: AnimatedSprite, tilemap: &Tilemap) -> Self {
        let tile_position = tilemap.map_position_to_tile(sprite.sprite().position);
        Unit {
            sprite,
            tile_position,
            movement: MoveState::default(),
            move_speed: DEFAULT_MOVE_SPEED,
            animated: true,
        }
    }

    pub fn tile_position(&self) -> Point {
        self.tile_position
    }

    /// World position of the sprite (top-left).
    pub fn position(&self) -> Vector2 {
        self.sprite.sprite().position
    }

    pub fn is_moving(&self) -> bool {
        self.movement.moving
    }

    pub fn movement(&self) -> &MoveState {
        &self.movement
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn set_move_speed(&mut self, speed: f32) {
        self.move_speed = speed;
    }

    /// Enable or disable sprite animation while drawing.
    pub fn set_animated(&mut self, animated: bool) {
        self.animated = animated;
    }

    pub fn sprite(&self) -> &AnimatedSprite {
        &self.sprite
    }

    pub fn sprite_mut(&mut self) -> &mut AnimatedSprite {
        &mut self.sprite
    }

    /// Release the owned sprite.
    pub fn into_sprite(self) -> AnimatedSprite {
        self.sprite
    }

    /// Shift the logical tile position without moving the sprite.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.tile_position = self.tile_position + Point::new(dx, dy);
    }

    /// Start gliding toward `target`.
    ///
    /// The tile position changes immediately. A move to where the sprite
    /// already stands cancels any glide in progress. A non-positive move
    /// speed places the sprite on the target at once.
    pub fn start_move_to_tile(&mut self, tilemap: &Tilemap, target: Point) {
        self.tile_position = target;

        let start = self.position();
        let target_pos = tilemap.tile_to_world(target);
        let dist = start.distance_to(target_pos);
        if dist == 0.0 {
            self.movement.moving = false;
            return;
        }

        if self.move_speed <= 0.0 {
            self.sprite
                .sprite_mut()
                .set_position(target_pos.x, target_pos.y);
            self.movement.moving = false;
            return;
        }

        self.movement = MoveState {
            start,
            target: target_pos,
            duration: dist / self.move_speed,
            elapsed: 0.0,
            moving: true,
        };
    }

    /// Advance the glide by `delta` seconds.
    pub fn advance_movement(&mut self, delta: f32) {
        if !self.movement.moving {
            return;
        }
        self.movement.elapsed += delta.max(0.0);

        let t = if self.movement.duration > 0.0 {
            self.movement.elapsed / self.movement.duration
        } else {
            1.0
        };

        let pos = if t >= 1.0 {
            self.movement.moving = false;
            self.movement.target
        } else {
            self.movement.start.lerp(self.movement.target, t.max(0.0))
        };
        self.sprite.sprite_mut().set_position(pos.x, pos.y);
    }

    /// Step the sprite's active clip to the clock `now_ms`, unless animation
    /// is switched off.
    pub fn update_animation(&mut self, now_ms: u64) {
        if self.animated {
            self.sprite.update(now_ms);
        }
    }

    pub fn render(&self, ctx: &CameraContext, sink: &mut dyn DrawSink) {
        self.sprite.draw(ctx, sink);
    }

    /// Draw the sprite, then advance its animation and any glide.
    ///
    /// `delta` is the frame time in seconds and `now_ms` the animation clock.
    /// Both advance every frame, whether or not the sprite is visible.
    pub fn draw(&mut self, delta: f32, now_ms: u64, ctx: &CameraContext, sink: &mut dyn DrawSink) {
        self.render(ctx, sink);
        self.update_animation(now_ms);
        self.advance_movement(delta);
    }
}

/// Index of the first unit standing on the tile under screen point `screen`.
pub fn unit_at_screen_position<'a>(
    units: impl IntoIterator<Item = &'a Unit>,
    tilemap: &Tilemap,
    ctx: &CameraContext,
    screen: Vector2,
) -> Option<usize> {
    let world = ctx.screen_to_world(screen);
    let tile = tilemap.map_position_to_tile(world);
    units.into_iter().position(|u| u.tile_position == tile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::atlas::TextureInfo;
    use crate::resources::camera2d::Camera;
    use crate::systems::render::RecordingSink;

    const EPSILON: f32 = 1e-4;

    fn map() -> Tilemap {
        Tilemap::new(16.0, 16.0)
    }

    fn knight_at(x: f32, y: f32) -> AnimatedSprite {
        let mut sprite = AnimatedSprite::new(TextureInfo::new("knight", 64.0, 16.0), x, y);
        sprite.add_animation("idle", 16.0, 16.0, 0, 4, 100);
        sprite.set_active_animation("idle");
        sprite
    }

    #[test]
    fn test_from_sprite_floors_tile_position() {
        let unit = Unit::from_animated_sprite(knight_at(40.0, 15.9), &map());
        assert_eq!(unit.tile_position(), Point::new(2, 0));
        assert_eq!(unit.move_speed(), DEFAULT_MOVE_SPEED);
        assert!(!unit.is_moving());
    }

    #[test]
    fn test_zero_distance_move_is_noop() {
        let tilemap = map();
        let mut unit = Unit::from_animated_sprite(knight_at(32.0, 16.0), &tilemap);
        unit.start_move_to_tile(&tilemap, Point::new(2, 1));
        assert!(!unit.is_moving());
        assert_eq!(unit.position(), Vector2::new(32.0, 16.0));
        assert_eq!(unit.tile_position(), Point::new(2, 1));
    }

    #[test]
    fn test_move_back_to_start_cancels_glide() {
        let tilemap = map();
        let mut unit = Unit::from_animated_sprite(knight_at(0.0, 0.0), &tilemap);
        unit.start_move_to_tile(&tilemap, Point::new(3, 0));
        assert!(unit.is_moving());

        // Sprite has not left (0, 0) yet.
        unit.start_move_to_tile(&tilemap, Point::new(0, 0));
        assert!(!unit.is_moving());
        assert_eq!(unit.tile_position(), Point::new(0, 0));

        unit.advance_movement(1.0);
        assert_eq!(unit.position(), Vector2::new(0.0, 0.0));
    }

    #[test]
    fn test_move_updates_tile_eagerly_and_sets_duration() {
        let tilemap = map();
        let mut unit = Unit::from_animated_sprite(knight_at(0.0, 0.0), &tilemap);
        unit.start_move_to_tile(&tilemap, Point::new(3, 4));

        assert_eq!(unit.tile_position(), Point::new(3, 4));
        assert!(unit.is_moving());
        // distance = sqrt(48^2 + 64^2) = 80, speed 100
        assert!((unit.movement().duration - 0.8).abs() < EPSILON);
        assert_eq!(unit.position(), Vector2::new(0.0, 0.0));
    }

    #[test]
    fn test_interpolation_midpoint() {
        let tilemap = map();
        let mut unit = Unit::from_animated_sprite(knight_at(0.0, 0.0), &tilemap);
        unit.start_move_to_tile(&tilemap, Point::new(2, 0)); // 32 units, 0.32s
        unit.advance_movement(0.16);
        assert!((unit.position().x - 16.0).abs() < EPSILON);
        assert!(unit.is_moving());
    }

    #[test]
    fn test_interpolation_snaps_to_target_and_stops() {
        let tilemap = map();
        let mut unit = Unit::from_animated_sprite(knight_at(1.3, 2.7), &tilemap);
        unit.start_move_to_tile(&tilemap, Point::new(5, 3));
        let target = tilemap.tile_to_world(Point::new(5, 3));

        for _ in 0..3 {
            unit.advance_movement(0.5);
        }
        assert!(!unit.is_moving());
        assert_eq!(unit.position(), target);

        unit.advance_movement(1.0);
        assert_eq!(unit.position(), target);
        assert!(!unit.is_moving());
    }

    #[test]
    fn test_elapsed_is_monotonic() {
        let tilemap = map();
        let mut unit = Unit::from_animated_sprite(knight_at(0.0, 0.0), &tilemap);
        unit.start_move_to_tile(&tilemap, Point::new(10, 0));
        let mut last = 0.0;
        for dt in [0.1, -0.5, 0.2, 0.0] {
            unit.advance_movement(dt);
            assert!(unit.movement().elapsed >= last);
            last = unit.movement().elapsed;
        }
    }

    #[test]
    fn test_non_positive_speed_moves_instantly() {
        let tilemap = map();
        let mut unit = Unit::from_animated_sprite(knight_at(0.0, 0.0), &tilemap);
        unit.set_move_speed(0.0);
        unit.start_move_to_tile(&tilemap, Point::new(1, 1));
        assert!(!unit.is_moving());
        assert_eq!(unit.position(), Vector2::new(16.0, 16.0));
    }

    #[test]
    fn test_move_by_shifts_tile_only() {
        let tilemap = map();
        let mut unit = Unit::from_animated_sprite(knight_at(16.0, 16.0), &tilemap);
        unit.move_by(2, -1);
        assert_eq!(unit.tile_position(), Point::new(3, 0));
        assert_eq!(unit.position(), Vector2::new(16.0, 16.0));
    }

    #[test]
    fn test_draw_advances_animation_and_movement() {
        let tilemap = map();
        let mut unit = Unit::from_animated_sprite(knight_at(0.0, 0.0), &tilemap);
        unit.start_move_to_tile(&tilemap, Point::new(1, 0));
        let ctx = CameraContext::new();
        let mut sink = RecordingSink::default();

        unit.draw(0.08, 100, &ctx, &mut sink);

        assert_eq!(sink.calls.len(), 1);
        assert_eq!(unit.sprite().active_animation().unwrap().current_frame(), 1);
        assert!((unit.position().x - 8.0).abs() < EPSILON);
    }

    #[test]
    fn test_draw_hidden_still_advances() {
        let tilemap = map();
        let mut unit = Unit::from_animated_sprite(knight_at(0.0, 0.0), &tilemap);
        unit.sprite_mut().sprite_mut().set_visible(false);
        unit.start_move_to_tile(&tilemap, Point::new(1, 0));
        let mut sink = RecordingSink::default();

        unit.draw(1.0, 100, &CameraContext::new(), &mut sink);

        assert!(sink.calls.is_empty());
        assert_eq!(unit.position(), Vector2::new(16.0, 0.0));
        assert_eq!(unit.sprite().active_animation().unwrap().current_frame(), 1);
    }

    #[test]
    fn test_set_animated_false_freezes_frames() {
        let tilemap = map();
        let mut unit = Unit::from_animated_sprite(knight_at(0.0, 0.0), &tilemap);
        unit.set_animated(false);
        unit.draw(0.1, 1000, &CameraContext::new(), &mut RecordingSink::default());
        assert_eq!(unit.sprite().active_animation().unwrap().current_frame(), 0);
    }

    #[test]
    fn test_render_does_not_advance() {
        let tilemap = map();
        let mut unit = Unit::from_animated_sprite(knight_at(0.0, 0.0), &tilemap);
        unit.start_move_to_tile(&tilemap, Point::new(1, 0));
        let mut sink = RecordingSink::default();

        unit.render(&CameraContext::new(), &mut sink);

        assert_eq!(sink.calls.len(), 1);
        assert_eq!(unit.position(), Vector2::new(0.0, 0.0));
        assert_eq!(unit.sprite().active_animation().unwrap().current_frame(), 0);
    }

    #[test]
    fn test_unit_at_screen_position_through_camera() {
        let tilemap = map();
        let units = vec![
            Unit::from_animated_sprite(knight_at(0.0, 0.0), &tilemap),
            Unit::from_animated_sprite(knight_at(48.0, 32.0), &tilemap),
        ];
        let cam = Camera::new(48.0, 32.0, 320.0, 240.0, 0.7, 2.0);
        let ctx = CameraContext::with_camera(cam);

        // Center of tile (3, 2) on screen.
        let screen = ctx.world_to_screen(Vector2::new(56.0, 40.0));
        assert_eq!(unit_at_screen_position(&units, &tilemap, &ctx, screen), Some(1));

        let empty = ctx.world_to_screen(Vector2::new(200.0, 200.0));
        assert_eq!(unit_at_screen_position(&units, &tilemap, &ctx, empty), None);
    }

    #[test]
    fn test_unit_at_screen_position_first_match() {
        let tilemap = map();
        let units = vec![
            Unit::from_animated_sprite(knight_at(0.0, 0.0), &tilemap),
            Unit::from_animated_sprite(knight_at(4.0, 4.0), &tilemap),
        ];
        let ctx = CameraContext::new();
        assert_eq!(
            unit_at_screen_position(&units, &tilemap, &ctx, Vector2::new(8.0, 8.0)),
            Some(0)
        );
    }

    #[test]
    fn test_into_sprite_returns_ownership() {
        let tilemap = map();
        let unit = Unit::from_animated_sprite(knight_at(16.0, 0.0), &tilemap);
        let sprite = unit.into_sprite();
        assert_eq!(sprite.active_animation_name(), Some("idle"));
    }
}
