//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, applying `time_scale` to the provided delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is expected to be the unscaled frame delta in seconds. The system
/// applies the current `time_scale` and writes both `elapsed` and `delta`.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt * wt.time_scale;
    wt.elapsed += f64::from(scaled_dt);
    wt.delta = scaled_dt;
    wt.frame_count += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_world_time_scales_delta() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(0.5));

        update_world_time(&mut world, 0.1);
        update_world_time(&mut world, 0.1);

        let wt = world.resource::<WorldTime>();
        assert!((wt.delta - 0.05).abs() < 1e-6);
        assert!((wt.elapsed - 0.1).abs() < 1e-6);
        assert_eq!(wt.frame_count, 2);
    }

    #[test]
    fn test_long_run_clock_advances_per_frame() {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            elapsed: 100_000.0,
            ..WorldTime::default()
        });

        let start = world.resource::<WorldTime>().now_ms();
        for _ in 0..10 {
            update_world_time(&mut world, 0.01);
        }

        assert_eq!(world.resource::<WorldTime>().now_ms() - start, 100);
    }
}
