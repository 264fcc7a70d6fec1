use bevy_ecs::prelude::Resource;

/// Simulation clock, in seconds.
///
/// `elapsed` accumulates in `f64` so the millisecond clock stays exact over
/// long sessions. `delta` drives movement interpolation; [`now_ms`](WorldTime::now_ms) is
/// the millisecond clock that sprite animations compare frame durations to.
#[derive(Resource, Debug, Clone, Copy)]
pub struct WorldTime {
    pub elapsed: f64,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Elapsed simulation time in whole milliseconds.
    pub fn now_ms(&self) -> u64 {
        (self.elapsed * 1000.0).round() as u64
    }
}
