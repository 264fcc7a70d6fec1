//! Unit glide system.
//!
//! [`unit_movement_system`] advances every in-progress [`Unit`] move by the
//! scaled frame delta in [`WorldTime`].

use bevy_ecs::prelude::*;

use crate::components::unit::Unit;
use crate::resources::worldtime::WorldTime;

pub fn unit_movement_system(time: Res<WorldTime>, mut query: Query<&mut Unit>) {
    let dt = time.delta.max(0.0);
    for mut unit in query.iter_mut() {
        if unit.is_moving() {
            unit.advance_movement(dt);
        }
    }
}
