//! Unit animation system.
//!
//! [`unit_animation_system`] steps every [`Unit`]'s active clip against the
//! millisecond clock from [`WorldTime`]. Units with animation switched off
//! keep their current frame.

use bevy_ecs::prelude::*;

use crate::components::unit::Unit;
use crate::resources::worldtime::WorldTime;

pub fn unit_animation_system(time: Res<WorldTime>, mut query: Query<&mut Unit>) {
    let now_ms = time.now_ms();
    for mut unit in query.iter_mut() {
        unit.update_animation(now_ms);
    }
}
