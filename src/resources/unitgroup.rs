//! Ordered roster of unit entities on the active map.
//!
//! Units live in the ECS world as [`Unit`] components. The group keeps their
//! entity ids in spawn order, which is draw order and also hit-test priority:
//! when two units share a tile, [`UnitGroup::find_at_screen_position`] returns
//! the earlier one.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::unit::{unit_at_screen_position, Unit};
use crate::resources::camera2d::CameraContext;
use crate::resources::tilemap::Tilemap;
use crate::systems::render::DrawSink;

#[derive(Resource, Debug, Default)]
pub struct UnitGroup {
    pub entities: Vec<Entity>,
}

impl UnitGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity and return its position in the group.
    pub fn add(&mut self, entity: Entity) -> usize {
        self.entities.push(entity);
        self.entities.len() - 1
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Entity> {
        self.entities.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter().copied()
    }

    /// Units still alive in `world`, in group order.
    pub fn units<'w>(&self, world: &'w World) -> Vec<(Entity, &'w Unit)> {
        self.entities
            .iter()
            .filter_map(|&e| world.get::<Unit>(e).map(|u| (e, u)))
            .collect()
    }

    /// Emit one draw call per visible unit, in group order.
    pub fn draw(&self, world: &World, ctx: &CameraContext, sink: &mut dyn DrawSink) {
        for (_, unit) in self.units(world) {
            unit.render(ctx, sink);
        }
    }

    pub fn find_at_screen_position(
        &self,
        world: &World,
        tilemap: &Tilemap,
        ctx: &CameraContext,
        screen: Vector2,
    ) -> Option<Entity> {
        let units = self.units(world);
        unit_at_screen_position(units.iter().map(|(_, u)| *u), tilemap, ctx, screen)
            .map(|i| units[i].0)
    }
}

/// Spawn `unit` as an entity and append it to the world's [`UnitGroup`].
pub fn spawn_unit(world: &mut World, unit: Unit) -> Entity {
    let entity = world.spawn(unit).id();
    world.init_resource::<UnitGroup>();
    world.resource_mut::<UnitGroup>().add(entity);
    entity
}
