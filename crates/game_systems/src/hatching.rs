//! Egg incubation.

use engine_ecs::{QueryDescriptor, System, SystemContext, World};
use engine_math::{Transform3D, Vec3};
use game_components::Hatchable;
use tracing::info;

use crate::events::Hatched;
use crate::scene::spawn_creature;

/// Counts eggs down and replaces each expired egg with a creature.
#[derive(Debug)]
pub struct HatchingSystem {
    query: QueryDescriptor,
}

impl HatchingSystem {
    #[must_use]
    pub fn new() -> Self {
        Self {
            query: QueryDescriptor::new().with::<Hatchable>(),
        }
    }
}

impl Default for HatchingSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for HatchingSystem {
    fn name(&self) -> &'static str {
        "hatching"
    }

    fn update(&mut self, world: &mut World, ctx: &SystemContext) {
        for egg in world.query(&self.query) {
            let Some(hatchable) = world.get_component_mut::<Hatchable>(egg) else {
                continue;
            };
            if !hatchable.is_hatching {
                continue;
            }
            hatchable.remaining_time -= ctx.dt;
            if hatchable.remaining_time > 0.0 {
                continue;
            }
            let dna = hatchable.parent_dna;

            let position = world
                .get_component::<Transform3D>(egg)
                .map_or(Vec3::ZERO, |t| t.position);
            world.destroy_entity(egg);
            let creature = spawn_creature(world, position, dna);
            info!(%egg, %creature, "egg hatched");
            world.emit(Hatched { egg, creature });
        }
    }
}
