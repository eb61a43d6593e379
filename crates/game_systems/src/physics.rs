//! Gravity, ground contact and jumping.

use std::collections::HashSet;
use std::sync::Arc;

use engine_ecs::{Entity, QueryDescriptor, System, SystemContext, World};
use engine_math::Transform3D;
use game_components::{PlayerInput, Rigidbody};
use tracing::trace;

use crate::config::PhysicsConfig;
use crate::terrain::Terrain;

/// Pulls bodies down and rests them on island floors.
///
/// Gravity is a fixed per-tick velocity change and vertical velocity is
/// applied once per tick here, independent of `dt`. The movement system
/// integrates vertical velocity a second time, scaled by `dt`.
#[derive(Debug)]
pub struct PhysicsSystem {
    terrain: Arc<Terrain>,
    config: PhysicsConfig,
    query: QueryDescriptor,
    grounded: HashSet<Entity>,
}

impl PhysicsSystem {
    #[must_use]
    pub fn new(terrain: Arc<Terrain>, config: PhysicsConfig) -> Self {
        Self {
            terrain,
            config,
            query: QueryDescriptor::new()
                .with::<Transform3D>()
                .with::<Rigidbody>(),
            grounded: HashSet::new(),
        }
    }

    /// Whether `entity` touched ground on the last tick.
    #[must_use]
    pub fn is_grounded(&self, entity: Entity) -> bool {
        self.grounded.contains(&entity)
    }
}

impl System for PhysicsSystem {
    fn name(&self) -> &'static str {
        "physics"
    }

    fn update(&mut self, world: &mut World, _ctx: &SystemContext) {
        self.grounded.clear();

        for entity in world.query(&self.query) {
            let (Some(mut transform), Some(mut body)) = (
                world.get_component::<Transform3D>(entity).copied(),
                world.get_component::<Rigidbody>(entity).copied(),
            ) else {
                continue;
            };
            if body.is_kinematic {
                continue;
            }

            if body.use_gravity {
                body.velocity.y -= self.config.gravity;
                transform.position.y += body.velocity.y;
            }

            // Overlapping islands: the last one listed owns the floor.
            let mut grounded = false;
            if let Some(island) = self.terrain.island_at(transform.position) {
                let rest = island.floor_y + self.config.ground_offset;
                if transform.position.y < rest {
                    transform.position.y = rest;
                    body.velocity.y = 0.0;
                    grounded = true;
                }
            }

            if grounded {
                self.grounded.insert(entity);
                let jumping = world
                    .get_component::<PlayerInput>(entity)
                    .is_some_and(|input| input.jump);
                if jumping {
                    body.velocity.y = self.config.jump_impulse;
                    trace!(%entity, "jump");
                }
            }

            if let Some(slot) = world.get_component_mut::<Transform3D>(entity) {
                *slot = transform;
            }
            if let Some(slot) = world.get_component_mut::<Rigidbody>(entity) {
                *slot = body;
            }
        }
    }
}
