//! Periodic resource spawning (fruit trees and the like).

use engine_ecs::{QueryDescriptor, System, SystemContext, World};
use engine_math::{Transform3D, Vec3};
use game_components::Production;
use rand::Rng;
use tracing::debug;

use crate::config::ProductionConfig;
use crate::rng::SimRng;
use crate::scene::spawn_resource;

/// Spawns one resource per producer each time its interval elapses.
///
/// Missed cycles are not made up: a producer yields at most one resource per
/// tick no matter how large `dt` is.
#[derive(Debug)]
pub struct ProductionSystem {
    config: ProductionConfig,
    rng: SimRng,
    query: QueryDescriptor,
}

impl ProductionSystem {
    #[must_use]
    pub fn new(config: ProductionConfig, rng: SimRng) -> Self {
        Self {
            config,
            rng,
            query: QueryDescriptor::new()
                .with::<Production>()
                .with::<Transform3D>(),
        }
    }

    fn jitter(&mut self) -> Vec3 {
        let reach = self.config.spawn_jitter;
        if reach <= 0.0 {
            return Vec3::ZERO;
        }
        Vec3::new(
            self.rng.random_range(-reach..=reach),
            0.0,
            self.rng.random_range(-reach..=reach),
        )
    }
}

impl System for ProductionSystem {
    fn name(&self) -> &'static str {
        "production"
    }

    fn update(&mut self, world: &mut World, ctx: &SystemContext) {
        for producer in world.query(&self.query) {
            let (Some(production), Some(transform)) = (
                world.get_component::<Production>(producer).copied(),
                world.get_component::<Transform3D>(producer).copied(),
            ) else {
                continue;
            };
            if !production.is_due(ctx.elapsed) {
                continue;
            }

            let position = transform.position + self.jitter();
            let resource = spawn_resource(
                world,
                production.produces,
                production.amount_per_cycle,
                position,
            );
            if let Some(slot) = world.get_component_mut::<Production>(producer) {
                slot.last_production_time = ctx.elapsed;
            }
            debug!(%producer, %resource, kind = ?production.produces, "produced");
        }
    }
}

#[cfg(test)]
mod tests {
    use engine_ecs::Entity;
    use game_components::{ItemKind, Resource};

    use super::*;
    use crate::rng::seeded;

    fn producer(world: &mut World, interval: f64) -> Entity {
        world
            .spawn()
            .with(Transform3D::from_position(Vec3::new(10.0, 0.0, 10.0)))
            .with(Production::new(ItemKind::Fruit, interval))
            .id()
    }

    fn resources(world: &World) -> Vec<Entity> {
        world.query(&QueryDescriptor::new().with::<Resource>())
    }

    #[test]
    fn test_produces_once_per_interval() {
        let mut world = World::new();
        let tree = producer(&mut world, 2.0);
        let mut production = ProductionSystem::new(ProductionConfig::default(), seeded(5, 0));

        production.update(&mut world, &SystemContext::new(1, 1.0, 1.0));
        assert!(resources(&world).is_empty());
        production.update(&mut world, &SystemContext::new(2, 1.0, 2.0));
        assert_eq!(resources(&world).len(), 1);
        assert_eq!(
            world.get_component::<Production>(tree).unwrap().last_production_time,
            2.0
        );
        production.update(&mut world, &SystemContext::new(3, 1.0, 3.0));
        assert_eq!(resources(&world).len(), 1);
    }

    #[test]
    fn test_large_step_does_not_catch_up() {
        let mut world = World::new();
        producer(&mut world, 1.0);
        let mut production = ProductionSystem::new(ProductionConfig::default(), seeded(5, 0));
        production.update(&mut world, &SystemContext::new(1, 10.0, 10.0));
        assert_eq!(resources(&world).len(), 1);
    }

    #[test]
    fn test_spawn_stays_within_jitter() {
        let mut world = World::new();
        producer(&mut world, 1.0);
        let mut production = ProductionSystem::new(ProductionConfig::default(), seeded(5, 0));
        for tick in 1..=5u32 {
            production.update(&mut world, &SystemContext::new(u64::from(tick), 1.0, f64::from(tick)));
        }
        let spawned = resources(&world);
        assert_eq!(spawned.len(), 5);
        for e in spawned {
            let p = world.get_component::<Transform3D>(e).unwrap().position;
            assert!((p.x - 10.0).abs() <= 1.5);
            assert!((p.z - 10.0).abs() <= 1.5);
            assert_eq!(p.y, 0.0);
            let r = world.get_component::<Resource>(e).unwrap();
            assert_eq!((r.kind, r.amount), (ItemKind::Fruit, 1));
        }
    }

    #[test]
    fn test_inactive_producer_is_skipped() {
        let mut world = World::new();
        let tree = producer(&mut world, 1.0);
        world.get_component_mut::<Production>(tree).unwrap().is_active = false;
        ProductionSystem::new(ProductionConfig::default(), seeded(5, 0))
            .update(&mut world, &SystemContext::new(1, 5.0, 5.0));
        assert!(resources(&world).is_empty());
    }
}
