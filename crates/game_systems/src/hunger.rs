//! Hunger decay and starvation.

use engine_ecs::{Entity, QueryDescriptor, System, SystemContext, World};
use game_components::Hunger;
use tracing::info;

use crate::events::Starved;

/// Restore `amount` of hunger to `entity`, capped at its maximum, and stamp
/// the meal with the simulation clock.
///
/// Returns `false` if the entity has no [`Hunger`].
pub fn feed(world: &mut World, entity: Entity, amount: f32) -> bool {
    let now = world.elapsed();
    match world.get_component_mut::<Hunger>(entity) {
        Some(hunger) => {
            hunger.feed(amount, now);
            true
        }
        None => false,
    }
}

/// Drains every hunger meter and removes entities that starve.
#[derive(Debug)]
pub struct HungerSystem {
    query: QueryDescriptor,
}

impl HungerSystem {
    #[must_use]
    pub fn new() -> Self {
        Self {
            query: QueryDescriptor::new().with::<Hunger>(),
        }
    }
}

impl Default for HungerSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for HungerSystem {
    fn name(&self) -> &'static str {
        "hunger"
    }

    fn update(&mut self, world: &mut World, ctx: &SystemContext) {
        for entity in world.query(&self.query) {
            let Some(hunger) = world.get_component_mut::<Hunger>(entity) else {
                continue;
            };
            hunger.deplete(ctx.dt);
            if hunger.is_starved() {
                world.destroy_entity(entity);
                info!(%entity, "starved");
                world.emit(Starved { entity });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starves_after_exact_duration() {
        let mut world = World::new();
        let e = world.spawn().with(Hunger::full(10.0, 2.0)).id();
        let mut system = HungerSystem::new();

        for tick in 1..=4 {
            system.update(&mut world, &SystemContext::new(tick, 1.0, tick as f64));
        }
        assert!(world.is_alive(e));
        assert_eq!(world.get_component::<Hunger>(e).unwrap().current, 2.0);

        system.update(&mut world, &SystemContext::new(5, 1.0, 5.0));
        assert!(!world.is_alive(e));
        assert!(world.get_component::<Hunger>(e).is_none());
        assert_eq!(world.drain_events::<Starved>(), vec![Starved { entity: e }]);
    }

    #[test]
    fn test_overshoot_clamps_to_zero() {
        let mut world = World::new();
        let e = world.spawn().with(Hunger::full(10.0, 1.0)).id();
        world.get_component_mut::<Hunger>(e).unwrap().current = 0.5;
        HungerSystem::new().update(&mut world, &SystemContext::new(1, 3.0, 3.0));
        assert!(!world.is_alive(e));
    }

    #[test]
    fn test_feed_uses_simulation_clock() {
        let mut world = World::new();
        let e = world.spawn().with(Hunger::full(100.0, 1.0)).id();
        world.get_component_mut::<Hunger>(e).unwrap().current = 20.0;
        world.update(2.5);

        assert!(feed(&mut world, e, 30.0));
        let hunger = world.get_component::<Hunger>(e).unwrap();
        assert_eq!(hunger.current, 50.0);
        assert_eq!(hunger.last_fed, 2.5);

        let rock = world.create_entity();
        assert!(!feed(&mut world, rock, 30.0));
    }
}
