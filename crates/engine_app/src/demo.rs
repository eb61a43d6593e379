//! Scripted input for the headless demo, plus an event tally.

use engine_ecs::{Entity, QueryDescriptor, World};
use engine_math::{Transform3D, Vec3, planar_distance};
use game_components::{Choppable, PlayerInput};
use game_systems::events::{
    CollisionStarted, GolemStrike, Hatched, ItemPickedUp, ResourceDropped, ResourceHit, Starved,
};
use tracing::info;

/// Distance at which the autopilot stops walking and starts swinging.
const SWING_RANGE: f32 = 2.5;
/// Axis dead zone so the autopilot does not jitter around its target.
const DEAD_ZONE: f32 = 0.5;

/// Walks `player` to the nearest tree and chops it, one tree after another.
///
/// Writes the player's [`PlayerInput`] like a keyboard would.
pub fn autopilot(world: &mut World, player: Entity) {
    let Some(origin) = world
        .get_component::<Transform3D>(player)
        .map(|t| t.position)
    else {
        return;
    };
    let target = nearest_tree(world, origin);
    let Some(input) = world.get_component_mut::<PlayerInput>(player) else {
        return;
    };
    *input = PlayerInput::default();
    let Some(target) = target else {
        return;
    };

    let delta = target - origin;
    if planar_distance(origin, target) <= SWING_RANGE {
        input.attack = true;
        return;
    }
    input.right = delta.x > DEAD_ZONE;
    input.left = delta.x < -DEAD_ZONE;
    input.backward = delta.z > DEAD_ZONE;
    input.forward = delta.z < -DEAD_ZONE;
}

fn nearest_tree(world: &World, origin: Vec3) -> Option<Vec3> {
    let query = QueryDescriptor::new()
        .with::<Choppable>()
        .with::<Transform3D>();
    world
        .query(&query)
        .into_iter()
        .filter_map(|tree| world.get_component::<Transform3D>(tree).map(|t| t.position))
        .min_by(|a, b| {
            planar_distance(origin, *a).total_cmp(&planar_distance(origin, *b))
        })
}

/// Running count of every gameplay event seen.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventTally {
    pub hits: usize,
    pub drops: usize,
    pub pickups: usize,
    pub hatched: usize,
    pub starved: usize,
    pub strikes: usize,
    pub collisions: usize,
}

impl EventTally {
    /// Drain every event queue into the tally, logging the notable ones.
    pub fn collect(&mut self, world: &mut World) {
        self.hits += world.drain_events::<ResourceHit>().len();
        self.collisions += world.drain_events::<CollisionStarted>().len();
        self.strikes += world.drain_events::<GolemStrike>().len();

        for drop in world.drain_events::<ResourceDropped>() {
            info!(resource = ?drop.resource, count = drop.count, "resource dropped");
            self.drops += 1;
        }
        for pickup in world.drain_events::<ItemPickedUp>() {
            info!(kind = ?pickup.kind, count = pickup.count, "item picked up");
            self.pickups += 1;
        }
        for hatch in world.drain_events::<Hatched>() {
            info!(creature = %hatch.creature, "creature hatched");
            self.hatched += 1;
        }
        for starved in world.drain_events::<Starved>() {
            info!(entity = %starved.entity, "creature starved");
            self.starved += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use game_systems::{GameplayConfig, Terrain, populate, register_default_systems};

    use super::*;

    #[test]
    fn test_autopilot_walks_toward_tree() {
        let mut world = World::new();
        let player = world
            .spawn()
            .with(Transform3D::default())
            .with(PlayerInput::default())
            .id();
        let _tree = world
            .spawn()
            .with(Transform3D::from_position(Vec3::new(5.0, 0.0, -5.0)))
            .with(Choppable::default())
            .id();

        autopilot(&mut world, player);
        let input = world.get_component::<PlayerInput>(player).unwrap();
        assert!(input.right && input.forward);
        assert!(!input.left && !input.backward && !input.attack);
    }

    #[test]
    fn test_autopilot_swings_in_range() {
        let mut world = World::new();
        let player = world
            .spawn()
            .with(Transform3D::default())
            .with(PlayerInput::default())
            .id();
        let _tree = world
            .spawn()
            .with(Transform3D::from_position(Vec3::new(1.0, 0.0, 1.0)))
            .with(Choppable::default())
            .id();

        autopilot(&mut world, player);
        assert!(world.get_component::<PlayerInput>(player).unwrap().attack);
    }

    #[test]
    fn test_demo_scene_fells_trees() {
        let mut world = World::new();
        let terrain = Arc::new(Terrain::archipelago());
        register_default_systems(&mut world, &terrain, &GameplayConfig::default());
        let player = populate(&mut world, &terrain).unwrap();

        let mut tally = EventTally::default();
        for _ in 0..1200 {
            autopilot(&mut world, player);
            world.update(1.0 / 60.0);
            tally.collect(&mut world);
        }
        assert!(tally.hits >= 3);
        assert!(tally.drops >= 1);
        assert_eq!(tally.hatched, 1);
    }
}
