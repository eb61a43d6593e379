//! Chopping trees and mining rocks.
//!
//! One [`HarvestSystem`] runs per node family. Each tick it first removes
//! nodes that were depleted on an earlier tick, then lets attacking players
//! swing at the nearest node in reach.

use std::marker::PhantomData;

use engine_ecs::{Entity, QueryDescriptor, System, SystemContext, World};
use engine_math::{Transform3D, Vec3};
use game_components::{Choppable, HarvestNode, Minable, PlayerInput, Tool};
use tracing::{debug, info, trace};

use crate::config::HarvestConfig;
use crate::events::{ResourceDropped, ResourceHit};

/// Harvest system for trees.
pub type ChopSystem = HarvestSystem<Choppable>;
/// Harvest system for rocks and ore.
pub type MineSystem = HarvestSystem<Minable>;

/// Swing handling and depletion for one node family `N`.
///
/// The swing cooldown is global to the system: any swing, hit or miss,
/// restarts it for every attacker.
#[derive(Debug)]
pub struct HarvestSystem<N: HarvestNode> {
    config: HarvestConfig,
    last_swing: Option<f64>,
    nodes: QueryDescriptor,
    attackers: QueryDescriptor,
    _node: PhantomData<fn() -> N>,
}

impl<N: HarvestNode> HarvestSystem<N> {
    #[must_use]
    pub fn new(config: HarvestConfig) -> Self {
        Self {
            config,
            last_swing: None,
            nodes: QueryDescriptor::new().with::<N>(),
            attackers: QueryDescriptor::new()
                .with::<PlayerInput>()
                .with::<Transform3D>(),
            _node: PhantomData,
        }
    }

    fn ready(&self, now: f64) -> bool {
        self.last_swing
            .is_none_or(|last| now - last >= f64::from(self.config.cooldown))
    }

    fn remove_depleted(&self, world: &mut World) {
        for node in world.query(&self.nodes) {
            let Some(harvest) = world.get_component::<N>(node).map(|n| *n.node()) else {
                continue;
            };
            if !harvest.is_depleted() {
                continue;
            }
            let position = world
                .get_component::<Transform3D>(node)
                .map_or(Vec3::ZERO, |t| t.position);
            world.destroy_entity(node);
            info!(
                action = N::ACTION,
                %node,
                resource = ?harvest.resource_type,
                count = harvest.drop_count,
                "node depleted"
            );
            world.emit(ResourceDropped {
                source: node,
                resource: harvest.resource_type,
                count: harvest.drop_count,
                position,
            });
        }
    }

    /// Nearest node within reach of `origin`. Ties go to the first found.
    fn nearest_node(&self, world: &World, origin: Vec3) -> Option<Entity> {
        let mut best: Option<(Entity, f32)> = None;
        for node in world.query(&self.nodes) {
            let Some(transform) = world.get_component::<Transform3D>(node) else {
                continue;
            };
            let distance = transform.position.distance(origin);
            if distance > self.config.strike_radius {
                continue;
            }
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((node, distance));
            }
        }
        best.map(|(node, _)| node)
    }

    fn swing(&self, world: &mut World, attacker: Entity, origin: Vec3) {
        let Some(node) = self.nearest_node(world, origin) else {
            trace!(action = N::ACTION, %attacker, "swing missed");
            return;
        };
        let tool = world.get_component::<Tool>(attacker).copied();
        let Some(harvest) = world.get_component_mut::<N>(node).map(N::node_mut) else {
            return;
        };
        if let Some(required) = harvest.required_tool {
            if tool.is_none_or(|t| t.kind != required) {
                debug!(action = N::ACTION, %attacker, %node, ?required, "wrong tool");
                return;
            }
        }
        let damage = tool.map_or(1, |t| t.damage);
        harvest.hit(damage);
        let event = ResourceHit {
            node,
            attacker,
            damage,
            current_hits: harvest.current_hits,
            max_hits: harvest.max_hits,
        };
        debug!(
            action = N::ACTION,
            %attacker,
            %node,
            hits = event.current_hits,
            max = event.max_hits,
            "hit"
        );
        world.emit(event);
    }
}

impl<N: HarvestNode> System for HarvestSystem<N> {
    fn name(&self) -> &'static str {
        N::ACTION
    }

    fn update(&mut self, world: &mut World, ctx: &SystemContext) {
        self.remove_depleted(world);

        for attacker in world.query(&self.attackers) {
            let attacking = world
                .get_component::<PlayerInput>(attacker)
                .is_some_and(|input| input.attack);
            if !attacking || !self.ready(ctx.elapsed) {
                continue;
            }
            let Some(origin) = world
                .get_component::<Transform3D>(attacker)
                .map(|t| t.position)
            else {
                continue;
            };
            self.last_swing = Some(ctx.elapsed);
            self.swing(world, attacker, origin);
        }
    }
}

#[cfg(test)]
mod tests {
    use game_components::{ItemKind, ToolKind};

    use super::*;

    fn player(world: &mut World, attack: bool) -> Entity {
        world
            .spawn()
            .with(Transform3D::default())
            .with(PlayerInput {
                attack,
                ..PlayerInput::default()
            })
            .id()
    }

    fn tree(world: &mut World, x: f32) -> Entity {
        world
            .spawn()
            .with(Transform3D::from_position(Vec3::new(x, 0.0, 0.0)))
            .with(Choppable::new(ItemKind::Wood, 3))
            .id()
    }

    fn hits<N: HarvestNode>(world: &World, node: Entity) -> u32 {
        world.get_component::<N>(node).unwrap().node().current_hits
    }

    #[test]
    fn test_hits_nearest_tree_only() {
        let mut world = World::new();
        player(&mut world, true);
        let far = tree(&mut world, 2.5);
        let near = tree(&mut world, 1.0);
        let mut chop = ChopSystem::new(HarvestConfig::default());

        chop.update(&mut world, &SystemContext::new(1, 1.0, 1.0));
        assert_eq!(hits::<Choppable>(&world, near), 1);
        assert_eq!(hits::<Choppable>(&world, far), 0);
        assert_eq!(world.drain_events::<ResourceHit>().len(), 1);
    }

    #[test]
    fn test_equidistant_trees_first_activated_is_hit() {
        let mut world = World::new();
        player(&mut world, true);
        let first = tree(&mut world, 1.0);
        let second = tree(&mut world, -1.0);
        let mut chop = ChopSystem::new(HarvestConfig::default());

        chop.update(&mut world, &SystemContext::new(1, 1.0, 1.0));
        assert_eq!(hits::<Choppable>(&world, first), 1);
        assert_eq!(hits::<Choppable>(&world, second), 0);
    }

    #[test]
    fn test_cooldown_blocks_second_swing() {
        let mut world = World::new();
        player(&mut world, true);
        let t = tree(&mut world, 1.0);
        let mut chop = ChopSystem::new(HarvestConfig::default());

        chop.update(&mut world, &SystemContext::new(1, 0.2, 0.2));
        chop.update(&mut world, &SystemContext::new(2, 0.2, 0.4));
        assert_eq!(hits::<Choppable>(&world, t), 1);
        chop.update(&mut world, &SystemContext::new(3, 0.4, 0.8));
        assert_eq!(hits::<Choppable>(&world, t), 2);
    }

    #[test]
    fn test_miss_still_consumes_swing() {
        let mut world = World::new();
        player(&mut world, true);
        let mut chop = ChopSystem::new(HarvestConfig::default());
        chop.update(&mut world, &SystemContext::new(1, 0.1, 0.1));

        let t = tree(&mut world, 1.0);
        chop.update(&mut world, &SystemContext::new(2, 0.1, 0.2));
        assert_eq!(hits::<Choppable>(&world, t), 0);
    }

    #[test]
    fn test_out_of_reach_is_not_hit() {
        let mut world = World::new();
        player(&mut world, true);
        let t = tree(&mut world, 3.5);
        ChopSystem::new(HarvestConfig::default())
            .update(&mut world, &SystemContext::new(1, 1.0, 1.0));
        assert_eq!(hits::<Choppable>(&world, t), 0);
    }

    #[test]
    fn test_depleted_tree_removed_next_tick() {
        let mut world = World::new();
        player(&mut world, true);
        let t = tree(&mut world, 1.0);
        let mut chop = ChopSystem::new(HarvestConfig::default());

        for tick in 1..=3 {
            chop.update(&mut world, &SystemContext::new(tick, 1.0, tick as f64));
        }
        assert!(world.is_alive(t));
        assert_eq!(hits::<Choppable>(&world, t), 3);

        chop.update(&mut world, &SystemContext::new(4, 1.0, 4.0));
        assert!(!world.is_alive(t));
        let dropped = world.drain_events::<ResourceDropped>();
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].source, t);
        assert_eq!(dropped[0].resource, ItemKind::Wood);
        assert_eq!(dropped[0].position, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_tool_damage_replaces_bare_hand() {
        let mut world = World::new();
        let p = player(&mut world, true);
        world.add_component(p, Tool::new(ToolKind::Axe, 2)).unwrap();
        let t = tree(&mut world, 1.0);
        ChopSystem::new(HarvestConfig::default())
            .update(&mut world, &SystemContext::new(1, 1.0, 1.0));
        assert_eq!(hits::<Choppable>(&world, t), 2);
    }

    #[test]
    fn test_mining_requires_matching_tool() {
        let mut world = World::new();
        let p = player(&mut world, true);
        let rock = world
            .spawn()
            .with(Transform3D::from_position(Vec3::new(1.0, 0.0, 0.0)))
            .with(Minable::new(ItemKind::Stone, 3))
            .id();
        let mut mine = MineSystem::new(HarvestConfig::default());

        mine.update(&mut world, &SystemContext::new(1, 1.0, 1.0));
        assert_eq!(hits::<Minable>(&world, rock), 0);

        world.add_component(p, Tool::new(ToolKind::Axe, 1)).unwrap();
        mine.update(&mut world, &SystemContext::new(2, 1.0, 2.0));
        assert_eq!(hits::<Minable>(&world, rock), 0);

        world.add_component(p, Tool::new(ToolKind::Pickaxe, 1)).unwrap();
        mine.update(&mut world, &SystemContext::new(3, 1.0, 3.0));
        assert_eq!(hits::<Minable>(&world, rock), 1);
    }

    #[test]
    fn test_idle_player_does_nothing() {
        let mut world = World::new();
        player(&mut world, false);
        let t = tree(&mut world, 1.0);
        ChopSystem::new(HarvestConfig::default())
            .update(&mut world, &SystemContext::new(1, 1.0, 1.0));
        assert_eq!(hits::<Choppable>(&world, t), 0);
        assert!(world.pending_events::<ResourceHit>().is_empty());
    }
}
