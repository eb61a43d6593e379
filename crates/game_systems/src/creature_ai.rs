//! Creature behaviour: idle, wander inside a home area, seek food when hungry.

use std::f32::consts::TAU;

use engine_ecs::{Entity, QueryDescriptor, System, SystemContext, World};
use engine_math::{Transform3D, Vec3};
use game_components::{AgentKind, AiAgent, AiState, Hunger, Resource, Rigidbody};
use rand::Rng;
use tracing::{debug, trace};

use crate::config::AiConfig;
use crate::hunger;
use crate::rng::SimRng;

fn planar(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Unit vector from `from` toward `to` on the ground plane, or zero.
fn planar_direction(from: Vec3, to: Vec3) -> Vec3 {
    planar(to - from).normalize_or_zero()
}

/// State machine for [`AgentKind::Creature`] agents.
///
/// Creatures own their horizontal motion: velocity is chosen here and
/// integrated into the transform at the end of each tick.
#[derive(Debug)]
pub struct CreatureAiSystem {
    config: AiConfig,
    rng: SimRng,
    agents: QueryDescriptor,
    food: QueryDescriptor,
}

impl CreatureAiSystem {
    #[must_use]
    pub fn new(config: AiConfig, rng: SimRng) -> Self {
        Self {
            config,
            rng,
            agents: QueryDescriptor::new()
                .with::<AiAgent>()
                .with::<Transform3D>()
                .with::<Rigidbody>(),
            food: QueryDescriptor::new()
                .with::<Resource>()
                .with::<Transform3D>(),
        }
    }

    /// Closest edible resource to `origin`. Ties go to the first found.
    fn nearest_food(&self, world: &World, origin: Vec3) -> Option<Entity> {
        let mut best: Option<(Entity, f32)> = None;
        for food in world.query(&self.food) {
            let (Some(resource), Some(transform)) = (
                world.get_component::<Resource>(food),
                world.get_component::<Transform3D>(food),
            ) else {
                continue;
            };
            if !resource.kind.is_edible() {
                continue;
            }
            let distance = planar(transform.position - origin).length();
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((food, distance));
            }
        }
        best.map(|(food, _)| food)
    }

    fn wander(&mut self, agent: &mut AiAgent, position: Vec3, velocity: &mut Vec3) {
        let from_home = planar(position - agent.bound_center);
        if from_home.length() > agent.bound_radius {
            *velocity = planar_direction(position, agent.bound_center) * agent.move_speed;
            return;
        }
        if planar(*velocity) == Vec3::ZERO || self.rng.random_bool(self.config.redirect_chance) {
            let angle = self.rng.random::<f32>() * TAU;
            *velocity = Vec3::new(angle.cos(), 0.0, angle.sin()) * agent.move_speed;
        }
        if self.rng.random_bool(self.config.idle_chance) {
            agent.state = AiState::Idle;
            *velocity = Vec3::ZERO;
        }
    }

    fn chase_food(
        &self,
        world: &mut World,
        entity: Entity,
        agent: &mut AiAgent,
        position: Vec3,
        velocity: &mut Vec3,
    ) {
        let target = agent
            .target
            .filter(|&food| world.is_alive(food))
            .and_then(|food| {
                world
                    .get_component::<Transform3D>(food)
                    .map(|t| (food, t.position))
            });
        let Some((food, food_position)) = target else {
            trace!(%entity, "food gone");
            agent.reset();
            *velocity = Vec3::ZERO;
            return;
        };

        if planar(food_position - position).length() <= self.config.eat_distance {
            hunger::feed(world, entity, self.config.food_value);
            world.destroy_entity(food);
            debug!(%entity, %food, "ate");
            agent.reset();
            *velocity = Vec3::ZERO;
        } else {
            *velocity = planar_direction(position, food_position)
                * agent.move_speed
                * self.config.chase_multiplier;
        }
    }
}

impl System for CreatureAiSystem {
    fn name(&self) -> &'static str {
        "creature_ai"
    }

    fn update(&mut self, world: &mut World, ctx: &SystemContext) {
        for entity in world.query(&self.agents) {
            let (Some(mut agent), Some(transform), Some(body)) = (
                world.get_component::<AiAgent>(entity).copied(),
                world.get_component::<Transform3D>(entity).copied(),
                world.get_component::<Rigidbody>(entity).copied(),
            ) else {
                continue;
            };
            if agent.kind != AgentKind::Creature {
                continue;
            }
            let position = transform.position;
            let mut velocity = body.velocity;

            let hungry = world
                .get_component::<Hunger>(entity)
                .is_some_and(|h| h.is_hungry(self.config.hunger_threshold));
            if hungry && agent.state != AiState::ChasingFood {
                agent.state = AiState::ChasingFood;
                agent.target = self.nearest_food(world, position);
                debug!(%entity, target = ?agent.target, "hungry");
            }

            match agent.state {
                AiState::Idle => {
                    if self.rng.random_bool(self.config.wander_chance) {
                        agent.state = AiState::Wandering;
                    }
                }
                AiState::Wandering => self.wander(&mut agent, position, &mut velocity),
                AiState::ChasingFood => {
                    self.chase_food(world, entity, &mut agent, position, &mut velocity);
                }
                AiState::Chasing => agent.reset(),
            }

            if !world.is_alive(entity) {
                continue;
            }
            if let Some(slot) = world.get_component_mut::<AiAgent>(entity) {
                *slot = agent;
            }
            if let Some(slot) = world.get_component_mut::<Rigidbody>(entity) {
                slot.velocity.x = velocity.x;
                slot.velocity.z = velocity.z;
            }
            if let Some(slot) = world.get_component_mut::<Transform3D>(entity) {
                slot.position.x += velocity.x * ctx.dt;
                slot.position.z += velocity.z * ctx.dt;
            }
        }
    }
}
