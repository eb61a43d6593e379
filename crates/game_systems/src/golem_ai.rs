//! Golems chase nearby players and strike when close.

use std::collections::HashMap;

use engine_ecs::{Entity, QueryDescriptor, System, SystemContext, World};
use engine_math::{Transform3D, Vec3, planar_distance};
use game_components::{AgentKind, AiAgent, AiState, PlayerInput, Rigidbody};
use tracing::{debug, info};

use crate::config::GolemConfig;
use crate::events::GolemStrike;

/// State machine for [`AgentKind::Golem`] agents.
#[derive(Debug)]
pub struct GolemAiSystem {
    config: GolemConfig,
    agents: QueryDescriptor,
    players: QueryDescriptor,
    last_strike: HashMap<Entity, f64>,
}

impl GolemAiSystem {
    #[must_use]
    pub fn new(config: GolemConfig) -> Self {
        Self {
            config,
            agents: QueryDescriptor::new()
                .with::<AiAgent>()
                .with::<Transform3D>()
                .with::<Rigidbody>(),
            players: QueryDescriptor::new()
                .with::<PlayerInput>()
                .with::<Transform3D>(),
            last_strike: HashMap::new(),
        }
    }

    fn nearest_player(&self, world: &World, origin: Vec3, range: f32) -> Option<(Entity, Vec3)> {
        let mut best: Option<(Entity, Vec3, f32)> = None;
        for player in world.query(&self.players) {
            let Some(transform) = world.get_component::<Transform3D>(player) else {
                continue;
            };
            let distance = planar_distance(origin, transform.position);
            if distance > range {
                continue;
            }
            if best.is_none_or(|(_, _, d)| distance < d) {
                best = Some((player, transform.position, distance));
            }
        }
        best.map(|(player, position, _)| (player, position))
    }

    fn can_strike(&self, golem: Entity, now: f64) -> bool {
        self.last_strike
            .get(&golem)
            .is_none_or(|&last| now - last >= self.config.strike_cooldown)
    }
}

impl System for GolemAiSystem {
    fn name(&self) -> &'static str {
        "golem_ai"
    }

    fn update(&mut self, world: &mut World, ctx: &SystemContext) {
        self.last_strike.retain(|&golem, _| world.is_alive(golem));

        for golem in world.query(&self.agents) {
            let (Some(mut agent), Some(transform)) = (
                world.get_component::<AiAgent>(golem).copied(),
                world.get_component::<Transform3D>(golem).copied(),
            ) else {
                continue;
            };
            if agent.kind != AgentKind::Golem {
                continue;
            }
            let position = transform.position;

            let velocity = match self.nearest_player(world, position, agent.detection_range) {
                Some((player, player_position)) => {
                    if agent.state != AiState::Chasing || agent.target != Some(player) {
                        debug!(%golem, %player, "golem engaged");
                    }
                    agent.state = AiState::Chasing;
                    agent.target = Some(player);

                    if planar_distance(position, player_position) <= self.config.strike_radius {
                        if self.can_strike(golem, ctx.elapsed) {
                            self.last_strike.insert(golem, ctx.elapsed);
                            info!(%golem, %player, "golem strike");
                            world.emit(GolemStrike {
                                golem,
                                target: player,
                                damage: self.config.strike_damage,
                            });
                        }
                        Vec3::ZERO
                    } else {
                        let offset = player_position - position;
                        Vec3::new(offset.x, 0.0, offset.z).normalize_or_zero() * agent.move_speed
                    }
                }
                None => {
                    if agent.state == AiState::Chasing {
                        debug!(%golem, "golem lost target");
                    }
                    agent.reset();
                    Vec3::ZERO
                }
            };

            if let Some(slot) = world.get_component_mut::<AiAgent>(golem) {
                *slot = agent;
            }
            if let Some(slot) = world.get_component_mut::<Rigidbody>(golem) {
                slot.velocity.x = velocity.x;
                slot.velocity.z = velocity.z;
            }
            if let Some(slot) = world.get_component_mut::<Transform3D>(golem) {
                slot.position.x += velocity.x * ctx.dt;
                slot.position.z += velocity.z * ctx.dt;
            }
        }
    }
}
