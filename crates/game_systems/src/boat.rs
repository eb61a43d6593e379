//! Boats: boarding, steering, bobbing and shore contact.

use std::sync::Arc;

use engine_ecs::{Entity, QueryDescriptor, System, SystemContext, World};
use engine_math::{Transform3D, Vec3, planar_distance};
use game_components::{Boat, PlayerInput, Rigidbody};
use tracing::{debug, info, warn};

use crate::config::BoatConfig;
use crate::terrain::Terrain;

/// Drives every boat once per tick.
///
/// Only the first player (in activation order) may board or leave a boat, and
/// the interact key is read as a level, not an edge: holding it toggles every
/// tick the player is in range.
#[derive(Debug)]
pub struct BoatSystem {
    terrain: Arc<Terrain>,
    config: BoatConfig,
    boats: QueryDescriptor,
    players: QueryDescriptor,
}

impl BoatSystem {
    #[must_use]
    pub fn new(terrain: Arc<Terrain>, config: BoatConfig) -> Self {
        Self {
            terrain,
            config,
            boats: QueryDescriptor::new()
                .with::<Boat>()
                .with::<Transform3D>()
                .with::<Rigidbody>(),
            players: QueryDescriptor::new()
                .with::<PlayerInput>()
                .with::<Transform3D>(),
        }
    }

    /// Wave height offset at simulation time `t`.
    fn bob(&self, t: f64) -> f32 {
        let t = t as f32;
        self.config.bob_amplitude * ((t * 1.3).sin() + 0.5 * (t * 2.1 + 0.7).sin())
    }

    fn is_driving(&self, world: &World, player: Entity) -> bool {
        world.query(&self.boats).into_iter().any(|boat| {
            world
                .get_component::<Boat>(boat)
                .is_some_and(|b| b.helm() == Some(player))
        })
    }

    /// Board or leave `boat_entity`. Returns `true` if anything changed.
    fn handle_interact(
        &self,
        world: &mut World,
        player: Entity,
        boat_entity: Entity,
        boat: &mut Boat,
        boat_position: Vec3,
    ) -> bool {
        if boat.helm() == Some(player) {
            boat.disembark();
            let landing = boat_position + Vec3::from_array(self.config.disembark_offset);
            if let Some(transform) = world.get_component_mut::<Transform3D>(player) {
                transform.position = landing;
            }
            info!(%player, boat = %boat_entity, "disembarked");
            return true;
        }

        if boat.helm().is_some() || self.is_driving(world, player) {
            return false;
        }
        let in_reach = world
            .get_component::<Transform3D>(player)
            .is_some_and(|t| planar_distance(t.position, boat_position) <= self.config.board_radius);
        if !in_reach {
            return false;
        }

        boat.board(player);
        if let Some(transform) = world.get_component_mut::<Transform3D>(player) {
            transform.position = boat_position;
        }
        if let Some(body) = world.get_component_mut::<Rigidbody>(player) {
            body.velocity.x = 0.0;
            body.velocity.z = 0.0;
        }
        info!(%player, boat = %boat_entity, "boarded");
        true
    }

    fn steer(
        &self,
        input: PlayerInput,
        boat: &Boat,
        transform: &mut Transform3D,
        body: &mut Rigidbody,
        dt: f32,
    ) {
        let mut velocity = body.planar_velocity();
        let speed_fraction = if boat.speed > 0.0 {
            (velocity.length() / boat.speed).min(1.0)
        } else {
            0.0
        };
        let turn = f32::from(u8::from(input.left)) - f32::from(u8::from(input.right));
        transform.rotation.y += boat.turn_speed * speed_fraction * dt * turn;

        let heading = transform.heading();
        if input.forward {
            velocity += heading * self.config.thrust * dt;
        }
        if input.backward {
            velocity -= heading * self.config.thrust * 0.5 * dt;
        }
        velocity = velocity.clamp_length_max(boat.speed) * self.config.water_drag;
        body.velocity.x = velocity.x;
        body.velocity.z = velocity.z;
    }

    fn push_off_shores(&self, boat: Entity, transform: &mut Transform3D, body: &mut Rigidbody) {
        for island in self.terrain.islands() {
            let min = island.radius + self.config.boat_radius;
            let distance = island.planar_distance(transform.position);
            if distance >= min {
                continue;
            }
            let away = Vec3::new(
                transform.position.x - island.center_x,
                0.0,
                transform.position.z - island.center_z,
            );
            let away = if distance > f32::EPSILON {
                away / distance
            } else {
                Vec3::X
            };
            transform.position.x = island.center_x + away.x * min;
            transform.position.z = island.center_z + away.z * min;
            body.velocity.x *= self.config.shore_damping;
            body.velocity.z *= self.config.shore_damping;
            debug!(%boat, "pushed off shore");
        }
    }
}

impl System for BoatSystem {
    fn name(&self) -> &'static str {
        "boat"
    }

    fn update(&mut self, world: &mut World, ctx: &SystemContext) {
        let player = world.query(&self.players).into_iter().next();
        let interact = player
            .and_then(|p| world.get_component::<PlayerInput>(p))
            .is_some_and(|input| input.interact);
        let mut interacted = false;

        for boat_entity in world.query(&self.boats) {
            let (Some(mut boat), Some(mut transform), Some(mut body)) = (
                world.get_component::<Boat>(boat_entity).copied(),
                world.get_component::<Transform3D>(boat_entity).copied(),
                world.get_component::<Rigidbody>(boat_entity).copied(),
            ) else {
                continue;
            };

            if boat.has_driver && boat.driver.is_none_or(|d| !world.is_alive(d)) {
                warn!(boat = %boat_entity, "driver gone, boat unmanned");
                boat.disembark();
            }

            if let Some(player) = player.filter(|_| interact && !interacted) {
                interacted = self.handle_interact(
                    world,
                    player,
                    boat_entity,
                    &mut boat,
                    transform.position,
                );
            }

            match boat.helm().filter(|_| !boat.is_anchored) {
                Some(driver) => {
                    let input = world
                        .get_component::<PlayerInput>(driver)
                        .copied()
                        .unwrap_or_default();
                    self.steer(input, &boat, &mut transform, &mut body, ctx.dt);
                }
                None => {
                    body.velocity.x *= self.config.idle_damping;
                    body.velocity.z *= self.config.idle_damping;
                }
            }
            transform.position.x += body.velocity.x * ctx.dt;
            transform.position.z += body.velocity.z * ctx.dt;
            transform.position.y = self.config.water_level + self.bob(ctx.elapsed);
            self.push_off_shores(boat_entity, &mut transform, &mut body);

            if let Some(driver) = boat.helm() {
                if let Some(slot) = world.get_component_mut::<Transform3D>(driver) {
                    slot.position = transform.position;
                }
                if let Some(slot) = world.get_component_mut::<Rigidbody>(driver) {
                    slot.velocity = Vec3::ZERO;
                }
            }
            if let Some(slot) = world.get_component_mut::<Boat>(boat_entity) {
                *slot = boat;
            }
            if let Some(slot) = world.get_component_mut::<Transform3D>(boat_entity) {
                *slot = transform;
            }
            if let Some(slot) = world.get_component_mut::<Rigidbody>(boat_entity) {
                *slot = body;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{spawn_boat, spawn_player};
    use crate::terrain::Island;

    fn open_sea() -> BoatSystem {
        BoatSystem::new(Arc::new(Terrain::default()), BoatConfig::default())
    }

    fn set_input(world: &mut World, player: Entity, input: PlayerInput) {
        *world.get_component_mut::<PlayerInput>(player).unwrap() = input;
    }

    fn interact() -> PlayerInput {
        PlayerInput {
            interact: true,
            ..PlayerInput::default()
        }
    }

    #[test]
    fn test_board_then_disembark() {
        let mut world = World::new();
        let player = spawn_player(&mut world, Vec3::new(31.0, 0.0, 0.0));
        let boat = spawn_boat(&mut world, Vec3::new(30.0, 0.0, 0.0));
        let mut boats = open_sea();

        set_input(&mut world, player, interact());
        boats.update(&mut world, &SystemContext::new(1, 0.1, 0.1));
        let b = world.get_component::<Boat>(boat).unwrap();
        assert!(b.has_driver);
        assert_eq!(b.driver, Some(player));
        assert_eq!(
            world.get_component::<Transform3D>(player).unwrap().position,
            world.get_component::<Transform3D>(boat).unwrap().position
        );

        boats.update(&mut world, &SystemContext::new(2, 0.1, 0.2));
        let b = world.get_component::<Boat>(boat).unwrap();
        assert!(!b.has_driver);
        assert_eq!(b.driver, None);
        let p = world.get_component::<Transform3D>(player).unwrap().position;
        assert!((p.x - 33.0).abs() < 1e-5);
        assert!(p.z.abs() < 1e-5);
    }

    #[test]
    fn test_out_of_reach_cannot_board() {
        let mut world = World::new();
        let player = spawn_player(&mut world, Vec3::new(40.0, 0.0, 0.0));
        let boat = spawn_boat(&mut world, Vec3::new(30.0, 0.0, 0.0));
        set_input(&mut world, player, interact());
        open_sea().update(&mut world, &SystemContext::new(1, 0.1, 0.1));
        assert!(!world.get_component::<Boat>(boat).unwrap().has_driver);
    }

    #[test]
    fn test_only_first_player_considered() {
        let mut world = World::new();
        let _first = spawn_player(&mut world, Vec3::new(100.0, 0.0, 0.0));
        let second = spawn_player(&mut world, Vec3::new(30.0, 0.0, 0.0));
        let boat = spawn_boat(&mut world, Vec3::new(30.0, 0.0, 0.0));
        set_input(&mut world, second, interact());
        open_sea().update(&mut world, &SystemContext::new(1, 0.1, 0.1));
        assert!(!world.get_component::<Boat>(boat).unwrap().has_driver);
    }

    #[test]
    fn test_driving_forward_moves_along_heading() {
        let mut world = World::new();
        let player = spawn_player(&mut world, Vec3::new(30.0, 0.0, 0.0));
        let boat = spawn_boat(&mut world, Vec3::new(30.0, 0.0, 0.0));
        world.get_component_mut::<Boat>(boat).unwrap().board(player);
        set_input(
            &mut world,
            player,
            PlayerInput {
                forward: true,
                ..PlayerInput::default()
            },
        );
        let mut boats = open_sea();
        for tick in 1..=200u32 {
            boats.update(
                &mut world,
                &SystemContext::new(u64::from(tick), 0.1, f64::from(tick) * 0.1),
            );
        }

        let v = world.get_component::<Rigidbody>(boat).unwrap().velocity;
        assert!(v.z > 0.0);
        assert!(v.x.abs() < 1e-4);
        assert!(Vec3::new(v.x, 0.0, v.z).length() <= 8.0 + 1e-4);

        let t = world.get_component::<Transform3D>(boat).unwrap().position;
        assert!(t.z > 10.0);
        assert_eq!(
            world.get_component::<Transform3D>(player).unwrap().position,
            t
        );
    }

    #[test]
    fn test_unmanned_boat_bobs_and_drifts_to_rest() {
        let mut world = World::new();
        let boat = spawn_boat(&mut world, Vec3::new(30.0, 5.0, 0.0));
        world.get_component_mut::<Rigidbody>(boat).unwrap().velocity = Vec3::new(2.0, 0.0, 0.0);
        let mut boats = open_sea();
        boats.update(&mut world, &SystemContext::new(1, 0.1, 0.1));

        let expected_y = boats.bob(0.1);
        let t = world.get_component::<Transform3D>(boat).unwrap().position;
        assert!((t.y - expected_y).abs() < 1e-6);
        let v = world.get_component::<Rigidbody>(boat).unwrap().velocity;
        assert!((v.x - 1.9).abs() < 1e-5);
    }

    #[test]
    fn test_stale_driver_resets_boat() {
        let mut world = World::new();
        let player = spawn_player(&mut world, Vec3::new(30.0, 0.0, 0.0));
        let boat = spawn_boat(&mut world, Vec3::new(30.0, 0.0, 0.0));
        world.get_component_mut::<Boat>(boat).unwrap().board(player);
        world.destroy_entity(player);

        open_sea().update(&mut world, &SystemContext::new(1, 0.1, 0.1));
        let b = world.get_component::<Boat>(boat).unwrap();
        assert!(!b.has_driver);
        assert_eq!(b.driver, None);
    }

    #[test]
    fn test_pushed_off_island() {
        let mut world = World::new();
        let boat = spawn_boat(&mut world, Vec3::new(15.0, 0.0, 0.0));
        let terrain = Terrain::default().with_island(Island::new(0.0, 0.0, 20.0, 1.0));
        BoatSystem::new(Arc::new(terrain), BoatConfig::default())
            .update(&mut world, &SystemContext::new(1, 0.1, 0.1));
        let p = world.get_component::<Transform3D>(boat).unwrap().position;
        assert!((p.x - 22.0).abs() < 1e-4);
        assert!(p.z.abs() < 1e-4);
    }
}
