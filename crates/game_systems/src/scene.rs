//! Entity templates and world setup.

use std::sync::Arc;

use engine_ecs::{Entity, SystemId, World};
use engine_math::{Transform3D, Vec3};
use game_components::{
    AiAgent, Animated, Boat, CameraTarget, Choppable, Collider, Dna, Hatchable, Hunger,
    Interactable, Inventory, ItemKind, Minable, PlayerInput, Production, Renderable, Resource,
    Rigidbody, Tool, ToolKind,
};
use tracing::info;

use crate::boat::BoatSystem;
use crate::collision::CollisionSystem;
use crate::config::GameplayConfig;
use crate::creature_ai::CreatureAiSystem;
use crate::golem_ai::GolemAiSystem;
use crate::harvest::{ChopSystem, MineSystem};
use crate::hatching::HatchingSystem;
use crate::hunger::HungerSystem;
use crate::inventory::InventorySystem;
use crate::movement::MovementSystem;
use crate::physics::PhysicsSystem;
use crate::production::ProductionSystem;
use crate::rng::seeded;
use crate::terrain::Terrain;

/// Default execution order. Lower runs first.
pub mod priority {
    pub const MOVEMENT: i32 = 0;
    pub const PHYSICS: i32 = 10;
    pub const COLLISION: i32 = 20;
    pub const HUNGER: i32 = 30;
    pub const CHOP: i32 = 40;
    pub const MINE: i32 = 41;
    pub const CREATURE_AI: i32 = 50;
    pub const GOLEM_AI: i32 = 51;
    pub const HATCHING: i32 = 60;
    pub const PRODUCTION: i32 = 70;
    pub const BOAT: i32 = 80;
    pub const INVENTORY: i32 = 90;
}

/// Register every gameplay system at its default priority.
///
/// Random streams are derived from `config.seed`, so two worlds set up with
/// the same config and fed the same inputs evolve identically.
pub fn register_default_systems(
    world: &mut World,
    terrain: &Arc<Terrain>,
    config: &GameplayConfig,
) -> Vec<SystemId> {
    let ids = vec![
        world.add_system(Box::new(MovementSystem::new()), priority::MOVEMENT),
        world.add_system(
            Box::new(PhysicsSystem::new(Arc::clone(terrain), config.physics)),
            priority::PHYSICS,
        ),
        world.add_system(Box::new(CollisionSystem::new()), priority::COLLISION),
        world.add_system(Box::new(HungerSystem::new()), priority::HUNGER),
        world.add_system(Box::new(ChopSystem::new(config.harvest)), priority::CHOP),
        world.add_system(Box::new(MineSystem::new(config.harvest)), priority::MINE),
        world.add_system(
            Box::new(CreatureAiSystem::new(config.ai, seeded(config.seed, 1))),
            priority::CREATURE_AI,
        ),
        world.add_system(
            Box::new(GolemAiSystem::new(config.golem)),
            priority::GOLEM_AI,
        ),
        world.add_system(Box::new(HatchingSystem::new()), priority::HATCHING),
        world.add_system(
            Box::new(ProductionSystem::new(
                config.production,
                seeded(config.seed, 2),
            )),
            priority::PRODUCTION,
        ),
        world.add_system(
            Box::new(BoatSystem::new(Arc::clone(terrain), config.boat)),
            priority::BOAT,
        ),
        world.add_system(
            Box::new(InventorySystem::new(config.inventory)),
            priority::INVENTORY,
        ),
    ];
    info!(systems = ?world.system_names(), "gameplay systems registered");
    ids
}

/// A controllable player with an empty inventory.
pub fn spawn_player(world: &mut World, position: Vec3) -> Entity {
    world
        .spawn()
        .with(Transform3D::from_position(position))
        .with(Rigidbody::default())
        .with(Collider::sphere(0.5))
        .with(PlayerInput::default())
        .with(Inventory::default())
        .with(CameraTarget::default())
        .with(Renderable::new("player", [0.2, 0.4, 0.9]))
        .id()
}

/// A choppable tree. Fruit trees also produce fruit.
pub fn spawn_tree(world: &mut World, position: Vec3, fruit: bool) -> Entity {
    world
        .spawn()
        .with(Transform3D::from_position(position))
        .with(Choppable::new(ItemKind::Wood, 3))
        .with(Collider::sphere(0.8))
        .with(Renderable::new("tree", [0.1, 0.6, 0.2]))
        .with_opt(fruit.then(|| Production::new(ItemKind::Fruit, 25.0)))
        .id()
}

/// A rock that yields `resource` when mined with a pickaxe.
pub fn spawn_rock(world: &mut World, position: Vec3, resource: ItemKind) -> Entity {
    world
        .spawn()
        .with(Transform3D::from_position(position))
        .with(Minable::new(resource, 5))
        .with(Collider::sphere(1.0))
        .with(Renderable::new("rock", [0.5, 0.5, 0.5]))
        .id()
}

/// A loose resource lying on the ground, ready to be picked up or eaten.
pub fn spawn_resource(world: &mut World, kind: ItemKind, amount: u32, position: Vec3) -> Entity {
    let color = if kind.is_edible() {
        [0.9, 0.2, 0.2]
    } else {
        [0.6, 0.4, 0.2]
    };
    world
        .spawn()
        .with(Transform3D::from_position(position).scaled(0.3))
        .with(Resource::new(kind, amount))
        .with(Collider::sphere(0.3).trigger())
        .with(Renderable::new("resource", color))
        .id()
}

/// A creature with the given traits, idle at `position`.
pub fn spawn_creature(world: &mut World, position: Vec3, dna: Dna) -> Entity {
    let agent = AiAgent {
        move_speed: AiAgent::default().move_speed * dna.speed,
        ..AiAgent::creature(position)
    };
    world
        .spawn()
        .with(Transform3D::from_position(position).scaled(dna.size))
        .with(Rigidbody::default())
        .with(Collider::sphere(0.5 * dna.size))
        .with(agent)
        .with(dna)
        .with(Hunger::default())
        .with(Renderable::new("creature", dna.color))
        .with(Animated::default())
        .id()
}

/// An egg that hatches a creature carrying `dna`.
pub fn spawn_egg(world: &mut World, position: Vec3, hatch_time: f32, dna: Dna) -> Entity {
    world
        .spawn()
        .with(Transform3D::from_position(position).scaled(0.4))
        .with(Hatchable::new(hatch_time, dna))
        .with(Renderable::new("egg", dna.color))
        .id()
}

/// A golem guarding `position`.
pub fn spawn_golem(world: &mut World, position: Vec3) -> Entity {
    world
        .spawn()
        .with(Transform3D::from_position(position).scaled(2.0))
        .with(Rigidbody::default())
        .with(Collider::sphere(1.2))
        .with(AiAgent::golem(position))
        .with(Renderable::new("golem", [0.35, 0.3, 0.25]))
        .id()
}

/// An unmanned boat floating at `position`.
pub fn spawn_boat(world: &mut World, position: Vec3) -> Entity {
    world
        .spawn()
        .with(Transform3D::from_position(position))
        .with(Rigidbody::kinematic())
        .with(Collider::sphere(2.0))
        .with(Boat::default())
        .with(Interactable::new("Board", 3.0))
        .with(Renderable::new("boat", [0.55, 0.35, 0.15]))
        .id()
}

/// Populate `terrain`'s islands with a small playable scene and return the
/// player.
///
/// The first island gets the player, trees, rocks, creatures and an egg; the
/// second gets a golem. A boat waits off the home shore.
pub fn populate(world: &mut World, terrain: &Terrain) -> Option<Entity> {
    let home = *terrain.islands().first()?;
    let ground =
        |x: f32, z: f32| Vec3::new(home.center_x + x, home.floor_y + 0.5, home.center_z + z);

    let player = spawn_player(world, ground(0.0, 0.0));
    world
        .add_component(player, Tool::new(ToolKind::Axe, 1))
        .ok()?;

    spawn_tree(world, ground(4.0, -3.0), true);
    spawn_tree(world, ground(-5.0, 2.0), false);
    spawn_tree(world, ground(6.0, 6.0), true);
    spawn_rock(world, ground(-3.0, -6.0), ItemKind::Stone);
    spawn_rock(world, ground(8.0, -8.0), ItemKind::Iron);

    let dna = Dna {
        color: [0.9, 0.7, 0.2],
        size: 1.0,
        speed: 1.2,
    };
    spawn_creature(world, ground(-6.0, -4.0), Dna::default());
    spawn_creature(world, ground(5.0, 1.0), dna);
    spawn_egg(world, ground(-2.0, 5.0), 10.0, dna);

    if let Some(outer) = terrain.islands().get(1) {
        spawn_golem(
            world,
            Vec3::new(outer.center_x, outer.floor_y + 0.5, outer.center_z),
        );
    }

    spawn_boat(
        world,
        Vec3::new(home.center_x + home.radius + 4.0, 0.0, home.center_z),
    );

    info!(entities = world.entity_count(), "scene populated");
    Some(player)
}
