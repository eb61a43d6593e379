//! # game_systems
//!
//! The gameplay rules of the island simulation, one [`System`] per concern:
//!
//! | System | Priority | Does |
//! |--------|----------|------|
//! | [`MovementSystem`] | 0 | Walks players from their input flags |
//! | [`PhysicsSystem`] | 10 | Gravity, island floors, jumping |
//! | [`CollisionSystem`] | 20 | Sphere overlap detection |
//! | [`HungerSystem`] | 30 | Hunger decay and starvation |
//! | [`ChopSystem`] / [`MineSystem`] | 40 / 41 | Harvesting trees and rocks |
//! | [`CreatureAiSystem`] | 50 | Idle, wander, seek food |
//! | [`GolemAiSystem`] | 51 | Chase and strike players |
//! | [`HatchingSystem`] | 60 | Eggs into creatures |
//! | [`ProductionSystem`] | 70 | Periodic resource spawning |
//! | [`BoatSystem`] | 80 | Boarding, steering, bobbing |
//! | [`InventorySystem`] | 90 | Picking up loose resources |
//!
//! Systems talk to each other only through the [`World`](engine_ecs::World):
//! components, and the events in [`events`]. Physics and boats share one
//! [`Terrain`]; randomness comes from seeded [`SimRng`] streams.
//!
//! [`System`]: engine_ecs::System

pub mod boat;
pub mod collision;
pub mod config;
pub mod creature_ai;
pub mod events;
pub mod golem_ai;
pub mod harvest;
pub mod hatching;
pub mod hunger;
pub mod inventory;
pub mod movement;
pub mod physics;
pub mod production;
pub mod rng;
pub mod scene;
pub mod terrain;

pub use boat::BoatSystem;
pub use collision::{CollisionSystem, spheres_overlap};
pub use config::{ConfigError, GameplayConfig};
pub use creature_ai::CreatureAiSystem;
pub use golem_ai::GolemAiSystem;
pub use harvest::{ChopSystem, HarvestSystem, MineSystem};
pub use hatching::HatchingSystem;
pub use hunger::{HungerSystem, feed};
pub use inventory::InventorySystem;
pub use movement::MovementSystem;
pub use physics::PhysicsSystem;
pub use production::ProductionSystem;
pub use rng::{SimRng, seeded};
pub use scene::{populate, priority, register_default_systems};
pub use terrain::{Island, Terrain};
