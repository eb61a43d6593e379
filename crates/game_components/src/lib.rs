//! # game_components
//!
//! Every gameplay component kind of the island simulation. All are plain data
//! with serde derives and sensible defaults; behaviour lives in
//! `game_systems`.
//!
//! | Module | Kinds |
//! |--------|-------|
//! | [`body`] | [`Rigidbody`], [`Collider`] |
//! | [`input`] | [`PlayerInput`] |
//! | [`ai`] | [`AiAgent`] |
//! | [`survival`] | [`Hunger`], [`Hatchable`] |
//! | [`resources`] | [`Choppable`], [`Minable`], [`Resource`], [`Tool`], [`Production`] |
//! | [`boat`] | [`Boat`] |
//! | [`inventory`] | [`Inventory`] |
//! | [`presentation`] | [`Interactable`], [`CameraTarget`], [`Renderable`], [`Animated`], [`Particle`] |
//!
//! [`Transform3D`] lives in `engine_math` and is re-exported here.

pub mod ai;
pub mod body;
pub mod boat;
pub mod input;
pub mod inventory;
pub mod presentation;
pub mod resources;
pub mod survival;

pub use ai::{AgentKind, AiAgent, AiState};
pub use body::{Collider, ColliderShape, Rigidbody};
pub use boat::Boat;
pub use input::PlayerInput;
pub use inventory::{Inventory, Item};
pub use presentation::{Animated, CameraTarget, Interactable, Particle, Renderable};
pub use resources::{
    Choppable, HarvestNode, Harvestable, ItemKind, Minable, Production, Resource, Tool, ToolKind,
};
pub use survival::{Dna, Hatchable, Hunger};

pub use engine_math::Transform3D;
