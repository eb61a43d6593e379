//! # engine_ecs
//!
//! The composed registry: [`World`] ties together entity allocation,
//! sparse-set component storage, priority-ordered [`System`] dispatch and
//! typed event queues.
//!
//! ## Tick
//!
//! 1. The driver calls [`World::update`] with a delta time.
//! 2. The world advances its tick counter and simulation clock.
//! 3. Every system runs once, lowest priority first, with a
//!    [`SystemContext`] describing the tick.

pub mod context;
pub mod error;
pub mod events;
pub mod scheduler;
pub mod system;
pub mod world;

pub use context::SystemContext;
pub use error::WorldError;
pub use events::{Event, Events};
pub use scheduler::{SystemId, SystemManager};
pub use system::System;
pub use world::{EntityBuilder, World};

pub use engine_component::{Component, ComponentTypeId, Entity, QueryDescriptor};
