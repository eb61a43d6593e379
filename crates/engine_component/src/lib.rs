//! # engine_component
//!
//! The "E" and "C" in ECS — entity identity, what a component is, and how
//! components are stored.
//!
//! This crate provides:
//!
//! - [`Entity`] — generational `u64` entity identifiers.
//! - [`EntityAllocator`] — allocation, LIFO recycling and liveness.
//! - [`Component`] trait and [`ComponentTypeId`] kind keys.
//! - [`ComponentStorage`] / [`ComponentManager`] — sparse-set storage per kind.
//! - [`QueryDescriptor`] — the component kinds a query requires.

pub mod component;
pub mod entity;
pub mod query;
pub mod storage;

pub use component::{Component, ComponentTypeId};
pub use entity::{Entity, EntityAllocator};
pub use query::QueryDescriptor;
pub use storage::{ComponentManager, ComponentStorage, ComponentStore};
