//! World-level error types.

use engine_component::Entity;

/// Errors returned by the few fallible [`World`](crate::World) operations.
///
/// Lookups never error: they return `None`/`false`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WorldError {
    /// The entity was destroyed, never existed, or is a stale generation.
    #[error("{0} is not alive")]
    DeadEntity(Entity),
}
