//! The [`System`] trait.

use crate::context::SystemContext;
use crate::world::World;

/// A unit of per-tick logic.
///
/// Systems hold only their own small state (timers, RNG, injected services).
/// All simulation data lives in the [`World`] and is read and written through
/// its component API.
pub trait System {
    /// A short, human-readable name used in logs (e.g. `"physics"`).
    fn name(&self) -> &'static str;

    /// Advance this system by one tick.
    fn update(&mut self, world: &mut World, ctx: &SystemContext);
}
