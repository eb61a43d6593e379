//! Per-tick execution context provided to systems.

/// Tick metadata handed to every system on each update.
///
/// `elapsed` is the simulation clock: the sum of every `dt` the world has been
/// stepped by. Systems that need "now" read it here instead of the wall clock,
/// so a run is reproducible from its inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemContext {
    /// The current tick ID (1 for the first update).
    pub tick_id: u64,
    /// Delta time of this tick, in seconds.
    pub dt: f32,
    /// Simulation time after this tick's `dt` was applied, in seconds.
    pub elapsed: f64,
}

impl SystemContext {
    /// Create a new context for a tick.
    #[must_use]
    pub fn new(tick_id: u64, dt: f32, elapsed: f64) -> Self {
        Self {
            tick_id,
            dt,
            elapsed,
        }
    }
}
