//! Fixed-timestep tick loop.
//!
//! Each tick:
//!
//! 1. Run the per-tick hook (input injection, event draining).
//! 2. Step the world by `1 / tick_rate` seconds.
//! 3. Sleep off the rest of the tick budget when running in real time.

use std::time::{Duration, Instant};

use engine_ecs::World;
use tracing::{debug, info, warn};

/// Configuration for the tick loop.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Target ticks per second.
    pub tick_rate: f64,
    /// Maximum number of ticks to run (0 = unlimited).
    pub max_ticks: u64,
    /// Pace ticks against the wall clock instead of running flat out.
    pub realtime: bool,
}

impl TickConfig {
    #[must_use]
    pub fn with_tick_rate(mut self, tick_rate: f64) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    #[must_use]
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    #[must_use]
    pub fn with_realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    /// Simulation seconds per tick.
    #[must_use]
    pub fn dt(&self) -> f32 {
        (1.0 / self.tick_rate) as f32
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_ticks: 0,
            realtime: true,
        }
    }
}

/// Owns the world and steps it at a fixed rate.
#[derive(Debug)]
pub struct TickLoop {
    config: TickConfig,
    world: World,
}

impl TickLoop {
    #[must_use]
    pub fn new(config: TickConfig, world: World) -> Self {
        Self { config, world }
    }

    /// Returns the number of completed ticks.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.world.tick_id()
    }

    /// Returns a reference to the world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Returns a mutable reference to the world.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Run one tick of the simulation.
    pub fn tick(&mut self) {
        let dt = self.config.dt();
        self.world.update(dt);
        debug!(
            tick_id = self.world.tick_id(),
            dt,
            entities = self.world.entity_count(),
            "tick"
        );
    }

    /// Run for the configured number of ticks, or indefinitely.
    pub fn run(&mut self) {
        self.run_with(|_| {});
    }

    /// Like [`run`](Self::run), calling `on_tick` with the world before every
    /// step.
    pub fn run_with(&mut self, mut on_tick: impl FnMut(&mut World)) {
        let tick_duration = Duration::from_secs_f64(1.0 / self.config.tick_rate);
        let mut tick_count = 0u64;

        info!(
            tick_rate = self.config.tick_rate,
            max_ticks = self.config.max_ticks,
            realtime = self.config.realtime,
            "starting tick loop"
        );

        loop {
            let start = Instant::now();

            on_tick(&mut self.world);
            self.tick();

            tick_count += 1;
            if self.config.max_ticks > 0 && tick_count >= self.config.max_ticks {
                info!(
                    ticks = tick_count,
                    elapsed = self.world.elapsed(),
                    "tick loop complete"
                );
                break;
            }

            if !self.config.realtime {
                continue;
            }
            let elapsed = start.elapsed();
            if elapsed < tick_duration {
                std::thread::sleep(tick_duration - elapsed);
            } else {
                warn!(
                    tick_id = self.world.tick_id(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = tick_duration.as_millis() as u64,
                    "tick exceeded time budget"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast(max_ticks: u64) -> TickConfig {
        TickConfig::default()
            .with_tick_rate(1000.0)
            .with_max_ticks(max_ticks)
            .with_realtime(false)
    }

    #[test]
    fn test_tick_advances_counter() {
        let mut tick_loop = TickLoop::new(TickConfig::default(), World::new());
        assert_eq!(tick_loop.tick_id(), 0);
        tick_loop.tick();
        assert_eq!(tick_loop.tick_id(), 1);
        tick_loop.tick();
        assert_eq!(tick_loop.tick_id(), 2);
        assert!((tick_loop.world().elapsed() - 2.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_run_limited_ticks() {
        let mut tick_loop = TickLoop::new(fast(5), World::new());
        tick_loop.run();
        assert_eq!(tick_loop.tick_id(), 5);
    }

    #[test]
    fn test_hook_runs_before_each_tick() {
        let mut tick_loop = TickLoop::new(fast(3), World::new());
        let mut seen = Vec::new();
        tick_loop.run_with(|world| seen.push(world.tick_id()));
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn test_realtime_run_paces_ticks() {
        let config = TickConfig::default()
            .with_tick_rate(200.0)
            .with_max_ticks(4);
        let mut tick_loop = TickLoop::new(config, World::new());
        let start = Instant::now();
        tick_loop.run();
        assert!(start.elapsed() >= Duration::from_millis(15));
    }
}
