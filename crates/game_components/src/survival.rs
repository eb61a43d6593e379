//! Creature life cycle: [`Hunger`], [`Hatchable`] eggs and their [`Dna`].

use engine_component::Component;
use serde::{Deserialize, Serialize};

/// Satiation meter that drains over time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Hunger {
    /// Current satiation, in `[0, max]`.
    pub current: f32,
    /// Upper bound.
    pub max: f32,
    /// Loss per second.
    pub depletion_rate: f32,
    /// Simulation time of the last meal.
    pub last_fed: f64,
}

impl Hunger {
    /// A full meter of the given size.
    #[must_use]
    pub fn full(max: f32, depletion_rate: f32) -> Self {
        Self {
            current: max,
            max,
            depletion_rate,
            last_fed: 0.0,
        }
    }

    /// Fraction of the meter that is filled.
    #[must_use]
    pub fn ratio(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }

    /// Returns `true` at or below `threshold` (a fraction of `max`).
    #[must_use]
    pub fn is_hungry(&self, threshold: f32) -> bool {
        self.current <= self.max * threshold
    }

    /// Returns `true` once the meter has run dry.
    #[must_use]
    pub fn is_starved(&self) -> bool {
        self.current <= 0.0
    }

    /// Drain `dt` seconds worth of satiation, stopping at zero.
    pub fn deplete(&mut self, dt: f32) {
        self.current = (self.current - self.depletion_rate * dt).max(0.0);
    }

    /// Add `amount`, capped at `max`, and remember when.
    pub fn feed(&mut self, amount: f32, now: f64) {
        self.current = (self.current + amount).min(self.max);
        self.last_fed = now;
    }
}

impl Default for Hunger {
    fn default() -> Self {
        Self::full(100.0, 1.0)
    }
}

impl Component for Hunger {
    fn type_name() -> &'static str {
        "Hunger"
    }
}

/// Inherited traits of a creature.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Dna {
    /// Body colour as linear RGB.
    pub color: [f32; 3],
    /// Uniform body scale.
    pub size: f32,
    /// Multiplier on base movement speed.
    pub speed: f32,
}

impl Default for Dna {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            size: 1.0,
            speed: 1.0,
        }
    }
}

impl Component for Dna {
    fn type_name() -> &'static str {
        "Dna"
    }
}

/// An egg that turns into a creature when its timer runs out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Hatchable {
    /// Total incubation time in seconds.
    pub hatch_time: f32,
    /// Seconds left.
    pub remaining_time: f32,
    /// Traits passed on to the hatchling.
    pub parent_dna: Dna,
    /// Eggs only count down while this is set.
    pub is_hatching: bool,
}

impl Hatchable {
    /// A fresh egg that starts counting down immediately.
    #[must_use]
    pub fn new(hatch_time: f32, parent_dna: Dna) -> Self {
        Self {
            hatch_time,
            remaining_time: hatch_time,
            parent_dna,
            is_hatching: true,
        }
    }

    /// Incubation progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.hatch_time <= 0.0 {
            1.0
        } else {
            (1.0 - self.remaining_time / self.hatch_time).clamp(0.0, 1.0)
        }
    }
}

impl Default for Hatchable {
    fn default() -> Self {
        Self::new(10.0, Dna::default())
    }
}

impl Component for Hatchable {
    fn type_name() -> &'static str {
        "Hatchable"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_caps_at_max() {
        let mut hunger = Hunger::full(100.0, 1.0);
        hunger.current = 90.0;
        hunger.feed(50.0, 12.5);
        assert_eq!(hunger.current, 100.0);
        assert_eq!(hunger.last_fed, 12.5);
    }

    #[test]
    fn test_deplete_stops_at_zero() {
        let mut hunger = Hunger::full(10.0, 4.0);
        hunger.deplete(2.0);
        assert_eq!(hunger.current, 2.0);
        hunger.deplete(2.0);
        assert_eq!(hunger.current, 0.0);
        assert!(hunger.is_starved());
    }

    #[test]
    fn test_hungry_threshold_is_inclusive() {
        let mut hunger = Hunger::full(100.0, 1.0);
        hunger.current = 30.0;
        assert!(hunger.is_hungry(0.3));
        hunger.current = 31.0;
        assert!(!hunger.is_hungry(0.3));
    }

    #[test]
    fn test_hatch_progress() {
        let mut egg = Hatchable::new(10.0, Dna::default());
        assert_eq!(egg.progress(), 0.0);
        egg.remaining_time = 2.5;
        assert!((egg.progress() - 0.75).abs() < 1e-6);
    }
}
