//! Boardable vehicle.

use engine_component::{Component, Entity};
use serde::{Deserialize, Serialize};

/// A boat that one player can board and steer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Boat {
    /// Top speed in units per second.
    pub speed: f32,
    /// Turn rate in radians per second at full speed.
    pub turn_speed: f32,
    /// Set while someone is aboard.
    pub has_driver: bool,
    /// Weak reference to the player aboard.
    pub driver: Option<Entity>,
    /// Seats.
    pub capacity: u32,
    /// Anchored boats only bob in place.
    pub is_anchored: bool,
}

impl Boat {
    /// Put `player` at the helm.
    pub fn board(&mut self, player: Entity) {
        self.has_driver = true;
        self.driver = Some(player);
    }

    /// Leave the boat unmanned.
    pub fn disembark(&mut self) {
        self.has_driver = false;
        self.driver = None;
    }

    /// The entity at the helm, if any.
    #[must_use]
    pub fn helm(&self) -> Option<Entity> {
        if self.has_driver { self.driver } else { None }
    }
}

impl Default for Boat {
    fn default() -> Self {
        Self {
            speed: 8.0,
            turn_speed: 1.5,
            has_driver: false,
            driver: None,
            capacity: 1,
            is_anchored: false,
        }
    }
}

impl Component for Boat {
    fn type_name() -> &'static str {
        "Boat"
    }
}
