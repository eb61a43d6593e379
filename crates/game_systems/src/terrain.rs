//! Island layout shared by the physics and boat systems.

use engine_math::Vec3;
use serde::{Deserialize, Serialize};

/// A flat, round island.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Island {
    pub center_x: f32,
    pub center_z: f32,
    pub radius: f32,
    /// Height of the walkable surface.
    pub floor_y: f32,
}

impl Island {
    #[must_use]
    pub fn new(center_x: f32, center_z: f32, radius: f32, floor_y: f32) -> Self {
        Self {
            center_x,
            center_z,
            radius,
            floor_y,
        }
    }

    /// Centre on the floor plane.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        Vec3::new(self.center_x, self.floor_y, self.center_z)
    }

    /// Horizontal distance from `position` to the centre.
    #[must_use]
    pub fn planar_distance(&self, position: Vec3) -> f32 {
        let dx = position.x - self.center_x;
        let dz = position.z - self.center_z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Returns `true` if `position` is above the island (edge inclusive).
    #[must_use]
    pub fn contains(&self, position: Vec3) -> bool {
        self.planar_distance(position) <= self.radius
    }
}

/// The static world geometry: islands on an open sea.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Terrain {
    islands: Vec<Island>,
}

impl Terrain {
    #[must_use]
    pub fn new(islands: Vec<Island>) -> Self {
        Self { islands }
    }

    /// Add an island. Later islands take precedence where they overlap.
    #[must_use]
    pub fn with_island(mut self, island: Island) -> Self {
        self.islands.push(island);
        self
    }

    /// A home island with a smaller neighbour across the water.
    #[must_use]
    pub fn archipelago() -> Self {
        Self::new(vec![
            Island::new(0.0, 0.0, 20.0, 1.0),
            Island::new(60.0, 10.0, 12.0, 1.5),
        ])
    }

    #[must_use]
    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    /// The island under `position`. Where islands overlap the last one listed
    /// wins.
    #[must_use]
    pub fn island_at(&self, position: Vec3) -> Option<&Island> {
        self.islands
            .iter()
            .rev()
            .find(|island| island.contains(position))
    }
}
