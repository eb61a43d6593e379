//! Sphere overlap detection. Contacts are reported, never resolved.

use std::collections::HashSet;

use engine_ecs::{Entity, QueryDescriptor, System, SystemContext, World};
use engine_math::{Transform3D, Vec3};
use game_components::{Collider, ColliderShape};
use tracing::debug;

use crate::events::CollisionStarted;

/// Returns `true` if two spheres intersect. Touching spheres do not.
#[must_use]
pub fn spheres_overlap(a_center: Vec3, a_radius: f32, b_center: Vec3, b_radius: f32) -> bool {
    a_center.distance(b_center) < a_radius + b_radius
}

/// Finds overlapping sphere colliders each tick.
#[derive(Debug)]
pub struct CollisionSystem {
    query: QueryDescriptor,
    contacts: Vec<(Entity, Entity)>,
    previous: HashSet<(Entity, Entity)>,
}

impl CollisionSystem {
    #[must_use]
    pub fn new() -> Self {
        Self {
            query: QueryDescriptor::new()
                .with::<Transform3D>()
                .with::<Collider>(),
            contacts: Vec::new(),
            previous: HashSet::new(),
        }
    }

    /// Pairs found on the last tick, in activation order.
    #[must_use]
    pub fn contacts(&self) -> &[(Entity, Entity)] {
        &self.contacts
    }
}

impl Default for CollisionSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for CollisionSystem {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn update(&mut self, world: &mut World, _ctx: &SystemContext) {
        let spheres: Vec<(Entity, Vec3, f32)> = world
            .query(&self.query)
            .into_iter()
            .filter_map(|entity| {
                let transform = world.get_component::<Transform3D>(entity)?;
                let collider = world.get_component::<Collider>(entity)?;
                (collider.shape == ColliderShape::Sphere).then(|| {
                    (entity, collider.center(transform.position), collider.radius)
                })
            })
            .collect();

        self.contacts.clear();
        for (i, &(a, a_center, a_radius)) in spheres.iter().enumerate() {
            for &(b, b_center, b_radius) in &spheres[i + 1..] {
                if spheres_overlap(a_center, a_radius, b_center, b_radius) {
                    self.contacts.push((a, b));
                }
            }
        }

        let current: HashSet<(Entity, Entity)> = self.contacts.iter().copied().collect();
        for &(a, b) in &self.contacts {
            if !self.previous.contains(&(a, b)) {
                debug!(%a, %b, "collision started");
                world.emit(CollisionStarted { a, b });
            }
        }
        self.previous = current;
    }
}
