//! Physical body components: [`Rigidbody`] and [`Collider`].

use engine_component::Component;
use engine_math::Vec3;
use serde::{Deserialize, Serialize};

/// Motion state of a body.
///
/// Kinematic bodies are moved by gameplay code directly and are skipped by
/// input-driven movement and gravity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rigidbody {
    /// Linear velocity. Only `y` is integrated by physics; horizontal motion
    /// is owned by whichever system drives the entity.
    pub velocity: Vec3,
    /// Linear acceleration.
    pub acceleration: Vec3,
    /// Mass in arbitrary units.
    pub mass: f32,
    /// Whether gravity pulls this body down.
    pub use_gravity: bool,
    /// Kinematic bodies ignore movement input and gravity.
    pub is_kinematic: bool,
    /// Surface friction coefficient.
    pub friction: f32,
    /// Air drag coefficient.
    pub drag: f32,
    /// Horizontal movement speed in units per second.
    pub speed: f32,
}

impl Rigidbody {
    /// A kinematic body with gravity disabled, for things moved by script.
    #[must_use]
    pub fn kinematic() -> Self {
        Self {
            use_gravity: false,
            is_kinematic: true,
            ..Self::default()
        }
    }

    /// Override the horizontal speed.
    #[must_use]
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Override the gravity flag.
    #[must_use]
    pub fn with_gravity(mut self, use_gravity: bool) -> Self {
        self.use_gravity = use_gravity;
        self
    }

    /// Horizontal (x/z) component of the velocity.
    #[must_use]
    pub fn planar_velocity(&self) -> Vec3 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z)
    }
}

impl Default for Rigidbody {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            mass: 1.0,
            use_gravity: true,
            is_kinematic: false,
            friction: 0.5,
            drag: 0.1,
            speed: 5.0,
        }
    }
}

impl Component for Rigidbody {
    fn type_name() -> &'static str {
        "Rigidbody"
    }
}

/// Collision shape. Only spheres take part in overlap tests.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ColliderShape {
    /// A sphere of [`Collider::radius`].
    #[default]
    Sphere,
    /// An axis-aligned box of [`Collider::size`].
    Box,
}

/// Collision volume attached to an entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Collider {
    /// Volume shape.
    pub shape: ColliderShape,
    /// Sphere radius.
    pub radius: f32,
    /// Box extents.
    pub size: Vec3,
    /// Offset of the volume's centre from the entity position.
    pub offset: Vec3,
    /// Triggers report overlap but are never meant to block.
    pub is_trigger: bool,
}

impl Collider {
    /// A sphere collider of the given radius.
    #[must_use]
    pub fn sphere(radius: f32) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    /// Mark the collider as a trigger volume.
    #[must_use]
    pub fn trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// World-space centre of the volume for an entity at `position`.
    #[must_use]
    pub fn center(&self, position: Vec3) -> Vec3 {
        position + self.offset
    }
}

impl Default for Collider {
    fn default() -> Self {
        Self {
            shape: ColliderShape::Sphere,
            radius: 0.5,
            size: Vec3::ONE,
            offset: Vec3::ZERO,
            is_trigger: false,
        }
    }
}

impl Component for Collider {
    fn type_name() -> &'static str {
        "Collider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rigidbody_defaults() {
        let rb = Rigidbody::default();
        assert!(rb.use_gravity);
        assert!(!rb.is_kinematic);
        assert_eq!(rb.mass, 1.0);
    }

    #[test]
    fn test_kinematic_disables_gravity() {
        let rb = Rigidbody::kinematic();
        assert!(rb.is_kinematic);
        assert!(!rb.use_gravity);
    }

    #[test]
    fn test_collider_center_applies_offset() {
        let c = Collider {
            offset: Vec3::new(0.0, 1.0, 0.0),
            ..Collider::sphere(2.0)
        };
        assert_eq!(c.center(Vec3::new(1.0, 1.0, 1.0)), Vec3::new(1.0, 2.0, 1.0));
        assert_eq!(c.shape, ColliderShape::Sphere);
    }
}
