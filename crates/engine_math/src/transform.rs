//! 3D transform component.
//!
//! [`Transform3D`] is the authoritative spatial state of an entity: position,
//! Euler rotation and per-axis scale.

use engine_component::Component;
use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position, rotation and scale in world space.
///
/// Rotation is stored as Euler angles in radians (x = pitch, y = yaw,
/// z = roll). Gameplay only ever writes the yaw, which is the facing
/// direction on the horizontal plane.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Transform3D {
    /// World-space position.
    pub position: Vec3,
    /// Euler angles in radians.
    pub rotation: Vec3,
    /// Per-axis scale factor.
    pub scale: Vec3,
}

impl Transform3D {
    /// The identity transform: origin, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Create a new transform with the given position and default rotation/scale.
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Create a transform at `position` facing `yaw` radians.
    #[must_use]
    pub fn from_position_yaw(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            rotation: Vec3::new(0.0, yaw, 0.0),
            ..Self::IDENTITY
        }
    }

    /// The rotation as a quaternion (yaw, then pitch, then roll).
    #[must_use]
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.rotation.y, self.rotation.x, self.rotation.z)
    }

    /// Compute the 4×4 model matrix for this transform.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }

    /// Unit vector on the horizontal plane the transform is facing.
    ///
    /// Yaw 0 faces +z; this is the inverse of `atan2(x, z)`.
    #[must_use]
    pub fn heading(&self) -> Vec3 {
        let (sin, cos) = self.rotation.y.sin_cos();
        Vec3::new(sin, 0.0, cos)
    }

    /// Horizontal (x/z) distance to another point, ignoring height.
    #[must_use]
    pub fn planar_distance(&self, other: Vec3) -> f32 {
        planar_distance(self.position, other)
    }

    /// Translate the transform by the given offset.
    #[must_use]
    pub fn translated(mut self, offset: Vec3) -> Self {
        self.position += offset;
        self
    }

    /// Apply a uniform scale factor.
    #[must_use]
    pub fn scaled(mut self, factor: f32) -> Self {
        self.scale *= factor;
        self
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Component for Transform3D {
    fn type_name() -> &'static str {
        "Transform3D"
    }
}

/// Distance between two points projected onto the x/z plane.
#[must_use]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_transform() {
        let t = Transform3D::IDENTITY;
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
    }

    #[test]
    fn test_from_position() {
        let t = Transform3D::from_position(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.rotation, Vec3::ZERO);
    }

    #[test]
    fn test_translated() {
        let t = Transform3D::IDENTITY.translated(Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(t.position, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_matrix_identity() {
        assert_eq!(Transform3D::IDENTITY.to_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_heading_matches_atan2_convention() {
        let yaw = 1.0_f32.atan2(0.0); // moving along +x
        let t = Transform3D::from_position_yaw(Vec3::ZERO, yaw);
        let h = t.heading();
        assert!((h.x - 1.0).abs() < 1e-5);
        assert!(h.z.abs() < 1e-5);
    }

    #[test]
    fn test_planar_distance_ignores_height() {
        let d = planar_distance(Vec3::new(0.0, 10.0, 0.0), Vec3::new(3.0, -4.0, 4.0));
        assert!((d - 5.0).abs() < 1e-6);
    }
}
