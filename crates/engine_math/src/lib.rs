//! # engine_math
//!
//! Math types for the simulation. Re-exports [`glam`] for linear algebra and
//! defines the [`Transform3D`] component.

pub mod transform;

// Re-export glam types for convenience.
pub use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

pub use transform::{Transform3D, planar_distance};
