//! Player input snapshot, written by the input collaborator each frame.

use engine_component::Component;
use serde::{Deserialize, Serialize};

/// Button and mouse state of one player for the current frame.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PlayerInput {
    /// Move toward −z.
    pub forward: bool,
    /// Move toward +z.
    pub backward: bool,
    /// Move toward −x.
    pub left: bool,
    /// Move toward +x.
    pub right: bool,
    /// Jump when grounded.
    pub jump: bool,
    /// Board or leave a vehicle.
    pub interact: bool,
    /// Swing at the nearest resource.
    pub attack: bool,
    /// Horizontal mouse delta.
    pub mouse_x: f32,
    /// Vertical mouse delta.
    pub mouse_y: f32,
}

impl PlayerInput {
    /// Planar move axes `(x, z)` from the four direction flags, not normalised.
    #[must_use]
    pub fn move_axes(&self) -> (f32, f32) {
        let mut x = 0.0;
        let mut z = 0.0;
        if self.forward {
            z -= 1.0;
        }
        if self.backward {
            z += 1.0;
        }
        if self.left {
            x -= 1.0;
        }
        if self.right {
            x += 1.0;
        }
        (x, z)
    }
}

impl Component for PlayerInput {
    fn type_name() -> &'static str {
        "PlayerInput"
    }
}
