//! Data read by the rendering, camera and UI collaborators. The simulation
//! writes these but never interprets them.

use engine_component::Component;
use engine_math::Vec3;
use serde::{Deserialize, Serialize};

/// Something the player can interact with, with a prompt for the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interactable {
    pub prompt: String,
    pub range: f32,
}

impl Interactable {
    #[must_use]
    pub fn new(prompt: impl Into<String>, range: f32) -> Self {
        Self {
            prompt: prompt.into(),
            range,
        }
    }
}

impl Default for Interactable {
    fn default() -> Self {
        Self::new("Interact", 3.0)
    }
}

impl Component for Interactable {
    fn type_name() -> &'static str {
        "Interactable"
    }
}

/// The camera follows the highest-priority target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CameraTarget {
    pub offset: Vec3,
    pub priority: i32,
}

impl Default for CameraTarget {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 5.0, 10.0),
            priority: 0,
        }
    }
}

impl Component for CameraTarget {
    fn type_name() -> &'static str {
        "CameraTarget"
    }
}

/// Mesh and colour for the renderer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Renderable {
    pub model: String,
    pub color: [f32; 3],
    pub visible: bool,
}

impl Renderable {
    #[must_use]
    pub fn new(model: impl Into<String>, color: [f32; 3]) -> Self {
        Self {
            model: model.into(),
            color,
            visible: true,
        }
    }
}

impl Default for Renderable {
    fn default() -> Self {
        Self::new("cube", [1.0, 1.0, 1.0])
    }
}

impl Component for Renderable {
    fn type_name() -> &'static str {
        "Renderable"
    }
}

/// Current animation clip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Animated {
    pub clip: String,
    pub speed: f32,
    pub time: f32,
}

impl Animated {
    #[must_use]
    pub fn playing(clip: impl Into<String>) -> Self {
        Self {
            clip: clip.into(),
            speed: 1.0,
            time: 0.0,
        }
    }
}

impl Default for Animated {
    fn default() -> Self {
        Self::playing("idle")
    }
}

impl Component for Animated {
    fn type_name() -> &'static str {
        "Animated"
    }
}

/// Short-lived visual effect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Particle {
    pub lifetime: f32,
    pub age: f32,
    pub color: [f32; 3],
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            lifetime: 1.0,
            age: 0.0,
            color: [1.0, 1.0, 1.0],
        }
    }
}

impl Component for Particle {
    fn type_name() -> &'static str {
        "Particle"
    }
}
