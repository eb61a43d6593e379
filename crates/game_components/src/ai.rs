//! AI agent state.

use engine_component::{Component, Entity};
use engine_math::Vec3;
use serde::{Deserialize, Serialize};

/// Which behaviour drives the agent.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum AgentKind {
    /// Wanders inside its bound and seeks food when hungry.
    #[default]
    Creature,
    /// Chases and strikes players that come within range.
    Golem,
}

/// State of the agent's state machine.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum AiState {
    /// Standing still.
    #[default]
    Idle,
    /// Roaming inside the wander bound.
    Wandering,
    /// Heading for the food stored in [`AiAgent::target`].
    ChasingFood,
    /// Golem pursuing the player stored in [`AiAgent::target`].
    Chasing,
}

/// AI controller data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AiAgent {
    /// Behaviour family.
    pub kind: AgentKind,
    /// Current state.
    pub state: AiState,
    /// Base movement speed in units per second.
    pub move_speed: f32,
    /// Centre of the wander area.
    pub bound_center: Vec3,
    /// Radius of the wander area.
    pub bound_radius: f32,
    /// Weak reference to the current target. May point at a destroyed
    /// entity; always validate before use.
    pub target: Option<Entity>,
    /// How far the agent notices targets.
    pub detection_range: f32,
}

impl AiAgent {
    /// An idle creature that wanders around `home`.
    #[must_use]
    pub fn creature(home: Vec3) -> Self {
        Self {
            bound_center: home,
            ..Self::default()
        }
    }

    /// An idle golem guarding `home`.
    #[must_use]
    pub fn golem(home: Vec3) -> Self {
        Self {
            kind: AgentKind::Golem,
            bound_center: home,
            move_speed: 3.0,
            detection_range: 12.0,
            ..Self::default()
        }
    }

    /// Switch state and drop any target.
    pub fn reset(&mut self) {
        self.state = AiState::Idle;
        self.target = None;
    }
}

impl Default for AiAgent {
    fn default() -> Self {
        Self {
            kind: AgentKind::Creature,
            state: AiState::Idle,
            move_speed: 2.0,
            bound_center: Vec3::ZERO,
            bound_radius: 10.0,
            target: None,
            detection_range: 10.0,
        }
    }
}

impl Component for AiAgent {
    fn type_name() -> &'static str {
        "AiAgent"
    }
}
