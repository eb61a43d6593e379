//! Events published by the gameplay systems for presentation collaborators.

use engine_component::Entity;
use engine_math::Vec3;
use game_components::ItemKind;

/// A harvest node was depleted and removed. The drop itself is left to the
/// consumer to materialise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceDropped {
    pub source: Entity,
    pub resource: ItemKind,
    pub count: u32,
    pub position: Vec3,
}

/// A swing landed on a harvest node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceHit {
    pub node: Entity,
    pub attacker: Entity,
    pub damage: u32,
    pub current_hits: u32,
    pub max_hits: u32,
}

/// An entity's hunger ran out and it was destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Starved {
    pub entity: Entity,
}

/// An egg hatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hatched {
    pub egg: Entity,
    pub creature: Entity,
}

/// A golem struck a player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GolemStrike {
    pub golem: Entity,
    pub target: Entity,
    pub damage: f32,
}

/// Two colliders started overlapping this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionStarted {
    pub a: Entity,
    pub b: Entity,
}

/// A loose resource was moved into an inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPickedUp {
    pub holder: Entity,
    pub resource: Entity,
    pub kind: ItemKind,
    pub count: u32,
}
