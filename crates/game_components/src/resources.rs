//! Harvestable nodes, loose resources, tools and producers.

use engine_component::Component;
use serde::{Deserialize, Serialize};

/// Kind of an item, loose resource or harvest drop.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ItemKind {
    #[default]
    Wood,
    Stone,
    Iron,
    Gold,
    Fruit,
    Berry,
    Fish,
    Egg,
    Creature,
    Tool,
}

impl ItemKind {
    /// Creatures eat these.
    #[must_use]
    pub fn is_edible(self) -> bool {
        matches!(self, Self::Fruit | Self::Berry | Self::Fish)
    }

    /// Live things and eggs take a slot each.
    #[must_use]
    pub fn is_stackable(self) -> bool {
        !matches!(self, Self::Creature | Self::Egg)
    }

    /// Display name used for inventory items.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Wood => "Wood",
            Self::Stone => "Stone",
            Self::Iron => "Iron",
            Self::Gold => "Gold",
            Self::Fruit => "Fruit",
            Self::Berry => "Berry",
            Self::Fish => "Fish",
            Self::Egg => "Egg",
            Self::Creature => "Creature",
            Self::Tool => "Tool",
        }
    }
}

/// A loose pile of something lying in the world.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Resource {
    pub kind: ItemKind,
    pub amount: u32,
}

impl Resource {
    #[must_use]
    pub fn new(kind: ItemKind, amount: u32) -> Self {
        Self { kind, amount }
    }
}

impl Default for Resource {
    fn default() -> Self {
        Self::new(ItemKind::Wood, 1)
    }
}

impl Component for Resource {
    fn type_name() -> &'static str {
        "Resource"
    }
}

/// What a tool is for.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ToolKind {
    #[default]
    Axe,
    Pickaxe,
    Sword,
}

/// A tool held by a player. Its damage replaces the bare-hand hit of 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tool {
    pub kind: ToolKind,
    pub damage: u32,
}

impl Tool {
    #[must_use]
    pub fn new(kind: ToolKind, damage: u32) -> Self {
        Self { kind, damage }
    }
}

impl Default for Tool {
    fn default() -> Self {
        Self::new(ToolKind::Axe, 1)
    }
}

impl Component for Tool {
    fn type_name() -> &'static str {
        "Tool"
    }
}

/// Hit counter shared by every harvestable node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Harvestable {
    /// Hits needed to deplete the node.
    pub max_hits: u32,
    /// Hits taken so far.
    pub current_hits: u32,
    /// Minimum seconds between swings.
    pub cooldown: f32,
    /// What the node drops when depleted.
    pub resource_type: ItemKind,
    /// How many units it drops.
    pub drop_count: u32,
    /// Tool needed to land a hit, if any.
    pub required_tool: Option<ToolKind>,
}

impl Harvestable {
    #[must_use]
    pub fn new(resource_type: ItemKind, max_hits: u32) -> Self {
        Self {
            max_hits,
            resource_type,
            ..Self::default()
        }
    }

    /// Require a tool of `kind` to hit this node.
    #[must_use]
    pub fn requiring(mut self, kind: ToolKind) -> Self {
        self.required_tool = Some(kind);
        self
    }

    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.current_hits >= self.max_hits
    }

    /// Hits still needed.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.max_hits.saturating_sub(self.current_hits)
    }

    /// Register `damage` hits.
    pub fn hit(&mut self, damage: u32) {
        self.current_hits = self.current_hits.saturating_add(damage);
    }
}

impl Default for Harvestable {
    fn default() -> Self {
        Self {
            max_hits: 3,
            current_hits: 0,
            cooldown: 0.5,
            resource_type: ItemKind::Wood,
            drop_count: 1,
            required_tool: None,
        }
    }
}

/// A component kind wrapping a [`Harvestable`] node, so one harvest system
/// can serve several node families.
pub trait HarvestNode: Component + Copy {
    /// Verb used in logs, e.g. `"chop"`.
    const ACTION: &'static str;

    fn node(&self) -> &Harvestable;
    fn node_mut(&mut self) -> &mut Harvestable;
}

/// A tree or bush that can be chopped down.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Choppable(pub Harvestable);

impl Choppable {
    #[must_use]
    pub fn new(resource_type: ItemKind, max_hits: u32) -> Self {
        Self(Harvestable::new(resource_type, max_hits))
    }
}

impl Component for Choppable {
    fn type_name() -> &'static str {
        "Choppable"
    }
}

impl HarvestNode for Choppable {
    const ACTION: &'static str = "chop";

    fn node(&self) -> &Harvestable {
        &self.0
    }

    fn node_mut(&mut self) -> &mut Harvestable {
        &mut self.0
    }
}

/// A rock or ore vein that needs a pickaxe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Minable(pub Harvestable);

impl Minable {
    #[must_use]
    pub fn new(resource_type: ItemKind, max_hits: u32) -> Self {
        Self(Harvestable::new(resource_type, max_hits).requiring(ToolKind::Pickaxe))
    }
}

impl Default for Minable {
    fn default() -> Self {
        Self::new(ItemKind::Stone, 3)
    }
}

impl Component for Minable {
    fn type_name() -> &'static str {
        "Minable"
    }
}

impl HarvestNode for Minable {
    const ACTION: &'static str = "mine";

    fn node(&self) -> &Harvestable {
        &self.0
    }

    fn node_mut(&mut self) -> &mut Harvestable {
        &mut self.0
    }
}

/// Periodically spawns a resource next to its owner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Production {
    /// What gets produced.
    pub produces: ItemKind,
    /// Seconds between cycles.
    pub interval: f64,
    /// Simulation time of the last cycle.
    pub last_production_time: f64,
    /// Units per spawned resource.
    pub amount_per_cycle: u32,
    /// Paused producers are skipped.
    pub is_active: bool,
}

impl Production {
    #[must_use]
    pub fn new(produces: ItemKind, interval: f64) -> Self {
        Self {
            produces,
            interval,
            ..Self::default()
        }
    }

    /// Returns `true` once a full interval has passed since the last cycle.
    #[must_use]
    pub fn is_due(&self, now: f64) -> bool {
        self.is_active && now - self.last_production_time >= self.interval
    }
}

impl Default for Production {
    fn default() -> Self {
        Self {
            produces: ItemKind::Fruit,
            interval: 25.0,
            last_production_time: 0.0,
            amount_per_cycle: 1,
            is_active: true,
        }
    }
}

impl Component for Production {
    fn type_name() -> &'static str {
        "Production"
    }
}
