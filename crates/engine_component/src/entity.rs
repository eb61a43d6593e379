//! Entity type and allocation utilities.
//!
//! An [`Entity`] is a lightweight `u64` identifier with no inherent data. The
//! low 32 bits hold a slot index, the high 32 bits a generation counter that is
//! bumped every time the index is recycled. Holding a stale copy of an entity
//! is therefore harmless: it simply stops resolving.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A unique entity identifier.
///
/// Entities are pure identifiers — they carry no data of their own. Components
/// are attached to entities to give them meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity(u64);

impl Entity {
    /// Build an entity from its slot index and generation.
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | index as u64)
    }

    /// Create an entity from a raw packed `u64`.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Returns the raw packed `u64`.
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    /// Returns the slot index. Indices are reused after destruction.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation of the slot this entity was issued for.
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({}v{})", self.index(), self.generation())
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    generation: u32,
    /// Activation sequence number while live, `None` while on the free-list.
    activation: Option<u64>,
}

/// Owns entity identity: allocation, recycling and liveness.
///
/// Freed indices are recycled most-recently-freed first. Live entities are
/// reported in activation order, which queries and "first player" lookups
/// rely on.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    /// Live entities keyed by activation sequence.
    active: BTreeMap<u64, Entity>,
    next_activation: u64,
}

impl EntityAllocator {
    /// Creates a new, empty allocator. The first index issued is 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates an entity, preferring the most recently freed index.
    pub fn allocate(&mut self) -> Entity {
        let activation = self.next_activation;
        self.next_activation += 1;

        let entity = if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.activation = Some(activation);
            Entity::new(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                activation: Some(activation),
            });
            Entity::new(index, 0)
        };

        self.active.insert(activation, entity);
        entity
    }

    /// Marks `entity` dead and pushes its index onto the free-list.
    ///
    /// Returns `false` if the entity was not alive, in which case nothing
    /// changes.
    pub fn free(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        let slot = &mut self.slots[entity.index() as usize];
        if let Some(activation) = slot.activation.take() {
            self.active.remove(&activation);
        }
        self.free_list.push(entity.index());
        true
    }

    /// Returns `true` if the index is live and the generation matches.
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.slots
            .get(entity.index() as usize)
            .is_some_and(|slot| slot.activation.is_some() && slot.generation == entity.generation())
    }

    /// Returns the live entities in activation order.
    #[must_use]
    pub fn active_entities(&self) -> Vec<Entity> {
        self.active.values().copied().collect()
    }

    /// Iterates the live entities in activation order without allocating.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.active.values().copied()
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Returns `true` if no entity is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Forgets every entity, including the free-list and generations.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.active.clear();
        self.next_activation = 0;
    }
}
