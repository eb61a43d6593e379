//! Query descriptors.
//!
//! A [`QueryDescriptor`] names the component kinds an entity must own to match.
//! Matching is a plain set intersection (AND); there are no optional or
//! negated terms.

use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentTypeId};
use crate::entity::Entity;
use crate::storage::ComponentManager;

/// The set of component kinds a query requires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    /// Component kinds every matching entity must own.
    pub required: Vec<ComponentTypeId>,
}

impl QueryDescriptor {
    /// Create a new empty query descriptor. An empty query matches every entity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a descriptor from a list of kinds.
    #[must_use]
    pub fn from_ids(ids: &[ComponentTypeId]) -> Self {
        let mut query = Self::new();
        for &id in ids {
            query = query.with_id(id);
        }
        query
    }

    /// Require component `T`.
    #[must_use]
    pub fn with<T: Component>(self) -> Self {
        self.with_id(T::component_type_id())
    }

    /// Require the component kind `type_id`.
    #[must_use]
    pub fn with_id(mut self, type_id: ComponentTypeId) -> Self {
        if !self.required.contains(&type_id) {
            self.required.push(type_id);
        }
        self
    }

    /// Returns `true` if `entity` owns every required kind.
    #[must_use]
    pub fn matches(&self, components: &ComponentManager, entity: Entity) -> bool {
        self.required
            .iter()
            .all(|&type_id| components.contains_id(entity, type_id))
    }
}
