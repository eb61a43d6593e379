//! Sparse-set component storage.
//!
//! Each component kind gets its own [`ComponentStorage`]: a dense array of
//! values, a parallel dense array of owning entities, and a sparse table
//! mapping entity index to dense slot. Insert, remove (swap-remove), lookup and
//! membership are all O(1).
//!
//! [`ComponentManager`] owns one type-erased store per [`ComponentTypeId`] and
//! creates it lazily on the first write of that kind.

use std::any::Any;
use std::collections::HashMap;

use tracing::trace;

use crate::component::{Component, ComponentTypeId};
use crate::entity::Entity;

/// Dense storage for a single component kind.
#[derive(Debug)]
pub struct ComponentStorage<T> {
    /// Entity index → dense slot.
    sparse: Vec<Option<usize>>,
    /// `entities[i]` owns `values[i]`.
    entities: Vec<Entity>,
    values: Vec<T>,
}

impl<T> ComponentStorage<T> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sparse: Vec::new(),
            entities: Vec::new(),
            values: Vec::new(),
        }
    }

    fn slot(&self, entity: Entity) -> Option<usize> {
        let slot = (*self.sparse.get(entity.index() as usize)?)?;
        (self.entities[slot] == entity).then_some(slot)
    }

    /// Insert or replace the value for `entity`, returning the previous one.
    pub fn insert(&mut self, entity: Entity, value: T) -> Option<T> {
        let index = entity.index() as usize;
        if index >= self.sparse.len() {
            self.sparse.resize(index + 1, None);
        }

        if let Some(slot) = self.sparse[index] {
            if self.entities[slot] == entity {
                return Some(std::mem::replace(&mut self.values[slot], value));
            }
            // A stale generation still occupies this index; evict it.
            self.remove_slot(slot);
        }

        self.sparse[index] = Some(self.values.len());
        self.entities.push(entity);
        self.values.push(value);
        None
    }

    /// Remove and return the value for `entity`.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let slot = self.slot(entity)?;
        Some(self.remove_slot(slot))
    }

    fn remove_slot(&mut self, slot: usize) -> T {
        let removed = self.entities[slot];
        self.sparse[removed.index() as usize] = None;

        let last = self.values.len() - 1;
        if slot != last {
            let moved = self.entities[last];
            self.sparse[moved.index() as usize] = Some(slot);
        }
        self.entities.swap_remove(slot);
        self.values.swap_remove(slot)
    }

    /// Borrow the value for `entity`.
    #[must_use]
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.slot(entity).map(|slot| &self.values[slot])
    }

    /// Mutably borrow the value for `entity`.
    #[must_use]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.slot(entity).map(|slot| &mut self.values[slot])
    }

    /// Returns `true` if `entity` has a value in this store.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.slot(entity).is_some()
    }

    /// Entities that own a value, in dense order (no ordering guarantee).
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Iterate `(entity, value)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.values.iter())
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the store holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased view of a [`ComponentStorage`] used by [`ComponentManager`].
pub trait ComponentStore: Any + Send + Sync {
    /// Drop the value owned by `entity`, if any. Returns `true` if removed.
    fn remove_entity(&mut self, entity: Entity) -> bool;
    /// Returns `true` if `entity` owns a value.
    fn contains_entity(&self, entity: Entity) -> bool;
    /// Entities owning a value.
    fn entity_list(&self) -> &[Entity];
    /// Upcast for downcasting to the concrete store.
    fn as_any(&self) -> &dyn Any;
    /// Mutable upcast for downcasting to the concrete store.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ComponentStore for ComponentStorage<T> {
    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn contains_entity(&self, entity: Entity) -> bool {
        self.contains(entity)
    }

    fn entity_list(&self) -> &[Entity] {
        self.entities()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Owns every component store, keyed by component kind.
#[derive(Default)]
pub struct ComponentManager {
    stores: HashMap<ComponentTypeId, Box<dyn ComponentStore>>,
}

impl std::fmt::Debug for ComponentManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentManager")
            .field("kinds", &self.stores.len())
            .finish()
    }
}

impl ComponentManager {
    /// Create a manager with no stores.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The typed store for `T`, if one has been created.
    #[must_use]
    pub fn storage<T: Component>(&self) -> Option<&ComponentStorage<T>> {
        self.stores
            .get(&T::component_type_id())
            .and_then(|store| store.as_any().downcast_ref())
    }

    fn storage_mut<T: Component>(&mut self) -> Option<&mut ComponentStorage<T>> {
        self.stores
            .get_mut(&T::component_type_id())
            .and_then(|store| store.as_any_mut().downcast_mut())
    }

    /// Upsert `value` for `entity`, creating the store on first use.
    ///
    /// The caller is responsible for checking that `entity` is alive.
    pub fn insert<T: Component>(&mut self, entity: Entity, value: T) -> Option<T> {
        let type_id = T::component_type_id();
        let store = self.stores.entry(type_id).or_insert_with(|| {
            trace!(kind = T::type_name(), "creating component store");
            Box::new(ComponentStorage::<T>::new())
        });
        store
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()
            .and_then(|typed| typed.insert(entity, value))
    }

    /// Remove and return the `T` owned by `entity`.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.storage_mut::<T>()?.remove(entity)
    }

    /// Borrow the `T` owned by `entity`.
    #[must_use]
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>()?.get(entity)
    }

    /// Mutably borrow the `T` owned by `entity`.
    #[must_use]
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.storage_mut::<T>()?.get_mut(entity)
    }

    /// Returns `true` if `entity` owns a `T`.
    #[must_use]
    pub fn contains<T: Component>(&self, entity: Entity) -> bool {
        self.contains_id(entity, T::component_type_id())
    }

    /// Returns `true` if `entity` owns a component of the given kind.
    #[must_use]
    pub fn contains_id(&self, entity: Entity, type_id: ComponentTypeId) -> bool {
        self.stores
            .get(&type_id)
            .is_some_and(|store| store.contains_entity(entity))
    }

    /// Entities owning a component of the given kind, in store order.
    #[must_use]
    pub fn entities_with(&self, type_id: ComponentTypeId) -> Vec<Entity> {
        self.stores
            .get(&type_id)
            .map(|store| store.entity_list().to_vec())
            .unwrap_or_default()
    }

    /// Remove every component owned by `entity`. Returns how many were removed.
    pub fn remove_all(&mut self, entity: Entity) -> usize {
        self.stores
            .values_mut()
            .filter_map(|store| store.remove_entity(entity).then_some(()))
            .count()
    }

    /// Returns the number of component kinds that have a store.
    #[must_use]
    pub fn kind_count(&self) -> usize {
        self.stores.len()
    }

    /// Drop every store.
    pub fn clear(&mut self) {
        self.stores.clear();
    }
}
