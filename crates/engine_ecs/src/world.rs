//! World state storage.
//!
//! The [`World`] composes the entity allocator, the component stores, the
//! system manager and the event queues behind one API. It is the only surface
//! through which systems and outside collaborators (rendering, audio, input,
//! networking) read or change the simulation.

use engine_component::{
    Component, ComponentManager, ComponentTypeId, Entity, EntityAllocator, QueryDescriptor,
};
use tracing::{debug, trace};

use crate::context::SystemContext;
use crate::error::WorldError;
use crate::events::{Event, Events};
use crate::scheduler::{SystemId, SystemManager};
use crate::system::System;

/// The registry of entities, components and systems.
#[derive(Debug, Default)]
pub struct World {
    /// Entity identity and liveness.
    entities: EntityAllocator,
    /// One sparse set per component kind.
    components: ComponentManager,
    /// Priority-ordered systems.
    systems: SystemManager,
    /// Pending events, per event type.
    events: Events,
    /// Number of completed `update` calls.
    tick_id: u64,
    /// Simulation clock: sum of every `dt` passed to `update`.
    elapsed: f64,
}

impl World {
    /// Create a new empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Entity lifecycle --

    /// Allocate a new entity without components.
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.entities.allocate();
        trace!(%entity, "entity created");
        entity
    }

    /// Allocate a new entity and attach components to it fluently.
    pub fn spawn(&mut self) -> EntityBuilder<'_> {
        let entity = self.create_entity();
        EntityBuilder {
            world: self,
            entity,
        }
    }

    /// Destroy an entity.
    ///
    /// Every component is removed before the index is released for reuse.
    /// Returns `false` if the entity was not alive.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if !self.entities.is_alive(entity) {
            return false;
        }
        let removed = self.components.remove_all(entity);
        self.entities.free(entity);
        debug!(%entity, components = removed, "entity destroyed");
        true
    }

    /// Returns `true` if the entity is alive (and not a stale generation).
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Live entities in activation order.
    #[must_use]
    pub fn active_entities(&self) -> Vec<Entity> {
        self.entities.active_entities()
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // -- Component operations --

    /// Attach `value` to `entity`, replacing and returning any previous `T`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DeadEntity`] if the entity is not alive.
    pub fn add_component<T: Component>(
        &mut self,
        entity: Entity,
        value: T,
    ) -> Result<Option<T>, WorldError> {
        if !self.entities.is_alive(entity) {
            return Err(WorldError::DeadEntity(entity));
        }
        Ok(self.components.insert(entity, value))
    }

    /// Detach and return the `T` owned by `entity`.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.components.remove(entity)
    }

    /// Borrow the `T` owned by `entity`.
    #[must_use]
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.components.get(entity)
    }

    /// Mutably borrow the `T` owned by `entity`.
    #[must_use]
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.components.get_mut(entity)
    }

    /// Returns `true` if `entity` owns a `T`.
    #[must_use]
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.components.contains::<T>(entity)
    }

    /// Returns `true` if `entity` owns a component of the given kind.
    #[must_use]
    pub fn has_component_id(&self, entity: Entity, type_id: ComponentTypeId) -> bool {
        self.components.contains_id(entity, type_id)
    }

    /// Read-only access to the component stores.
    #[must_use]
    pub fn components(&self) -> &ComponentManager {
        &self.components
    }

    // -- Query --

    /// Live entities owning every kind in `query`, in activation order.
    ///
    /// The result is a snapshot: destroying entities while iterating it is
    /// safe, but components may vanish underneath, so callers re-check each
    /// lookup.
    #[must_use]
    pub fn query(&self, query: &QueryDescriptor) -> Vec<Entity> {
        self.entities
            .iter()
            .filter(|&entity| query.matches(&self.components, entity))
            .collect()
    }

    /// [`query`](Self::query) with a plain list of kinds.
    #[must_use]
    pub fn query_ids(&self, kinds: &[ComponentTypeId]) -> Vec<Entity> {
        self.query(&QueryDescriptor::from_ids(kinds))
    }

    // -- Systems --

    /// Register a system. Lower priorities run first.
    pub fn add_system(&mut self, system: Box<dyn System>, priority: i32) -> SystemId {
        self.systems.add(system, priority)
    }

    /// Unregister a system and hand it back.
    pub fn remove_system(&mut self, id: SystemId) -> Option<Box<dyn System>> {
        self.systems.remove(id)
    }

    /// Names of the registered systems in execution order.
    #[must_use]
    pub fn system_names(&self) -> Vec<&'static str> {
        self.systems.names()
    }

    /// Step the simulation by `dt` seconds.
    ///
    /// Advances the tick counter and simulation clock, then runs every system
    /// once in priority order. Systems registered or removed during the tick
    /// take effect after it.
    pub fn update(&mut self, dt: f32) {
        self.tick_id += 1;
        self.elapsed += f64::from(dt);
        let ctx = SystemContext::new(self.tick_id, dt, self.elapsed);

        let stand_in = self.systems.detached();
        let mut running = std::mem::replace(&mut self.systems, stand_in);
        running.run(self, &ctx);
        let stand_in = std::mem::replace(&mut self.systems, running);
        self.systems.merge(stand_in);
    }

    /// Number of completed updates.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    /// Simulation time in seconds.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    // -- Events --

    /// Publish an event for collaborators to consume.
    ///
    /// Events are kept across ticks until drained with
    /// [`drain_events`](Self::drain_events). Queues are never trimmed, so a
    /// caller that ignores an event type must still drain it periodically
    /// (or [`clear_events`](Self::clear_events)) to bound memory.
    pub fn emit<E: Event>(&mut self, event: E) {
        trace!(?event, "event emitted");
        self.events.push(event);
    }

    /// Take every pending event of type `E`.
    pub fn drain_events<E: Event>(&mut self) -> Vec<E> {
        self.events.drain()
    }

    /// Peek at pending events of type `E`.
    #[must_use]
    pub fn pending_events<E: Event>(&self) -> &[E] {
        self.events.pending()
    }

    /// Drop pending events of every type.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Reset everything: entities, components, systems, events and clock.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.components.clear();
        self.systems.clear();
        self.events.clear();
        self.tick_id = 0;
        self.elapsed = 0.0;
        debug!("world cleared");
    }
}

/// Fluent builder returned by [`World::spawn`].
#[derive(Debug)]
pub struct EntityBuilder<'w> {
    world: &'w mut World,
    entity: Entity,
}

impl EntityBuilder<'_> {
    /// Attach a component.
    #[must_use]
    pub fn with<T: Component>(self, value: T) -> Self {
        self.world.components.insert(self.entity, value);
        self
    }

    /// Attach a component if `value` is `Some`.
    #[must_use]
    pub fn with_opt<T: Component>(self, value: Option<T>) -> Self {
        match value {
            Some(value) => self.with(value),
            None => self,
        }
    }

    /// Finish building and return the entity.
    #[must_use]
    pub fn id(self) -> Entity {
        self.entity
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    struct Position(f32);

    impl Component for Position {
        fn type_name() -> &'static str {
            "Position"
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    struct Velocity(f32);

    impl Component for Velocity {
        fn type_name() -> &'static str {
            "Velocity"
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    struct Shape;

    impl Component for Shape {
        fn type_name() -> &'static str {
            "Shape"
        }
    }

    struct Recorder {
        label: &'static str,
        log: Rc<RefCell<Vec<(&'static str, u64)>>>,
    }

    impl System for Recorder {
        fn name(&self) -> &'static str {
            self.label
        }

        fn update(&mut self, _world: &mut World, ctx: &SystemContext) {
            self.log.borrow_mut().push((self.label, ctx.tick_id));
        }
    }

    struct Integrate;

    impl System for Integrate {
        fn name(&self) -> &'static str {
            "integrate"
        }

        fn update(&mut self, world: &mut World, ctx: &SystemContext) {
            let query = QueryDescriptor::new().with::<Position>().with::<Velocity>();
            for entity in world.query(&query) {
                let Some(v) = world.get_component::<Velocity>(entity).copied() else {
                    continue;
                };
                if let Some(p) = world.get_component_mut::<Position>(entity) {
                    p.0 += v.0 * ctx.dt;
                }
            }
        }
    }

    #[test]
    fn test_destroyed_id_is_recycled_before_new_ids() {
        let mut world = World::new();
        let ids: Vec<Entity> = (0..5).map(|_| world.create_entity()).collect();
        assert!(world.destroy_entity(ids[3]));

        let next = world.create_entity();
        assert_eq!(next.index(), 3);
        assert_eq!(world.create_entity().index(), 5);
    }

    #[test]
    fn test_query_returns_matches_in_activation_order() {
        let mut world = World::new();
        let a = world.spawn().with(Position(0.0)).with(Velocity(1.0)).id();
        let _b = world.spawn().with(Position(0.0)).id();
        let c = world
            .spawn()
            .with(Position(0.0))
            .with(Velocity(1.0))
            .with(Shape)
            .id();

        let query = QueryDescriptor::new().with::<Position>().with::<Velocity>();
        assert_eq!(world.query(&query), vec![a, c]);
        assert_eq!(
            world.query_ids(&[Position::component_type_id(), Velocity::component_type_id()]),
            vec![a, c]
        );
    }

    #[test]
    fn test_destroy_purges_components_before_reuse() {
        let mut world = World::new();
        let e = world.spawn().with(Position(1.0)).with(Shape).id();
        assert!(world.destroy_entity(e));
        assert!(!world.destroy_entity(e));

        let reused = world.create_entity();
        assert_eq!(reused.index(), e.index());
        assert!(!world.has_component::<Position>(reused));
        assert!(!world.has_component::<Shape>(reused));
        assert!(world.get_component::<Position>(e).is_none());
    }

    #[test]
    fn test_add_component_to_dead_entity_fails() {
        let mut world = World::new();
        let e = world.create_entity();
        world.destroy_entity(e);
        assert_eq!(
            world.add_component(e, Shape),
            Err(WorldError::DeadEntity(e))
        );
    }

    #[test]
    fn test_add_component_upserts() {
        let mut world = World::new();
        let e = world.create_entity();
        assert_eq!(world.add_component(e, Position(1.0)), Ok(None));
        assert_eq!(world.add_component(e, Position(2.0)), Ok(Some(Position(1.0))));
        assert_eq!(world.remove_component::<Position>(e), Some(Position(2.0)));
        assert!(world.remove_component::<Position>(e).is_none());
    }

    #[test]
    fn test_update_runs_systems_in_priority_order() {
        let mut world = World::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for (label, priority) in [("late", 20), ("early", 0), ("middle", 10)] {
            world.add_system(
                Box::new(Recorder {
                    label,
                    log: Rc::clone(&log),
                }),
                priority,
            );
        }

        world.update(0.5);
        world.update(0.5);

        assert_eq!(
            *log.borrow(),
            vec![
                ("early", 1),
                ("middle", 1),
                ("late", 1),
                ("early", 2),
                ("middle", 2),
                ("late", 2)
            ]
        );
        assert_eq!(world.tick_id(), 2);
        assert!((world.elapsed() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_system_mutates_components() {
        let mut world = World::new();
        let e = world.spawn().with(Position(0.0)).with(Velocity(2.0)).id();
        world.add_system(Box::new(Integrate), 0);
        world.update(0.25);
        assert_eq!(world.get_component::<Position>(e), Some(&Position(0.5)));
    }

    #[test]
    fn test_remove_system() {
        let mut world = World::new();
        let id = world.add_system(Box::new(Integrate), 0);
        assert_eq!(world.system_names(), vec!["integrate"]);
        assert!(world.remove_system(id).is_some());
        assert!(world.system_names().is_empty());
    }

    #[test]
    fn test_events_round_trip_through_world() {
        let mut world = World::new();
        world.emit(Position(3.0));
        assert_eq!(world.pending_events::<Position>().len(), 1);
        assert_eq!(world.drain_events::<Position>(), vec![Position(3.0)]);
        assert!(world.pending_events::<Position>().is_empty());
    }

    #[test]
    fn test_events_kept_across_ticks_until_drained() {
        let mut world = World::new();
        world.emit(Position(1.0));
        world.update(0.5);
        world.emit(Position(2.0));
        world.update(0.5);
        assert_eq!(world.pending_events::<Position>().len(), 2);

        world.clear_events();
        assert!(world.pending_events::<Position>().is_empty());
        assert_eq!(world.tick_id(), 2);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut world = World::new();
        let _ = world.spawn().with(Shape).id();
        world.add_system(Box::new(Integrate), 0);
        world.update(1.0);
        world.clear();

        assert_eq!(world.entity_count(), 0);
        assert!(world.system_names().is_empty());
        assert_eq!(world.tick_id(), 0);
        assert_eq!(world.create_entity().index(), 0);
    }
}
