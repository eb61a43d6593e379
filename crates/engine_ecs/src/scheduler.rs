//! System manager — priority-ordered dispatch.
//!
//! Systems are kept sorted ascending by priority. Equal priorities keep their
//! registration order. Every tick runs the whole list once, synchronously; the
//! order is a correctness dependency because all systems share one mutable
//! world.

use tracing::{debug, trace};

use crate::context::SystemContext;
use crate::system::System;
use crate::world::World;

/// Handle returned by [`SystemManager::add`], used to remove a system again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SystemId(pub u64);

/// A registered system with its priority.
pub struct RegisteredSystem {
    /// Handle for removal.
    pub id: SystemId,
    /// Lower runs first.
    pub priority: i32,
    /// The system itself.
    pub system: Box<dyn System>,
}

impl std::fmt::Debug for RegisteredSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredSystem")
            .field("id", &self.id)
            .field("name", &self.system.name())
            .field("priority", &self.priority)
            .finish()
    }
}

/// Owns the ordered list of systems.
#[derive(Debug, Default)]
pub struct SystemManager {
    systems: Vec<RegisteredSystem>,
    next_id: u64,
    /// Set while this manager stands in for one that is running.
    stand_in: bool,
    /// Removals requested while standing in.
    pending_removals: Vec<SystemId>,
}

impl SystemManager {
    /// Create an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `system` at `priority`.
    ///
    /// The system is inserted after every system whose priority is less than
    /// or equal to `priority`, which keeps equal priorities in insertion order.
    pub fn add(&mut self, system: Box<dyn System>, priority: i32) -> SystemId {
        let id = SystemId(self.next_id);
        self.next_id += 1;

        let pos = self.systems.partition_point(|s| s.priority <= priority);
        debug!(name = system.name(), priority, position = pos, "system registered");
        self.systems.insert(
            pos,
            RegisteredSystem {
                id,
                priority,
                system,
            },
        );
        id
    }

    /// Unregister a system, handing it back to the caller.
    ///
    /// Returns `None` if the id is unknown. While the systems are running,
    /// removal is deferred to the end of the tick and also returns `None`.
    pub fn remove(&mut self, id: SystemId) -> Option<Box<dyn System>> {
        let Some(pos) = self.systems.iter().position(|s| s.id == id) else {
            if self.stand_in {
                self.pending_removals.push(id);
            }
            return None;
        };
        let removed = self.systems.remove(pos);
        debug!(name = removed.system.name(), "system removed");
        Some(removed.system)
    }

    /// Run every system once, in priority order.
    pub fn run(&mut self, world: &mut World, ctx: &SystemContext) {
        for entry in &mut self.systems {
            trace!(tick_id = ctx.tick_id, system = entry.system.name(), "running system");
            entry.system.update(world, ctx);
        }
    }

    /// An empty manager that continues this one's id sequence. It stands in
    /// for the real manager while the real one is running.
    pub(crate) fn detached(&self) -> Self {
        Self {
            systems: Vec::new(),
            next_id: self.next_id,
            stand_in: true,
            pending_removals: Vec::new(),
        }
    }

    /// Fold in the registrations and removals collected by a
    /// [`detached`](Self::detached) stand-in.
    pub(crate) fn merge(&mut self, stand_in: SystemManager) {
        self.next_id = self.next_id.max(stand_in.next_id);
        for entry in stand_in.systems {
            let pos = self.systems.partition_point(|s| s.priority <= entry.priority);
            self.systems.insert(pos, entry);
        }
        for id in stand_in.pending_removals {
            self.systems.retain(|s| s.id != id);
        }
    }

    /// System names in execution order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.systems.iter().map(|s| s.system.name()).collect()
    }

    /// Returns the number of registered systems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Returns `true` if no system is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Drop every system.
    pub fn clear(&mut self) {
        self.systems.clear();
        self.pending_removals.clear();
    }
}
