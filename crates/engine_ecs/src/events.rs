//! Typed event queues.
//!
//! Systems publish facts that collaborators outside the simulation act on
//! (a tree dropped wood, a creature starved). One FIFO queue exists per event
//! type; events stay queued until a consumer drains them.

use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Marker for types that may travel through an [`Events`] queue.
pub trait Event: Any + Send + Sync + std::fmt::Debug {}

impl<T: Any + Send + Sync + std::fmt::Debug> Event for T {}

/// Per-type FIFO queues of pending events.
#[derive(Default)]
pub struct Events {
    queues: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl std::fmt::Debug for Events {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Events")
            .field("queues", &self.queues.len())
            .finish()
    }
}

impl Events {
    /// Create an empty set of queues.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn queue<E: Event>(&self) -> Option<&Vec<E>> {
        self.queues
            .get(&TypeId::of::<E>())
            .and_then(|q| q.downcast_ref())
    }

    /// Append an event to its type's queue.
    pub fn push<E: Event>(&mut self, event: E) {
        let queue = self
            .queues
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(Vec::<E>::new()));
        if let Some(queue) = queue.downcast_mut::<Vec<E>>() {
            queue.push(event);
        }
    }

    /// Take every pending event of type `E`, oldest first.
    pub fn drain<E: Event>(&mut self) -> Vec<E> {
        self.queues
            .get_mut(&TypeId::of::<E>())
            .and_then(|q| q.downcast_mut::<Vec<E>>())
            .map(std::mem::take)
            .unwrap_or_default()
    }

    /// Peek at pending events of type `E` without consuming them.
    #[must_use]
    pub fn pending<E: Event>(&self) -> &[E] {
        self.queue::<E>().map_or(&[], Vec::as_slice)
    }

    /// Drop every pending event of every type.
    pub fn clear(&mut self) {
        self.queues.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Ping(u32);

    #[derive(Debug, PartialEq)]
    struct Pong;

    #[test]
    fn test_drain_returns_fifo_and_empties() {
        let mut events = Events::new();
        events.push(Ping(1));
        events.push(Ping(2));
        events.push(Pong);

        assert_eq!(events.pending::<Ping>().len(), 2);
        assert_eq!(events.drain::<Ping>(), vec![Ping(1), Ping(2)]);
        assert!(events.drain::<Ping>().is_empty());
        assert_eq!(events.pending::<Pong>(), &[Pong]);
    }

    #[test]
    fn test_unknown_type_is_empty() {
        let mut events = Events::new();
        assert!(events.pending::<Ping>().is_empty());
        assert!(events.drain::<Ping>().is_empty());
    }
}
