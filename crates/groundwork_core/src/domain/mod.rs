//! Entity and aggregate-root contracts.
//!
//! # Responsibility
//! - Define the identity contract every persisted entity satisfies.
//! - Define the pending domain-event contract for aggregate roots.
//!
//! # Invariants
//! - An entity's key is stable and unique within its store.
//! - Pending events are owned exclusively by the aggregate instance and are
//!   cleared by the caller after dispatch.

use std::fmt::Display;

/// A persisted domain object with a stable identity.
pub trait Entity {
    /// Identity type, unique within the entity's store.
    type Key: Clone + PartialEq + Display;

    fn id(&self) -> &Self::Key;
}

/// An entity that accumulates domain events until the caller dispatches them.
pub trait AggregateRoot: Entity {
    /// Event type raised by this aggregate.
    type Event: PartialEq;

    /// Pending events in append order.
    fn events(&self) -> &[Self::Event];

    /// Appends one event to the pending queue.
    fn add_event(&mut self, event: Self::Event);

    /// Removes the first pending event equal to `event`, if any.
    fn remove_event(&mut self, event: &Self::Event);

    /// Drops all pending events.
    fn clear_events(&mut self);
}

/// Ordered queue of pending domain events.
///
/// Aggregates embed one of these and forward the `AggregateRoot` event
/// methods to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T: PartialEq> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: T) {
        self.events.push(event);
    }

    /// Removes the first event equal to `event`. Returns whether one existed.
    pub fn remove(&mut self, event: &T) -> bool {
        match self.events.iter().position(|pending| pending == event) {
            Some(index) => {
                self.events.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Hands the pending events to the caller for dispatch, leaving the
    /// queue empty.
    pub fn take(&mut self) -> Vec<T> {
        std::mem::take(&mut self.events)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
