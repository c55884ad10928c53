//! Listener table keyed by [`ListenerId`].
//!
//! A [`ListenerId`] is the identity of an attached callback: removing by id
//! removes exactly what was added, nothing else.

use slotmap::{new_key_type, SlotMap};

use super::dispatch::EventTarget;
use crate::dom::NodeId;

new_key_type! {
    /// Identity of one attached listener.
    pub struct ListenerId;
}

/// Callback that forwards an event to a component's registered handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardingCallback {
    /// The component instance that owns the handler.
    pub host: NodeId,
    /// The specifier the handler was registered under.
    pub specifier: String,
}

/// One attached listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listener {
    pub target: EventTarget,
    pub event_type: String,
    pub callback: ForwardingCallback,
}

/// All attached listeners, in attachment order.
#[derive(Debug, Default)]
pub struct ListenerTable {
    listeners: SlotMap<ListenerId, Listener>,
    order: Vec<ListenerId>,
}

impl ListenerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener, returning its identity.
    pub fn add(&mut self, listener: Listener) -> ListenerId {
        let id = self.listeners.insert(listener);
        self.order.push(id);
        id
    }

    /// Detach a listener. Returns `None` if it was already gone.
    pub fn remove(&mut self, id: ListenerId) -> Option<Listener> {
        let removed = self.listeners.remove(id)?;
        self.order.retain(|&other| other != id);
        Some(removed)
    }

    pub fn get(&self, id: ListenerId) -> Option<&Listener> {
        self.listeners.get(id)
    }

    /// Ids of listeners for `event_type` on `target`, in attachment order.
    pub fn matching(&self, target: EventTarget, event_type: &str) -> Vec<ListenerId> {
        self.order
            .iter()
            .copied()
            .filter(|&id| {
                self.listeners
                    .get(id)
                    .is_some_and(|l| l.target == target && l.event_type == event_type)
            })
            .collect()
    }

    /// Remove every listener for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(&Listener) -> bool) {
        self.listeners.retain(|_, listener| keep(listener));
        let listeners = &self.listeners;
        self.order.retain(|&id| listeners.contains_key(id));
    }

    /// Number of listeners attached to `target`.
    pub fn count_on(&self, target: EventTarget) -> usize {
        self.listeners.values().filter(|l| l.target == target).count()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
