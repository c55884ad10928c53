//! Events and propagation-path computation.

use crate::dom::{Dom, NodeId};

// ---------------------------------------------------------------------------
// EventTarget
// ---------------------------------------------------------------------------

/// Something a listener can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// The global scope.
    Window,
    /// A node: element, shadow root or document.
    Node(NodeId),
}

impl EventTarget {
    /// The node, if this target is one.
    pub fn node(self) -> Option<NodeId> {
        match self {
            EventTarget::Node(id) => Some(id),
            EventTarget::Window => None,
        }
    }
}

impl From<NodeId> for EventTarget {
    fn from(id: NodeId) -> Self {
        EventTarget::Node(id)
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// An event being delivered to listeners.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub event_type: String,
    /// Where the event was dispatched.
    pub target: EventTarget,
    /// The target whose listeners are currently running.
    pub current_target: EventTarget,
    pub bubbles: bool,
    /// Free-form payload.
    pub detail: Option<String>,
}

impl Event {
    /// A non-bubbling event of the given type.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            target: EventTarget::Window,
            current_target: EventTarget::Window,
            bubbles: false,
            detail: None,
        }
    }

    /// A bubbling event of the given type.
    pub fn bubbling(event_type: impl Into<String>) -> Self {
        Self {
            bubbles: true,
            ..Self::new(event_type)
        }
    }

    /// Attach a detail payload (builder).
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Compute the order in which targets see an event dispatched at `target`.
///
/// A non-bubbling event only reaches `target`. A bubbling event continues
/// through the composed ancestors (a shadow root passes to its host) and, when
/// the path reaches the document, ends at [`EventTarget::Window`].
pub fn propagation_path(dom: &Dom, target: EventTarget, bubbles: bool) -> Vec<EventTarget> {
    let node = match target {
        EventTarget::Window => return vec![EventTarget::Window],
        EventTarget::Node(node) if dom.contains(node) => node,
        EventTarget::Node(_) => return Vec::new(),
    };
    if !bubbles {
        return vec![target];
    }

    let mut path = vec![target];
    path.extend(dom.composed_ancestors(node).into_iter().map(EventTarget::Node));
    if dom.is_connected(node) {
        path.push(EventTarget::Window);
    }
    path
}
