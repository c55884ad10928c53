//! Listener binding: specifier resolution and bind/unbind bookkeeping.
//!
//! Each bind attaches one forwarding callback per registered specifier and
//! records the returned [`ListenerId`]. Unbind removes exactly those ids, so
//! a disconnect always detaches what the matching connect attached.

use tracing::{debug, warn};

use super::metadata::ComponentMetadata;
use crate::config::{BareEventScope, MissingTargetPolicy, RuntimeConfig};
use crate::dom::{Dom, NodeId};
use crate::event::{EventTarget, ForwardingCallback, Listener, ListenerId, ListenerTable, Scope, Specifier};
use crate::selector::SelectorList;

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// A specifier resolved against the current DOM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerTarget {
    pub target: EventTarget,
    pub event_type: String,
}

/// Resolve `specifier` for the component hosted at `host`.
///
/// - `window:event`: the global scope.
/// - `selector:event`: the first match in the host's shadow root, else the
///   first match in the document.
/// - `event`: the host's shadow root, or the host itself under
///   [`BareEventScope::Host`].
///
/// Returns `None` when nothing matches, the selector does not parse, or the
/// event name is empty. Never cached: every call re-queries the DOM.
pub fn resolve(
    specifier: &str,
    dom: &Dom,
    host: NodeId,
    config: &RuntimeConfig,
) -> Option<ListenerTarget> {
    let Specifier { scope, event_type } = Specifier::parse(specifier);
    if event_type.is_empty() {
        return None;
    }

    let target = match scope {
        Scope::Window => EventTarget::Window,
        Scope::Selector(selector) => {
            let list: SelectorList = match selector.parse() {
                Ok(list) => list,
                Err(err) => {
                    debug!(specifier, %err, "listener selector does not parse");
                    return None;
                }
            };
            let in_shadow = dom
                .shadow_root(host)
                .and_then(|shadow| dom.query_selector(shadow, &list));
            let found = in_shadow.or_else(|| dom.query_selector(dom.document(), &list))?;
            EventTarget::Node(found)
        }
        Scope::Own => match config.bare_event_scope {
            BareEventScope::ShadowRoot => EventTarget::Node(dom.shadow_root(host)?),
            BareEventScope::Host => EventTarget::Node(host),
        },
    };

    Some(ListenerTarget { target, event_type })
}

// ---------------------------------------------------------------------------
// ListenerBinder
// ---------------------------------------------------------------------------

/// A listener attached by a bind pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub specifier: String,
    pub id: ListenerId,
}

/// Per-instance record of attached listeners.
#[derive(Debug, Default)]
pub struct ListenerBinder {
    bindings: Vec<Binding>,
}

impl ListenerBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a forwarding callback for every registered specifier.
    ///
    /// A specifier that is still bound from an earlier pass is detached
    /// first, so repeated binds never stack callbacks. Specifiers with no
    /// target are skipped. Returns the number of listeners attached.
    pub fn bind<C>(
        &mut self,
        meta: &ComponentMetadata<C>,
        dom: &Dom,
        listeners: &mut ListenerTable,
        host: NodeId,
        config: &RuntimeConfig,
    ) -> usize {
        let mut attached = 0;
        for def in meta.listeners() {
            if let Some(pos) = self.bindings.iter().position(|b| b.specifier == def.specifier) {
                let stale = self.bindings.remove(pos);
                listeners.remove(stale.id);
            }

            let Some(resolved) = resolve(&def.specifier, dom, host, config) else {
                report_missing(config.missing_target, &def.specifier, &def.handler_name);
                continue;
            };
            let id = listeners.add(Listener {
                target: resolved.target,
                event_type: resolved.event_type,
                callback: ForwardingCallback {
                    host,
                    specifier: def.specifier.clone(),
                },
            });
            self.bindings.push(Binding {
                specifier: def.specifier.clone(),
                id,
            });
            attached += 1;
        }
        attached
    }

    /// Detach every listener attached by previous binds.
    ///
    /// Returns the number of listeners actually removed.
    pub fn unbind(&mut self, listeners: &mut ListenerTable) -> usize {
        self.bindings
            .drain(..)
            .filter(|binding| listeners.remove(binding.id).is_some())
            .count()
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

fn report_missing(policy: MissingTargetPolicy, specifier: &str, handler: &str) {
    match policy {
        MissingTargetPolicy::Silent => {
            debug!(specifier, handler, "listener target not found; skipped");
        }
        MissingTargetPolicy::Warn => {
            warn!(specifier, handler, "listener target not found; skipped");
        }
    }
}
