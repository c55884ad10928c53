//! Lifecycle controller: drives a component through construct, connect,
//! disconnect and attribute-change notifications.
//!
//! The host environment (the [`Runtime`](crate::runtime::Runtime)) holds one
//! boxed [`CustomElement`] per upgraded element and calls the `on_*` hooks.
//! [`Instance`] is the only implementation; the trait erases the component
//! type so instances of different types share one map.
//!
//! ```text
//! Constructed ──connect──▶ Connected ◀──connect── Disconnected
//!                              │                       ▲
//!                              └───────disconnect──────┘
//! ```

use std::any::Any;
use std::rc::Rc;

use tracing::{debug, trace};

use super::binder::ListenerBinder;
use super::coerce::coerce;
use super::context::{write_property, Context};
use super::defaults::{apply_defaults, StagedProperties};
use super::metadata::ComponentMetadata;
use super::traits::Component;
use super::value::PropValue;
use crate::casing::camel_case;
use crate::config::RuntimeConfig;
use crate::dom::{Dom, NodeId};
use crate::event::{Event, ListenerTable};
use crate::render::{RenderOp, RenderScheduler, RenderSink, StyleShim};

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// The parts of the host environment a hook may touch.
pub struct Host<'a> {
    pub dom: &'a mut Dom,
    pub listeners: &'a mut ListenerTable,
    pub scheduler: &'a mut RenderScheduler,
    pub shim: Option<&'a mut (dyn StyleShim + 'static)>,
    pub config: &'a RuntimeConfig,
    /// The element the hook is running for.
    pub node: NodeId,
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Where an instance is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Constructed,
    Connected,
    Disconnected,
}

/// Counters for lifecycle activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LifecycleStats {
    pub connects: usize,
    pub disconnects: usize,
    /// First-connect default passes.
    pub defaults_runs: usize,
    pub binds: usize,
    pub unbinds: usize,
    pub renders: usize,
}

// ---------------------------------------------------------------------------
// CustomElement
// ---------------------------------------------------------------------------

/// Type-erased lifecycle hooks of one element instance.
pub trait CustomElement {
    fn tag_name(&self) -> &str;
    fn state(&self) -> LifecycleState;
    fn stats(&self) -> LifecycleStats;
    fn observed_attributes(&self) -> &[String];

    /// Attach the shadow root if absent.
    fn on_construct(&mut self, host: &mut Host<'_>);
    fn on_connect(&mut self, host: &mut Host<'_>);
    fn on_disconnect(&mut self, host: &mut Host<'_>);
    fn on_attribute_changed(
        &mut self,
        host: &mut Host<'_>,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    );

    /// Run the handler registered under `specifier`. Returns `false` if the
    /// type has no such listener.
    fn invoke_listener(&mut self, host: &mut Host<'_>, specifier: &str, event: &Event) -> bool;

    /// Read a registered property.
    fn property(&self, name: &str) -> Option<PropValue>;
    /// Write a registered property. Returns `false` if the name is unknown.
    fn set_property(&mut self, host: &mut Host<'_>, name: &str, value: PropValue) -> bool;

    /// Run the renderer once and return the shadow-root changes.
    fn render(&mut self, host: &mut Host<'_>) -> Vec<RenderOp>;

    /// Number of listeners currently attached by this instance.
    fn bound_listeners(&self) -> usize;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ---------------------------------------------------------------------------
// Instance
// ---------------------------------------------------------------------------

/// A component value plus its lifecycle bookkeeping.
pub struct Instance<C: Component> {
    component: C,
    meta: Rc<ComponentMetadata<C>>,
    tag: String,
    state: LifecycleState,
    staged: StagedProperties,
    binder: ListenerBinder,
    stats: LifecycleStats,
}

impl<C: Component> Instance<C> {
    /// Create an instance holding `C::default()`.
    ///
    /// `staged` carries property writes made before the element was upgraded;
    /// they are replayed on first connect.
    pub fn new(tag: &str, meta: Rc<ComponentMetadata<C>>, staged: StagedProperties) -> Self {
        Self {
            component: C::default(),
            meta,
            tag: tag.to_owned(),
            state: LifecycleState::Constructed,
            staged,
            binder: ListenerBinder::new(),
            stats: LifecycleStats::default(),
        }
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    /// Mutable access to the component. Does not schedule a render.
    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    /// Whether the first connect has happened.
    pub fn has_connected(&self) -> bool {
        self.stats.connects > 0
    }

    /// Schedule a render if connected.
    ///
    /// Writes while disconnected schedule nothing; the next connect
    /// invalidates unconditionally, so their effect is rendered then.
    pub fn invalidate(&self, host: &mut Host<'_>) {
        if self.state != LifecycleState::Connected {
            return;
        }
        if host.scheduler.invalidate(host.node) {
            trace!(tag = %self.tag, "render scheduled");
        } else {
            trace!(tag = %self.tag, "render coalesced");
        }
    }

    fn write(&mut self, host: &mut Host<'_>, name: &str, value: PropValue) -> bool {
        // A direct write supersedes any value still waiting for replay.
        self.staged.take(name);
        let observe = self.has_connected();
        let written = write_property(&mut self.component, &*self.meta, name, value, observe);
        if written {
            self.invalidate(host);
        }
        written
    }
}

impl<C: Component> CustomElement for Instance<C> {
    fn tag_name(&self) -> &str {
        &self.tag
    }

    fn state(&self) -> LifecycleState {
        self.state
    }

    fn stats(&self) -> LifecycleStats {
        self.stats
    }

    fn observed_attributes(&self) -> &[String] {
        self.meta.observed_attributes()
    }

    fn on_construct(&mut self, host: &mut Host<'_>) {
        if let Err(err) = host.dom.attach_shadow(host.node, host.config.shadow_mode) {
            debug!(tag = %self.tag, %err, "shadow root not attached");
        }
    }

    fn on_connect(&mut self, host: &mut Host<'_>) {
        if self.state == LifecycleState::Connected {
            return;
        }
        let first = !self.has_connected();
        self.state = LifecycleState::Connected;
        self.stats.connects += 1;
        debug!(tag = %self.tag, first, "connected");

        if first {
            apply_defaults(&mut self.component, &*self.meta, &mut self.staged);
            self.stats.defaults_runs += 1;
        }

        let bound = self
            .binder
            .bind(&*self.meta, &*host.dom, &mut *host.listeners, host.node, host.config);
        self.stats.binds += 1;
        trace!(tag = %self.tag, bound, "listeners bound");

        self.component.connected();
        self.invalidate(host);
    }

    fn on_disconnect(&mut self, host: &mut Host<'_>) {
        if self.state != LifecycleState::Connected {
            return;
        }
        let removed = self.binder.unbind(host.listeners);
        self.stats.unbinds += 1;
        self.stats.disconnects += 1;
        self.state = LifecycleState::Disconnected;
        debug!(tag = %self.tag, removed, "disconnected");
    }

    fn on_attribute_changed(
        &mut self,
        host: &mut Host<'_>,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) {
        self.component.attribute_changed(name, old, new);

        let present = host
            .dom
            .get(host.node)
            .is_some_and(|data| data.has_attribute(name));
        if let Some(value) = coerce(present, new, old).into_value() {
            self.write(host, &camel_case(name), value);
        }
    }

    fn invoke_listener(&mut self, host: &mut Host<'_>, specifier: &str, event: &Event) -> bool {
        let Some(def) = self.meta.listener(specifier) else {
            return false;
        };
        let observe = self.has_connected();
        let mut ctx = Context::new(&mut self.component, &*self.meta, observe);
        (def.handler)(&mut ctx, event);
        if ctx.invalidated() {
            self.invalidate(host);
        }
        true
    }

    fn property(&self, name: &str) -> Option<PropValue> {
        let prop = self.meta.property(name)?;
        match self.staged.get(name) {
            Some(value) => Some(value.clone()),
            None => Some((prop.get)(&self.component)),
        }
    }

    fn set_property(&mut self, host: &mut Host<'_>, name: &str, value: PropValue) -> bool {
        self.write(host, name, value)
    }

    fn render(&mut self, host: &mut Host<'_>) -> Vec<RenderOp> {
        self.stats.renders += 1;
        trace!(tag = %self.tag, count = self.stats.renders, "render");

        let hook = self.meta.renderer();
        let needs_output = host.shim.is_some() || hook.is_none();
        let template = if needs_output {
            self.component.render()
        } else {
            None
        };

        if let (Some(shim), Some(template)) = (host.shim.as_deref_mut(), template.as_ref()) {
            shim.prepare_template(template, &self.tag);
        }

        let mut sink = RenderSink::new();
        match hook {
            Some(renderer) => {
                let component = &self.component;
                renderer.render(&|| component.render(), &mut sink);
            }
            None => {
                if let Some(template) = template {
                    sink.replace(template);
                }
            }
        }
        sink.into_ops()
    }

    fn bound_listeners(&self) -> usize {
        self.binder.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
