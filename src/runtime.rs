//! The host environment: document, element registry, listener table and the
//! render checkpoint, tied together.
//!
//! [`Runtime`] plays the part of the browser around custom elements. It owns
//! the [`Dom`], upgrades elements whose tag is defined, fires lifecycle hooks
//! as subtrees connect and disconnect, forwards observed attribute mutations,
//! delivers events to bound listeners, and drains queued renders at
//! [`flush`](Runtime::flush).
//!
//! ```
//! use gilt_elements::component::{Component, ComponentMetadata};
//! use gilt_elements::runtime::Runtime;
//! use gilt_elements::template::{Markup, Template};
//!
//! #[derive(Default)]
//! struct Hello {
//!     name: String,
//! }
//!
//! impl Component for Hello {
//!     fn metadata() -> ComponentMetadata<Self> {
//!         ComponentMetadata::<Self>::builder()
//!             .attribute("name", |h| h.name.clone().into(), |h, v| h.name = v.to_string())
//!             .build()
//!     }
//!
//!     fn render(&self) -> Option<Template> {
//!         Some(Markup::element("p").text(format!("Hello, {}", self.name)).into())
//!     }
//! }
//!
//! let mut rt = Runtime::new();
//! rt.define::<Hello>("x-hello").unwrap();
//! let el = rt.create_element("x-hello");
//! rt.task(|rt| {
//!     rt.set_attribute(el, "name", "world").unwrap();
//!     rt.append_child(rt.document(), el).unwrap();
//! });
//! assert_eq!(rt.shadow_html(el).unwrap(), "<p>Hello, world</p>");
//! ```

use slotmap::SecondaryMap;
use tracing::{debug, trace};

use crate::component::{
    Component, CustomElement, Host, Instance, LifecycleState, LifecycleStats, PropValue,
    StagedProperties,
};
use crate::config::RuntimeConfig;
use crate::dom::{Dom, NodeData, NodeId, NodeKind, ShadowRootMode};
use crate::error::{DomError, Result};
use crate::event::{propagation_path, Event, EventTarget, ListenerTable};
use crate::registry::ElementRegistry;
use crate::render::{RenderOp, RenderScheduler, StyleShim};
use crate::selector::SelectorList;
use crate::template::Template;

/// Headless host for custom elements.
pub struct Runtime {
    dom: Dom,
    listeners: ListenerTable,
    registry: ElementRegistry,
    instances: SecondaryMap<NodeId, Box<dyn CustomElement>>,
    staged: SecondaryMap<NodeId, StagedProperties>,
    scheduler: RenderScheduler,
    shim: Option<Box<dyn StyleShim>>,
    config: RuntimeConfig,
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            dom: Dom::new(),
            listeners: ListenerTable::new(),
            registry: ElementRegistry::new(),
            instances: SecondaryMap::new(),
            staged: SecondaryMap::new(),
            scheduler: RenderScheduler::new(),
            shim: None,
            config,
        }
    }

    /// Install a style shim (builder).
    pub fn with_style_shim(mut self, shim: Box<dyn StyleShim>) -> Self {
        self.shim = Some(shim);
        self
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn document(&self) -> NodeId {
        self.dom.document()
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    // ── Definition and upgrade ───────────────────────────────────────

    /// Define `C` under `tag` and upgrade existing elements with that tag.
    ///
    /// Connected elements are upgraded in tree order, then detached ones.
    pub fn define<C: Component>(&mut self, tag: &str) -> Result<()> {
        self.registry.define::<C>(tag)?;

        let mut candidates: Vec<NodeId> = self
            .dom
            .walk_composed(self.dom.document())
            .into_iter()
            .filter(|&id| self.has_tag(id, tag))
            .collect();
        for id in self.dom.elements_by_tag(tag) {
            if !candidates.contains(&id) {
                candidates.push(id);
            }
        }
        for id in candidates {
            self.upgrade(id);
        }
        Ok(())
    }

    fn has_tag(&self, id: NodeId, tag: &str) -> bool {
        self.dom
            .get(id)
            .and_then(NodeData::tag_name)
            .is_some_and(|t| t == tag)
    }

    /// Construct the component for `id` if its tag is defined.
    ///
    /// Observed attributes already present are replayed as changes from
    /// `None`, in observed order; the element is then connected if it is in
    /// the document.
    fn upgrade(&mut self, id: NodeId) {
        if self.instances.contains_key(id) {
            return;
        }
        let Some(tag) = self.dom.get(id).and_then(NodeData::tag_name) else {
            return;
        };
        let Some(definition) = self.registry.get(tag) else {
            return;
        };

        let staged = self.staged.remove(id).unwrap_or_default();
        self.instances.insert(id, definition.construct(staged));
        debug!(tag = definition.tag_name(), "upgrading element");
        self.with_instance(id, |el, host| el.on_construct(host));

        for name in definition.observed_attributes() {
            let value = self
                .dom
                .get(id)
                .and_then(|data| data.attribute(name))
                .map(str::to_owned);
            if let Some(value) = value {
                self.with_instance(id, |el, host| {
                    el.on_attribute_changed(host, name, None, Some(&value))
                });
            }
        }

        if self.dom.is_connected(id) {
            self.with_instance(id, |el, host| el.on_connect(host));
        }
    }

    // ── Tree mutation ────────────────────────────────────────────────

    /// Create a detached element, upgraded if its tag is defined.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = self.dom.create(NodeData::element(tag));
        self.upgrade(id);
        id
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.dom.create(NodeData::text(text))
    }

    /// Move `child` to the end of `parent`'s children.
    ///
    /// A connected child is disconnected first; the subtree is connected
    /// again if `parent` is in the document.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.dom.can_append(parent, child)?;
        if self.dom.is_connected(child) && self.dom.parent(child).is_some() {
            self.disconnect_subtree(child);
        }
        self.dom.append_child(parent, child)?;
        if self.dom.is_connected(child) {
            self.connect_subtree(child);
        }
        Ok(())
    }

    /// Detach `child` from its parent, disconnecting it.
    pub fn remove_child(&mut self, child: NodeId) -> Result<()> {
        if !self.dom.contains(child) {
            return Err(DomError::NodeNotFound.into());
        }
        if self.dom.is_connected(child) {
            self.disconnect_subtree(child);
        }
        self.dom.detach(child);
        Ok(())
    }

    /// Disconnect and free `id`, its subtree and any shadow trees within.
    pub fn destroy(&mut self, id: NodeId) {
        if self.dom.is_connected(id) {
            self.disconnect_subtree(id);
        }
        let removed = self.dom.remove(id);
        for &node in &removed {
            self.instances.remove(node);
            self.staged.remove(node);
            self.scheduler.cancel(node);
        }
        self.listeners.retain(|listener| {
            !removed.contains(&listener.callback.host)
                && listener.target.node().is_none_or(|n| !removed.contains(&n))
        });
    }

    fn connect_subtree(&mut self, root: NodeId) {
        for id in self.dom.walk_composed(root) {
            if self.instances.contains_key(id) {
                self.with_instance(id, |el, host| el.on_connect(host));
            } else {
                self.upgrade(id);
            }
        }
    }

    fn disconnect_subtree(&mut self, root: NodeId) {
        for id in self.dom.walk_composed(root) {
            self.with_instance(id, |el, host| el.on_disconnect(host));
        }
    }

    // ── Attributes and properties ────────────────────────────────────

    /// Set an attribute, notifying the component if the name is observed.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        let data = self.element_mut(id)?;
        let old = data.set_attribute(name, value);
        self.notify_attribute(id, name, old.as_deref(), Some(value));
        Ok(())
    }

    /// Remove an attribute. Notifies only if it was present.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<()> {
        let data = self.element_mut(id)?;
        if let Some(old) = data.remove_attribute(name) {
            self.notify_attribute(id, name, Some(&old), None);
        }
        Ok(())
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.dom.get(id)?.attribute(name).map(str::to_owned)
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        let data = self.dom.get_mut(id).ok_or(DomError::NodeNotFound)?;
        if !data.is_element() {
            return Err(DomError::NotAnElement.into());
        }
        Ok(data)
    }

    fn notify_attribute(&mut self, id: NodeId, name: &str, old: Option<&str>, new: Option<&str>) {
        let name = name.to_ascii_lowercase();
        let observed = self
            .instances
            .get(id)
            .is_some_and(|el| el.observed_attributes().contains(&name));
        if observed {
            self.with_instance(id, |el, host| el.on_attribute_changed(host, &name, old, new));
        }
    }

    /// Write a property.
    ///
    /// On an upgraded element this runs the setter and returns whether the
    /// property exists. On an element that is not upgraded yet the value is
    /// staged for replay on first connect and `true` is returned.
    pub fn set_property(&mut self, id: NodeId, name: &str, value: impl Into<PropValue>) -> Result<bool> {
        let value = value.into();
        if let Some(written) = self.with_instance(id, |el, host| el.set_property(host, name, value.clone())) {
            return Ok(written);
        }
        self.element_mut(id)?;
        trace!(property = name, "staging property before upgrade");
        match self.staged.get_mut(id) {
            Some(staged) => staged.insert(name, value),
            None => {
                let mut staged = StagedProperties::new();
                staged.insert(name, value);
                self.staged.insert(id, staged);
            }
        }
        Ok(true)
    }

    /// Read a property, falling back to a staged value before upgrade.
    pub fn property(&self, id: NodeId, name: &str) -> Option<PropValue> {
        match self.instances.get(id) {
            Some(el) => el.property(name),
            None => self.staged.get(id)?.get(name).cloned(),
        }
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Deliver `event` along its propagation path.
    ///
    /// Returns the number of handlers invoked. Renders requested by handlers
    /// are queued, not run.
    pub fn dispatch_event(&mut self, target: impl Into<EventTarget>, mut event: Event) -> usize {
        let target = target.into();
        event.target = target;
        let mut invoked = 0;

        for current in propagation_path(&self.dom, target, event.bubbles) {
            event.current_target = current;
            for listener_id in self.listeners.matching(current, &event.event_type) {
                // A handler may have caused this listener to be removed.
                let Some(listener) = self.listeners.get(listener_id) else {
                    continue;
                };
                let callback = listener.callback.clone();
                let handled = self.with_instance(callback.host, |el, host| {
                    el.invoke_listener(host, &callback.specifier, &event)
                });
                if handled == Some(true) {
                    invoked += 1;
                }
            }
        }
        invoked
    }

    /// Number of listeners attached anywhere.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of listeners attached to `target`.
    pub fn listener_count_on(&self, target: impl Into<EventTarget>) -> usize {
        self.listeners.count_on(target.into())
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// The render checkpoint: run every queued render.
    ///
    /// Renders requested while draining run in the same checkpoint. Returns
    /// the number of renders performed.
    pub fn flush(&mut self) -> usize {
        let mut rendered = 0;
        while let Some(id) = self.scheduler.next() {
            if self.render_now(id) {
                rendered += 1;
            }
        }
        if rendered > 0 {
            trace!(rendered, "checkpoint drained");
        }
        rendered
    }

    /// Run `work` as one unit of synchronous work, then the checkpoint.
    pub fn task<R>(&mut self, work: impl FnOnce(&mut Self) -> R) -> R {
        let result = work(self);
        self.flush();
        result
    }

    /// Whether `id` has a render queued.
    pub fn is_render_pending(&self, id: NodeId) -> bool {
        self.scheduler.is_pending(id)
    }

    fn render_now(&mut self, id: NodeId) -> bool {
        let Some(ops) = self.with_instance(id, |el, host| el.render(host)) else {
            return false;
        };
        let Some(shadow) = self.dom.shadow_root(id) else {
            debug!("render output dropped: element has no shadow root");
            return true;
        };
        for op in ops {
            match op {
                RenderOp::Replace(template) => {
                    self.clear_children(shadow);
                    self.insert_template(shadow, &template);
                }
                RenderOp::Append(template) => self.insert_template(shadow, &template),
                RenderOp::Clear => self.clear_children(shadow),
            }
        }
        true
    }

    fn clear_children(&mut self, parent: NodeId) {
        for child in self.dom.children(parent).to_vec() {
            self.destroy(child);
        }
    }

    fn insert_template(&mut self, parent: NodeId, template: &Template) {
        match self.dom.append_template(parent, template) {
            Ok(created) => {
                for top in created {
                    for id in self.dom.walk_composed(top) {
                        self.upgrade(id);
                    }
                }
            }
            Err(err) => debug!(%err, "template not materialized"),
        }
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// The element's shadow root, unless it was attached in closed mode.
    pub fn shadow_root(&self, id: NodeId) -> Option<NodeId> {
        let shadow = self.dom.shadow_root(id)?;
        match self.dom.get(shadow)?.kind {
            NodeKind::ShadowRoot {
                mode: ShadowRootMode::Open,
                ..
            } => Some(shadow),
            _ => None,
        }
    }

    /// Markup of the element's open shadow root.
    pub fn shadow_html(&self, id: NodeId) -> Option<String> {
        self.shadow_root(id).map(|shadow| self.dom.inner_html(shadow))
    }

    pub fn inner_html(&self, id: NodeId) -> String {
        self.dom.inner_html(id)
    }

    pub fn outer_html(&self, id: NodeId) -> String {
        self.dom.outer_html(id)
    }

    /// First match for `selector` below `scope`, in tree order.
    pub fn query_selector(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>> {
        let list: SelectorList = selector.parse()?;
        Ok(self.dom.query_selector(scope, &list))
    }

    /// The component behind `id`, if it is an upgraded `C`.
    pub fn component<C: Component>(&self, id: NodeId) -> Option<&C> {
        self.instances
            .get(id)?
            .as_any()
            .downcast_ref::<Instance<C>>()
            .map(Instance::component)
    }

    /// Mutate the component behind `id` and schedule a render.
    pub fn update<C: Component, R>(&mut self, id: NodeId, f: impl FnOnce(&mut C) -> R) -> Option<R> {
        self.with_instance(id, |el, host| {
            let instance = el.as_any_mut().downcast_mut::<Instance<C>>()?;
            let result = f(instance.component_mut());
            instance.invalidate(host);
            Some(result)
        })
        .flatten()
    }

    pub fn lifecycle_state(&self, id: NodeId) -> Option<LifecycleState> {
        self.instances.get(id).map(|el| el.state())
    }

    pub fn stats(&self, id: NodeId) -> Option<LifecycleStats> {
        self.instances.get(id).map(|el| el.stats())
    }

    /// Number of renders `id` has performed.
    pub fn render_count(&self, id: NodeId) -> usize {
        self.stats(id).map_or(0, |s| s.renders)
    }

    /// Number of listeners `id` currently has bound.
    pub fn bound_listener_count(&self, id: NodeId) -> usize {
        self.instances.get(id).map_or(0, |el| el.bound_listeners())
    }

    pub fn is_upgraded(&self, id: NodeId) -> bool {
        self.instances.contains_key(id)
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Run `f` against the instance for `id` with a [`Host`] over the rest of
    /// the runtime. The instance is taken out of the map while `f` runs.
    fn with_instance<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn CustomElement, &mut Host<'_>) -> R,
    ) -> Option<R> {
        let mut instance = self.instances.remove(id)?;
        let result = {
            let mut host = Host {
                dom: &mut self.dom,
                listeners: &mut self.listeners,
                scheduler: &mut self.scheduler,
                shim: self.shim.as_deref_mut(),
                config: &self.config,
                node: id,
            };
            f(&mut *instance, &mut host)
        };
        if self.dom.contains(id) {
            self.instances.insert(id, instance);
        }
        Some(result)
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::component::{ComponentMetadata, Context};
    use crate::config::BareEventScope;
    use crate::template::Markup;
    use pretty_assertions::assert_eq;

    // ── Fixtures ─────────────────────────────────────────────────────

    #[derive(Default)]
    struct Toggle {
        open: bool,
        label: String,
        clicks: usize,
    }

    fn on_click(ctx: &mut Context<'_, Toggle>, _event: &Event) {
        ctx.component_mut().clicks += 1;
        let open = !ctx.component().open;
        ctx.set("open", open);
    }

    impl Component for Toggle {
        fn metadata() -> ComponentMetadata<Self> {
            ComponentMetadata::<Self>::builder()
                .attribute("open", |t| t.open.into(), |t, v| t.open = v.is_truthy())
                .attribute("label", |t| t.label.clone().into(), |t, v| t.label = v.to_string())
                .listen("click", "on_click", on_click)
                .build()
        }

        fn render(&self) -> Option<Template> {
            Some(
                Markup::element("button")
                    .flag_if("aria-pressed", self.open)
                    .text(&self.label)
                    .into(),
            )
        }
    }

    #[derive(Default)]
    struct Wrapper;

    impl Component for Wrapper {
        fn metadata() -> ComponentMetadata<Self> {
            ComponentMetadata::default()
        }

        fn render(&self) -> Option<Template> {
            Some(Markup::element("x-toggle").attr("label", "inner").into())
        }
    }

    fn runtime() -> Runtime {
        let mut rt = Runtime::new();
        rt.define::<Toggle>("x-toggle").unwrap();
        rt
    }

    fn mount(rt: &mut Runtime, tag: &str) -> NodeId {
        let el = rt.create_element(tag);
        let doc = rt.document();
        rt.append_child(doc, el).unwrap();
        el
    }

    // ── Upgrade ──────────────────────────────────────────────────────

    #[test]
    fn create_element_upgrades_defined_tags() {
        let mut rt = runtime();
        let el = rt.create_element("x-toggle");
        let plain = rt.create_element("div");
        assert!(rt.is_upgraded(el));
        assert!(!rt.is_upgraded(plain));
        assert_eq!(rt.lifecycle_state(el), Some(LifecycleState::Constructed));
        assert!(rt.shadow_root(el).is_some());
    }

    #[test]
    fn define_upgrades_existing_elements() {
        let mut rt = Runtime::new();
        let el = mount(&mut rt, "x-toggle");
        rt.set_attribute(el, "open", "").unwrap();
        rt.set_property(el, "label", "early").unwrap();
        assert!(!rt.is_upgraded(el));
        assert_eq!(rt.property(el, "label"), Some(PropValue::from("early")));

        rt.define::<Toggle>("x-toggle").unwrap();
        assert_eq!(rt.lifecycle_state(el), Some(LifecycleState::Connected));
        let toggle = rt.component::<Toggle>(el).unwrap();
        assert!(toggle.open);
        assert_eq!(toggle.label, "early");
    }

    #[test]
    fn define_rejects_bad_names() {
        let mut rt = Runtime::new();
        assert!(rt.define::<Toggle>("toggle").is_err());
        rt.define::<Toggle>("x-toggle").unwrap();
        assert!(rt.define::<Toggle>("x-toggle").is_err());
    }

    // ── Connection ───────────────────────────────────────────────────

    #[test]
    fn append_connects_and_remove_disconnects() {
        let mut rt = runtime();
        let el = mount(&mut rt, "x-toggle");
        assert_eq!(rt.lifecycle_state(el), Some(LifecycleState::Connected));
        assert_eq!(rt.bound_listener_count(el), 1);

        rt.remove_child(el).unwrap();
        assert_eq!(rt.lifecycle_state(el), Some(LifecycleState::Disconnected));
        assert_eq!(rt.listener_count(), 0);
    }

    #[test]
    fn moving_a_connected_element_reconnects() {
        let mut rt = runtime();
        let doc = rt.document();
        let section = rt.create_element("section");
        rt.append_child(doc, section).unwrap();
        let el = mount(&mut rt, "x-toggle");

        rt.append_child(section, el).unwrap();
        let stats = rt.stats(el).unwrap();
        assert_eq!(stats.connects, 2);
        assert_eq!(stats.disconnects, 1);
        assert_eq!(stats.defaults_runs, 1);
        assert_eq!(rt.listener_count(), 1);
    }

    #[test]
    fn rejected_move_leaves_element_connected() {
        let mut rt = runtime();
        let el = mount(&mut rt, "x-toggle");
        let inner = rt.create_element("div");
        rt.append_child(el, inner).unwrap();

        assert!(rt.append_child(inner, el).is_err());
        assert_eq!(rt.lifecycle_state(el), Some(LifecycleState::Connected));
        assert_eq!(rt.bound_listener_count(el), 1);
        assert_eq!(rt.stats(el).unwrap().disconnects, 0);
        assert_eq!(rt.dom().parent(el), Some(rt.document()));
    }

    #[test]
    fn property_write_between_upgrade_and_connect_is_kept() {
        let mut rt = Runtime::new();
        let el = rt.create_element("x-toggle");
        rt.set_property(el, "label", "early").unwrap();
        rt.define::<Toggle>("x-toggle").unwrap();
        assert_eq!(rt.lifecycle_state(el), Some(LifecycleState::Constructed));
        assert_eq!(rt.property(el, "label"), Some(PropValue::from("early")));

        rt.set_property(el, "label", "late").unwrap();
        let doc = rt.document();
        rt.append_child(doc, el).unwrap();
        assert_eq!(rt.component::<Toggle>(el).unwrap().label, "late");
    }

    #[test]
    fn append_rejects_missing_nodes() {
        let mut rt = runtime();
        let el = rt.create_element("x-toggle");
        rt.destroy(el);
        let doc = rt.document();
        assert!(rt.append_child(doc, el).is_err());
        assert!(rt.remove_child(el).is_err());
    }

    // ── Rendering ────────────────────────────────────────────────────

    #[test]
    fn connect_renders_once_at_checkpoint() {
        let mut rt = runtime();
        let el = mount(&mut rt, "x-toggle");
        assert_eq!(rt.render_count(el), 0);
        assert!(rt.is_render_pending(el));
        assert_eq!(rt.flush(), 1);
        assert_eq!(rt.render_count(el), 1);
        assert_eq!(rt.shadow_html(el).unwrap(), "<button></button>");
        assert_eq!(rt.flush(), 0);
    }

    #[test]
    fn attribute_writes_coalesce() {
        let mut rt = runtime();
        let el = rt.task(|rt| mount(rt, "x-toggle"));
        rt.task(|rt| {
            rt.set_attribute(el, "open", "").unwrap();
            rt.set_attribute(el, "label", "A").unwrap();
            rt.set_attribute(el, "label", "B").unwrap();
            rt.set_attribute(el, "data-ignored", "1").unwrap();
        });
        assert_eq!(rt.render_count(el), 2);
        assert_eq!(
            rt.shadow_html(el).unwrap(),
            "<button aria-pressed>B</button>"
        );
    }

    #[test]
    fn remove_attribute_coerces_to_false() {
        let mut rt = runtime();
        let el = rt.task(|rt| mount(rt, "x-toggle"));
        rt.set_attribute(el, "open", "").unwrap();
        assert_eq!(rt.property(el, "open"), Some(PropValue::Bool(true)));
        rt.remove_attribute(el, "open").unwrap();
        assert_eq!(rt.property(el, "open"), Some(PropValue::Bool(false)));
        rt.remove_attribute(el, "open").unwrap();
    }

    #[test]
    fn nested_components_upgrade_inside_shadow() {
        let mut rt = runtime();
        rt.define::<Wrapper>("x-wrapper").unwrap();
        let outer = rt.task(|rt| mount(rt, "x-wrapper"));

        let shadow = rt.shadow_root(outer).unwrap();
        let inner = rt.query_selector(shadow, "x-toggle").unwrap().unwrap();
        assert_eq!(rt.lifecycle_state(inner), Some(LifecycleState::Connected));
        assert_eq!(rt.shadow_html(inner).unwrap(), "<button>inner</button>");
    }

    #[test]
    fn rerender_destroys_previous_content() {
        let mut rt = runtime();
        rt.define::<Wrapper>("x-wrapper").unwrap();
        let outer = rt.task(|rt| mount(rt, "x-wrapper"));
        let shadow = rt.shadow_root(outer).unwrap();
        let first = rt.query_selector(shadow, "x-toggle").unwrap().unwrap();

        rt.task(|rt| rt.update::<Wrapper, _>(outer, |_| ()));
        let second = rt.query_selector(shadow, "x-toggle").unwrap().unwrap();
        assert_ne!(first, second);
        assert!(!rt.dom().contains(first));
        assert!(!rt.is_upgraded(first));
    }

    #[test]
    fn closed_shadow_is_hidden_but_rendered() {
        let config = RuntimeConfig::new().with_shadow_mode(ShadowRootMode::Closed);
        let mut rt = Runtime::with_config(config);
        rt.define::<Toggle>("x-toggle").unwrap();
        let el = rt.task(|rt| mount(rt, "x-toggle"));
        assert_eq!(rt.shadow_root(el), None);
        assert_eq!(rt.render_count(el), 1);
    }

    // ── Events ───────────────────────────────────────────────────────

    #[test]
    fn bubbling_click_reaches_shadow_listener() {
        let mut rt = runtime();
        let el = rt.task(|rt| mount(rt, "x-toggle"));
        let shadow = rt.shadow_root(el).unwrap();
        let button = rt.query_selector(shadow, "button").unwrap().unwrap();

        let invoked = rt.task(|rt| rt.dispatch_event(button, Event::bubbling("click")));
        assert_eq!(invoked, 1);
        let toggle = rt.component::<Toggle>(el).unwrap();
        assert_eq!(toggle.clicks, 1);
        assert!(toggle.open);
        assert_eq!(rt.render_count(el), 2);
    }

    #[test]
    fn non_bubbling_click_on_button_is_not_seen() {
        let mut rt = runtime();
        let el = rt.task(|rt| mount(rt, "x-toggle"));
        let shadow = rt.shadow_root(el).unwrap();
        let button = rt.query_selector(shadow, "button").unwrap().unwrap();
        assert_eq!(rt.dispatch_event(button, Event::new("click")), 0);
    }

    #[test]
    fn host_scope_binds_on_element() {
        let mut rt = Runtime::with_config(
            RuntimeConfig::new().with_bare_event_scope(BareEventScope::Host),
        );
        rt.define::<Toggle>("x-toggle").unwrap();
        let el = rt.task(|rt| mount(rt, "x-toggle"));
        assert_eq!(rt.listener_count_on(el), 1);
        assert_eq!(rt.dispatch_event(el, Event::new("click")), 1);
    }

    #[test]
    fn destroy_drops_instance_and_listeners() {
        let mut rt = runtime();
        let el = mount(&mut rt, "x-toggle");
        rt.destroy(el);
        assert!(!rt.is_upgraded(el));
        assert_eq!(rt.listener_count(), 0);
        assert_eq!(rt.flush(), 0);
    }

    // ── Style shim ───────────────────────────────────────────────────

    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl StyleShim for Recorder {
        fn prepare_template(&mut self, template: &Template, tag_name: &str) {
            self.0
                .borrow_mut()
                .push(format!("{tag_name}: {}", template.to_html()));
        }
    }

    #[test]
    fn shim_sees_each_render_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut rt = Runtime::new().with_style_shim(Box::new(Recorder(Rc::clone(&log))));
        rt.define::<Toggle>("x-toggle").unwrap();
        let el = rt.task(|rt| mount(rt, "x-toggle"));
        rt.task(|rt| rt.set_attribute(el, "label", "x").unwrap());

        assert_eq!(
            *log.borrow(),
            vec![
                "x-toggle: <button></button>".to_owned(),
                "x-toggle: <button>x</button>".to_owned(),
            ]
        );
    }
}
