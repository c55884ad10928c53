//! Pilot: programmatic interaction with a headless [`Runtime`].
//!
//! Every input method runs as one task, so the render checkpoint has already
//! happened when it returns. Use [`Runtime`] directly through
//! [`runtime_mut`](Pilot::runtime_mut) to batch several writes into one
//! checkpoint.

use std::cell::RefCell;
use std::rc::Rc;

use crate::component::{Component, LifecycleState, PropValue};
use crate::config::RuntimeConfig;
use crate::dom::NodeId;
use crate::error::Result;
use crate::event::{Event, EventTarget};
use crate::render::StyleShim;
use crate::runtime::Runtime;
use crate::template::Template;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless runtime driver for testing.
///
/// # Examples
///
/// ```
/// use gilt_elements::component::{Component, ComponentMetadata};
/// use gilt_elements::template::{Markup, Template};
/// use gilt_elements::testing::Pilot;
///
/// #[derive(Default)]
/// struct Badge {
///     count: f64,
/// }
///
/// impl Component for Badge {
///     fn metadata() -> ComponentMetadata<Self> {
///         ComponentMetadata::<Self>::builder()
///             .attribute("count", |b| b.count.into(), |b, v| b.count = v.as_number().unwrap_or(0.0))
///             .build()
///     }
///
///     fn render(&self) -> Option<Template> {
///         Some(Markup::element("b").text(self.count).into())
///     }
/// }
///
/// let mut pilot = Pilot::new();
/// pilot.define::<Badge>("x-badge");
/// let badge = pilot.mount("x-badge");
/// pilot.set_property(badge, "count", 3.0);
/// assert_eq!(pilot.html(badge), "<b>3</b>");
/// ```
pub struct Pilot {
    runtime: Runtime,
}

impl Pilot {
    pub fn new() -> Self {
        Self {
            runtime: Runtime::new(),
        }
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            runtime: Runtime::with_config(config),
        }
    }

    /// Install a style shim (builder).
    pub fn with_style_shim(self, shim: impl StyleShim + 'static) -> Self {
        Self {
            runtime: self.runtime.with_style_shim(Box::new(shim)),
        }
    }

    /// Define `C` under `tag`.
    ///
    /// # Panics
    ///
    /// If the name is invalid or already defined.
    pub fn define<C: Component>(&mut self, tag: &str) {
        if let Err(err) = self.runtime.define::<C>(tag) {
            panic!("cannot define <{tag}>: {err}");
        }
    }

    // ── Tree ─────────────────────────────────────────────────────────

    /// Create `tag` and append it to the document.
    pub fn mount(&mut self, tag: &str) -> NodeId {
        let document = self.runtime.document();
        self.mount_in(document, tag)
    }

    /// Create `tag` and append it to `parent`.
    pub fn mount_in(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.runtime.task(|rt| {
            let el = rt.create_element(tag);
            if let Err(err) = rt.append_child(parent, el) {
                panic!("cannot mount <{tag}>: {err}");
            }
            el
        })
    }

    /// Create `tag` with attributes already set, then append it.
    pub fn mount_with(&mut self, tag: &str, attributes: &[(&str, &str)]) -> Result<NodeId> {
        self.runtime.task(|rt| {
            let el = rt.create_element(tag);
            for (name, value) in attributes {
                rt.set_attribute(el, name, value)?;
            }
            rt.append_child(rt.document(), el)?;
            Ok(el)
        })
    }

    pub fn append(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.runtime.task(|rt| rt.append_child(parent, child))
    }

    pub fn remove(&mut self, node: NodeId) -> Result<()> {
        self.runtime.task(|rt| rt.remove_child(node))
    }

    // ── Input simulation ─────────────────────────────────────────────

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        self.runtime.task(|rt| rt.set_attribute(node, name, value))
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<()> {
        self.runtime.task(|rt| rt.remove_attribute(node, name))
    }

    pub fn set_property(&mut self, node: NodeId, name: &str, value: impl Into<PropValue>) -> bool {
        self.runtime
            .task(|rt| rt.set_property(node, name, value))
            .unwrap_or(false)
    }

    /// Dispatch a bubbling `click` at `target`.
    pub fn click(&mut self, target: impl Into<EventTarget>) -> usize {
        self.dispatch(target, Event::bubbling("click"))
    }

    pub fn dispatch(&mut self, target: impl Into<EventTarget>, event: Event) -> usize {
        let target = target.into();
        self.runtime.task(|rt| rt.dispatch_event(target, event))
    }

    // ── Processing ───────────────────────────────────────────────────

    /// Run the render checkpoint.
    pub fn process(&mut self) -> usize {
        self.runtime.flush()
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut Runtime {
        &mut self.runtime
    }

    /// Markup of `node`'s open shadow root, or empty.
    pub fn html(&self, node: NodeId) -> String {
        self.runtime.shadow_html(node).unwrap_or_default()
    }

    /// First match for `selector` inside `host`'s open shadow root.
    pub fn query_shadow(&self, host: NodeId, selector: &str) -> Option<NodeId> {
        let shadow = self.runtime.shadow_root(host)?;
        self.runtime.query_selector(shadow, selector).ok().flatten()
    }

    /// Outline of the whole composed document.
    pub fn outline(&self) -> String {
        super::snapshot::tree_to_string(self.runtime.dom(), self.runtime.document())
    }

    pub fn component<C: Component>(&self, node: NodeId) -> Option<&C> {
        self.runtime.component(node)
    }

    pub fn state(&self, node: NodeId) -> Option<LifecycleState> {
        self.runtime.lifecycle_state(node)
    }

    pub fn render_count(&self, node: NodeId) -> usize {
        self.runtime.render_count(node)
    }
}

impl Default for Pilot {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// RecordingShim
// ---------------------------------------------------------------------------

/// A [`StyleShim`] that records `(tag, markup)` for every template it sees.
///
/// Clones share one log, so keep a clone to inspect after installing.
#[derive(Debug, Clone, Default)]
pub struct RecordingShim {
    log: Rc<RefCell<Vec<(String, String)>>>,
}

impl RecordingShim {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.log.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }
}

impl StyleShim for RecordingShim {
    fn prepare_template(&mut self, template: &Template, tag_name: &str) {
        self.log
            .borrow_mut()
            .push((tag_name.to_owned(), template.to_html()));
    }
}

// ===========================================================================
// Tests
// ===========================================================================
