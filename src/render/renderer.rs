//! Renderer hook and style shim interfaces.
//!
//! A component's render output reaches its shadow root as a list of
//! [`RenderOp`]s collected in a [`RenderSink`]. Without a type-level
//! [`Renderer`], the output replaces the shadow root's content.

use crate::template::Template;

/// One change to apply to a shadow root.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOp {
    /// Remove all content, then insert the template.
    Replace(Template),
    /// Insert the template after the existing content.
    Append(Template),
    /// Remove all content.
    Clear,
}

/// Collects [`RenderOp`]s for one render pass.
#[derive(Debug, Default)]
pub struct RenderSink {
    ops: Vec<RenderOp>,
}

impl RenderSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, template: impl Into<Template>) {
        self.ops.push(RenderOp::Replace(template.into()));
    }

    pub fn append(&mut self, template: impl Into<Template>) {
        self.ops.push(RenderOp::Append(template.into()));
    }

    pub fn clear(&mut self) {
        self.ops.push(RenderOp::Clear);
    }

    pub fn ops(&self) -> &[RenderOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn into_ops(self) -> Vec<RenderOp> {
        self.ops
    }
}

/// A type-level render override.
///
/// Receives the component's render function as a callback and decides what
/// to write into the shadow root.
pub trait Renderer {
    fn render(&self, template: &dyn Fn() -> Option<Template>, sink: &mut RenderSink);
}

/// The default behavior: replace the shadow root's content with the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplaceRenderer;

impl Renderer for ReplaceRenderer {
    fn render(&self, template: &dyn Fn() -> Option<Template>, sink: &mut RenderSink) {
        if let Some(template) = template() {
            sink.replace(template);
        }
    }
}

/// Legacy style-scoping facility.
///
/// When installed on the runtime it sees every render output, once per
/// render, tagged with the element's tag name.
pub trait StyleShim {
    fn prepare_template(&mut self, template: &Template, tag_name: &str);
}
