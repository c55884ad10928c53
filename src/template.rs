//! Render output: a tree of markup values built with a builder API.
//!
//! A [`Template`] is what a component's render function returns. The runtime
//! materializes it into DOM nodes inside the component's shadow root.
//!
//! ```
//! use gilt_elements::template::{Markup, Template};
//!
//! let template: Template = Markup::element("button")
//!     .id("toggle")
//!     .flag("disabled")
//!     .text("Open")
//!     .into();
//! assert_eq!(template.to_html(), r#"<button id="toggle" disabled>Open</button>"#);
//! ```

use std::fmt;

use crate::dom::serialize::{escape_text, is_void_element, write_attribute};
use crate::dom::{Dom, NodeData, NodeId};
use crate::error::DomError;

// ---------------------------------------------------------------------------
// Markup
// ---------------------------------------------------------------------------

/// One node of render output.
#[derive(Debug, Clone, PartialEq)]
pub enum Markup {
    Element(ElementMarkup),
    Text(String),
}

impl Markup {
    /// Start building an element.
    pub fn element(tag: impl Into<String>) -> ElementMarkup {
        ElementMarkup {
            tag: tag.into().to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// A text node.
    pub fn text(content: impl Into<String>) -> Markup {
        Markup::Text(content.into())
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Markup::Text(text) => escape_text(text, out),
            Markup::Element(el) => el.write_html(out),
        }
    }
}

/// An element under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementMarkup {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Markup>,
}

impl ElementMarkup {
    /// Set an attribute. A repeated name replaces the earlier value.
    pub fn attr(mut self, name: &str, value: impl fmt::Display) -> Self {
        let name = name.to_ascii_lowercase();
        let value = value.to_string();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Set a boolean attribute (present with an empty value).
    pub fn flag(self, name: &str) -> Self {
        self.attr(name, "")
    }

    /// Set a boolean attribute only when `on` is true.
    pub fn flag_if(self, name: &str, on: bool) -> Self {
        if on {
            self.flag(name)
        } else {
            self
        }
    }

    pub fn id(self, id: impl fmt::Display) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: impl fmt::Display) -> Self {
        self.attr("class", class)
    }

    /// Append a child node.
    pub fn child(mut self, child: impl Into<Markup>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a text child.
    pub fn text(self, content: impl fmt::Display) -> Self {
        self.child(Markup::Text(content.to_string()))
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            write_attribute(name, value, out);
        }
        out.push('>');
        if is_void_element(&self.tag) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

impl From<ElementMarkup> for Markup {
    fn from(el: ElementMarkup) -> Self {
        Markup::Element(el)
    }
}

impl From<&str> for Markup {
    fn from(text: &str) -> Self {
        Markup::Text(text.to_owned())
    }
}

impl From<String> for Markup {
    fn from(text: String) -> Self {
        Markup::Text(text)
    }
}

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

/// A sequence of top-level markup nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Template {
    pub nodes: Vec<Markup>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level node (builder).
    pub fn with(mut self, node: impl Into<Markup>) -> Self {
        self.nodes.push(node.into());
        self
    }

    pub fn push(&mut self, node: impl Into<Markup>) {
        self.nodes.push(node.into());
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Serialize to markup text.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_html(&mut out);
        }
        out
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

impl From<Markup> for Template {
    fn from(node: Markup) -> Self {
        Self { nodes: vec![node] }
    }
}

impl From<ElementMarkup> for Template {
    fn from(el: ElementMarkup) -> Self {
        Self::from(Markup::Element(el))
    }
}

impl From<Vec<Markup>> for Template {
    fn from(nodes: Vec<Markup>) -> Self {
        Self { nodes }
    }
}

impl FromIterator<Markup> for Template {
    fn from_iter<I: IntoIterator<Item = Markup>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Materialization
// ---------------------------------------------------------------------------

impl Dom {
    /// Create DOM nodes for `template` as the last children of `parent`.
    ///
    /// Returns the ids of the created top-level nodes.
    pub fn append_template(
        &mut self,
        parent: NodeId,
        template: &Template,
    ) -> Result<Vec<NodeId>, DomError> {
        template
            .nodes
            .iter()
            .map(|node| self.append_markup(parent, node))
            .collect()
    }

    fn append_markup(&mut self, parent: NodeId, markup: &Markup) -> Result<NodeId, DomError> {
        match markup {
            Markup::Text(text) => self.create_child(parent, NodeData::text(text.clone())),
            Markup::Element(el) => {
                let mut data = NodeData::element(el.tag.clone());
                for (name, value) in &el.attributes {
                    data.set_attribute(name, value.clone());
                }
                let id = self.create_child(parent, data)?;
                for child in &el.children {
                    self.append_markup(id, child)?;
                }
                Ok(id)
            }
        }
    }
}
