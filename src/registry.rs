//! Custom element registry: tag name to component definition.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::component::{
    Component, ComponentMetadata, CustomElement, Instance, StagedProperties,
};
use crate::error::DefineError;

/// Names that look like custom element names but are reserved.
const RESERVED_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// Check whether `name` is a valid custom element name.
///
/// It must start with a lowercase ASCII letter, contain a hyphen, use only
/// lowercase letters, digits, `-`, `_` and `.`, and not be reserved.
pub fn is_valid_name(name: &str) -> bool {
    if !name.contains('-') {
        return false;
    }
    if !name.starts_with(|c: char| c.is_ascii_lowercase()) {
        return false;
    }
    if RESERVED_NAMES.contains(&name) {
        return false;
    }
    name.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.'))
}

// ---------------------------------------------------------------------------
// Definition
// ---------------------------------------------------------------------------

/// A registered component type, able to construct instances.
pub trait Definition {
    fn tag_name(&self) -> &str;
    fn observed_attributes(&self) -> &[String];
    /// Construct an instance, handing over values staged before upgrade.
    fn construct(&self, staged: StagedProperties) -> Box<dyn CustomElement>;
}

struct TypedDefinition<C> {
    tag: String,
    meta: Rc<ComponentMetadata<C>>,
}

impl<C: Component> Definition for TypedDefinition<C> {
    fn tag_name(&self) -> &str {
        &self.tag
    }

    fn observed_attributes(&self) -> &[String] {
        self.meta.observed_attributes()
    }

    fn construct(&self, staged: StagedProperties) -> Box<dyn CustomElement> {
        Box::new(Instance::new(&self.tag, Rc::clone(&self.meta), staged))
    }
}

// ---------------------------------------------------------------------------
// ElementRegistry
// ---------------------------------------------------------------------------

/// Registry of defined custom elements.
#[derive(Default)]
pub struct ElementRegistry {
    definitions: HashMap<String, Rc<dyn Definition>>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `C` under `tag`. Metadata is built once, here.
    pub fn define<C: Component>(&mut self, tag: &str) -> Result<(), DefineError> {
        if !is_valid_name(tag) {
            return Err(DefineError::InvalidName(tag.to_owned()));
        }
        if self.definitions.contains_key(tag) {
            return Err(DefineError::AlreadyDefined(tag.to_owned()));
        }
        let meta = Rc::new(C::metadata());
        debug!(tag, ?meta, "defined");
        self.definitions.insert(
            tag.to_owned(),
            Rc::new(TypedDefinition {
                tag: tag.to_owned(),
                meta,
            }),
        );
        Ok(())
    }

    /// The definition for `tag`, if any.
    pub fn get(&self, tag: &str) -> Option<Rc<dyn Definition>> {
        self.definitions.get(tag).cloned()
    }

    pub fn is_defined(&self, tag: &str) -> bool {
        self.definitions.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl fmt::Debug for ElementRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.definitions.keys().collect();
        tags.sort();
        f.debug_struct("ElementRegistry").field("tags", &tags).finish()
    }
}
