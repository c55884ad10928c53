//! First-connect defaults: staged value replay and forced attribute reads.

use tracing::debug;

use super::context::write_property;
use super::metadata::ComponentMetadata;
use super::value::PropValue;
use crate::casing::camel_case;

/// Property values written to an element before it was upgraded.
///
/// Captured while the element has no component, replayed through the
/// component's setters on first connect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StagedProperties {
    values: Vec<(String, PropValue)>,
}

impl StagedProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a value. A later write to the same name replaces it in place.
    pub fn insert(&mut self, name: &str, value: PropValue) {
        match self.values.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => self.values.push((name.to_owned(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn take(&mut self, name: &str) -> Option<PropValue> {
        let pos = self.values.iter().position(|(n, _)| n == name)?;
        Some(self.values.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn drain(&mut self) -> impl Iterator<Item = (String, PropValue)> + '_ {
        self.values.drain(..)
    }
}

/// Run both first-connect passes. Observers fire for every write.
///
/// 1. Each registered property with a staged value is written through its
///    setter, in registration order. Staged values for unknown names are
///    dropped.
/// 2. Each observed attribute's property is read and written back once.
pub(crate) fn apply_defaults<C>(
    component: &mut C,
    meta: &ComponentMetadata<C>,
    staged: &mut StagedProperties,
) {
    for prop in meta.properties() {
        if let Some(value) = staged.take(&prop.name) {
            write_property(component, meta, &prop.name, value, true);
        }
    }
    for (name, _) in staged.drain() {
        debug!(property = %name, "dropping staged value for unregistered property");
    }

    for attribute in meta.observed_attributes() {
        let property = camel_case(attribute);
        if let Some(prop) = meta.property(&property) {
            let current = (prop.get)(component);
            write_property(component, meta, &property, current, true);
        }
    }
}
