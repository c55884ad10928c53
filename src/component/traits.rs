//! Component trait: the authoring surface.

use super::metadata::ComponentMetadata;
use crate::template::Template;

/// A custom element's authored behavior.
///
/// The lifecycle controller owns one value per element instance and drives it
/// through the hooks below; properties, observed attributes and listeners
/// come from [`metadata`](Self::metadata), built once per type.
pub trait Component: Default + 'static {
    /// Describe the type: properties, observed attributes, listeners,
    /// observers, optional renderer hook.
    fn metadata() -> ComponentMetadata<Self>;

    /// The render function. `None` means the type has none and its shadow
    /// root is left untouched.
    fn render(&self) -> Option<Template> {
        None
    }

    /// Runs on every connect, after listeners are bound and before the
    /// render is scheduled.
    fn connected(&mut self) {}

    /// Runs on every observed-attribute mutation, before coercion.
    fn attribute_changed(&mut self, _name: &str, _old: Option<&str>, _new: Option<&str>) {}
}
