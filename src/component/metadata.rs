//! Per-type component metadata and its builder.
//!
//! A [`ComponentMetadata`] is built once per component type by
//! [`Component::metadata`](super::Component::metadata) and shared read-only
//! by every instance of that type.

use std::fmt;

use super::context::Context;
use super::value::PropValue;
use crate::casing::camel_case;
use crate::event::Event;
use crate::render::Renderer;

/// Reads a property from the component.
pub type Getter<C> = fn(&C) -> PropValue;
/// Writes a property to the component.
pub type Setter<C> = fn(&mut C, PropValue);
/// Handles an event delivered through a listener specifier.
pub type Handler<C> = fn(&mut Context<'_, C>, &Event);
/// Called with `(old, new)` after a property write.
pub type Observer<C> = fn(&mut C, &PropValue, &PropValue);

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

/// A registered property with its accessors.
pub struct PropertyDef<C> {
    pub name: String,
    pub get: Getter<C>,
    pub set: Setter<C>,
}

/// A registered listener: specifier to handler.
pub struct ListenerDef<C> {
    /// `[scope:]event`
    pub specifier: String,
    pub handler_name: String,
    pub handler: Handler<C>,
}

/// A registered property observer.
pub struct ObserverDef<C> {
    pub property: String,
    pub handler_name: String,
    pub handler: Observer<C>,
}

// ---------------------------------------------------------------------------
// ComponentMetadata
// ---------------------------------------------------------------------------

/// Immutable description of a component type.
pub struct ComponentMetadata<C> {
    observed_attributes: Vec<String>,
    properties: Vec<PropertyDef<C>>,
    listeners: Vec<ListenerDef<C>>,
    observers: Vec<ObserverDef<C>>,
    renderer: Option<Box<dyn Renderer>>,
}

impl<C> ComponentMetadata<C> {
    /// Start building metadata.
    pub fn builder() -> MetadataBuilder<C> {
        MetadataBuilder {
            meta: Self::default(),
        }
    }

    /// Observed attribute names, in registration order.
    pub fn observed_attributes(&self) -> &[String] {
        &self.observed_attributes
    }

    pub fn properties(&self) -> &[PropertyDef<C>] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDef<C>> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn listeners(&self) -> &[ListenerDef<C>] {
        &self.listeners
    }

    pub fn listener(&self, specifier: &str) -> Option<&ListenerDef<C>> {
        self.listeners.iter().find(|l| l.specifier == specifier)
    }

    /// Observers registered for `property`, in registration order.
    pub fn observers_for<'a>(&'a self, property: &'a str) -> impl Iterator<Item = &'a ObserverDef<C>> {
        self.observers.iter().filter(move |o| o.property == property)
    }

    pub fn observers(&self) -> &[ObserverDef<C>] {
        &self.observers
    }

    /// The type-level renderer hook, if any.
    pub fn renderer(&self) -> Option<&dyn Renderer> {
        self.renderer.as_deref()
    }
}

impl<C> Default for ComponentMetadata<C> {
    fn default() -> Self {
        Self {
            observed_attributes: Vec::new(),
            properties: Vec::new(),
            listeners: Vec::new(),
            observers: Vec::new(),
            renderer: None,
        }
    }
}

impl<C> fmt::Debug for ComponentMetadata<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentMetadata")
            .field("observed_attributes", &self.observed_attributes)
            .field(
                "properties",
                &self.properties.iter().map(|p| &p.name).collect::<Vec<_>>(),
            )
            .field(
                "listeners",
                &self
                    .listeners
                    .iter()
                    .map(|l| (&l.specifier, &l.handler_name))
                    .collect::<Vec<_>>(),
            )
            .field(
                "observers",
                &self
                    .observers
                    .iter()
                    .map(|o| (&o.property, &o.handler_name))
                    .collect::<Vec<_>>(),
            )
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// MetadataBuilder
// ---------------------------------------------------------------------------

/// Builder for [`ComponentMetadata`].
///
/// ```
/// use gilt_elements::component::{ComponentMetadata, PropValue};
///
/// #[derive(Default)]
/// struct Toggle {
///     open: bool,
/// }
///
/// let meta = ComponentMetadata::<Toggle>::builder()
///     .attribute("open", |t| t.open.into(), |t, v| t.open = v.is_truthy())
///     .build();
/// assert_eq!(meta.observed_attributes(), ["open"]);
/// assert!(meta.property("open").is_some());
/// ```
pub struct MetadataBuilder<C> {
    meta: ComponentMetadata<C>,
}

impl<C> MetadataBuilder<C> {
    /// Register a property. Re-registering a name replaces its accessors.
    pub fn property(mut self, name: &str, get: Getter<C>, set: Setter<C>) -> Self {
        match self.meta.properties.iter_mut().find(|p| p.name == name) {
            Some(existing) => {
                existing.get = get;
                existing.set = set;
            }
            None => self.meta.properties.push(PropertyDef {
                name: name.to_owned(),
                get,
                set,
            }),
        }
        self
    }

    /// Observe an attribute. Names are lower-cased; duplicates are ignored.
    pub fn observe(mut self, attribute: &str) -> Self {
        let attribute = attribute.to_ascii_lowercase();
        if !self.meta.observed_attributes.contains(&attribute) {
            self.meta.observed_attributes.push(attribute);
        }
        self
    }

    /// Observe an attribute and register its camel-cased property.
    pub fn attribute(self, attribute: &str, get: Getter<C>, set: Setter<C>) -> Self {
        let property = camel_case(attribute);
        self.observe(attribute).property(&property, get, set)
    }

    /// Register a listener. The last registration for a specifier wins.
    pub fn listen(mut self, specifier: &str, handler_name: &str, handler: Handler<C>) -> Self {
        match self
            .meta
            .listeners
            .iter_mut()
            .find(|l| l.specifier == specifier)
        {
            Some(existing) => {
                existing.handler_name = handler_name.to_owned();
                existing.handler = handler;
            }
            None => self.meta.listeners.push(ListenerDef {
                specifier: specifier.to_owned(),
                handler_name: handler_name.to_owned(),
                handler,
            }),
        }
        self
    }

    /// Register an observer for `property`.
    pub fn watch(mut self, property: &str, handler_name: &str, handler: Observer<C>) -> Self {
        self.meta.observers.push(ObserverDef {
            property: property.to_owned(),
            handler_name: handler_name.to_owned(),
            handler,
        });
        self
    }

    /// Install a type-level renderer hook.
    pub fn renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.meta.renderer = Some(Box::new(renderer));
        self
    }

    pub fn build(self) -> ComponentMetadata<C> {
        self.meta
    }
}
