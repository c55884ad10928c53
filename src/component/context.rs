//! Handler context and the property write path.

use tracing::debug;

use super::metadata::ComponentMetadata;
use super::value::PropValue;

/// Write `value` through the property's setter.
///
/// When `observe` is set, observers registered for the property run after the
/// setter with the getter's value before and after the write. Returns `false`
/// for unknown properties.
pub(crate) fn write_property<C>(
    component: &mut C,
    meta: &ComponentMetadata<C>,
    name: &str,
    value: PropValue,
    observe: bool,
) -> bool {
    let Some(prop) = meta.property(name) else {
        debug!(property = name, "write to unknown property ignored");
        return false;
    };
    let old = (prop.get)(component);
    (prop.set)(component, value);
    if observe {
        let new = (prop.get)(component);
        for observer in meta.observers_for(name) {
            (observer.handler)(component, &old, &new);
        }
    }
    true
}

/// What a listener handler sees: the component plus its property table.
///
/// Property writes made through [`set`](Self::set) run setters and
/// observers and schedule a render. Direct mutation through
/// [`component_mut`](Self::component_mut) also schedules a render.
pub struct Context<'a, C> {
    component: &'a mut C,
    meta: &'a ComponentMetadata<C>,
    observe: bool,
    invalidated: bool,
}

impl<'a, C> Context<'a, C> {
    pub(crate) fn new(component: &'a mut C, meta: &'a ComponentMetadata<C>, observe: bool) -> Self {
        Self {
            component,
            meta,
            observe,
            invalidated: false,
        }
    }

    pub fn component(&self) -> &C {
        &*self.component
    }

    /// Mutable access to the component. Schedules a render.
    pub fn component_mut(&mut self) -> &mut C {
        self.invalidated = true;
        &mut *self.component
    }

    /// Read a registered property.
    pub fn get(&self, name: &str) -> Option<PropValue> {
        self.meta.property(name).map(|p| (p.get)(&*self.component))
    }

    /// Write a registered property. Returns `false` if the name is unknown.
    pub fn set(&mut self, name: &str, value: impl Into<PropValue>) -> bool {
        let written = write_property(
            &mut *self.component,
            self.meta,
            name,
            value.into(),
            self.observe,
        );
        self.invalidated |= written;
        written
    }

    /// Schedule a render without changing anything.
    pub fn request_render(&mut self) {
        self.invalidated = true;
    }

    /// Whether anything in this context asked for a render.
    pub fn invalidated(&self) -> bool {
        self.invalidated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        count: f64,
        seen: Vec<(PropValue, PropValue)>,
    }

    fn meta() -> ComponentMetadata<Counter> {
        ComponentMetadata::<Counter>::builder()
            .property(
                "count",
                |c| c.count.into(),
                |c, v| c.count = v.as_number().unwrap_or_default(),
            )
            .watch("count", "on_count", |c, old, new| {
                c.seen.push((old.clone(), new.clone()))
            })
            .build()
    }

    #[test]
    fn write_runs_setter_and_observers() {
        let meta = meta();
        let mut counter = Counter::default();
        assert!(write_property(&mut counter, &meta, "count", "4".into(), true));
        assert_eq!(counter.count, 4.0);
        assert_eq!(counter.seen, vec![(PropValue::from(0.0), PropValue::from(4.0))]);
    }

    #[test]
    fn write_without_observe_skips_observers() {
        let meta = meta();
        let mut counter = Counter::default();
        assert!(write_property(&mut counter, &meta, "count", 2.0.into(), false));
        assert_eq!(counter.count, 2.0);
        assert!(counter.seen.is_empty());
    }

    #[test]
    fn unknown_property_is_ignored() {
        let meta = meta();
        let mut counter = Counter::default();
        assert!(!write_property(&mut counter, &meta, "missing", true.into(), true));
    }

    #[test]
    fn context_tracks_invalidation() {
        let meta = meta();
        let mut counter = Counter::default();
        let mut ctx = Context::new(&mut counter, &meta, true);
        assert!(!ctx.invalidated());
        assert_eq!(ctx.get("count"), Some(PropValue::from(0.0)));
        assert!(!ctx.set("missing", 1.0));
        assert!(!ctx.invalidated());
        assert!(ctx.set("count", 1.0));
        assert!(ctx.invalidated());
        assert_eq!(ctx.component().count, 1.0);
    }

    #[test]
    fn component_mut_invalidates() {
        let meta = meta();
        let mut counter = Counter::default();
        let mut ctx = Context::new(&mut counter, &meta, false);
        ctx.component_mut().count = 9.0;
        assert!(ctx.invalidated());
    }
}
