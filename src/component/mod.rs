//! Component authoring layer: metadata, coercion, defaults, listener
//! binding and the lifecycle controller.

pub mod binder;
pub mod coerce;
pub mod context;
pub mod defaults;
pub mod lifecycle;
pub mod metadata;
pub mod traits;
pub mod value;

pub use binder::{resolve, Binding, ListenerBinder, ListenerTarget};
pub use coerce::{coerce, Coerced};
pub use context::Context;
pub use defaults::StagedProperties;
pub use lifecycle::{CustomElement, Host, Instance, LifecycleState, LifecycleStats};
pub use metadata::{
    ComponentMetadata, Getter, Handler, ListenerDef, MetadataBuilder, Observer, ObserverDef,
    PropertyDef, Setter,
};
pub use traits::Component;
pub use value::PropValue;
