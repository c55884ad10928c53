//! Event system: events, propagation, listener table, specifiers.

pub mod dispatch;
pub mod listener;
pub mod specifier;

pub use dispatch::{propagation_path, Event, EventTarget};
pub use listener::{ForwardingCallback, Listener, ListenerId, ListenerTable};
pub use specifier::{Scope, Specifier};
