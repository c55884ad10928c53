//! # gilt-elements
//!
//! A declarative runtime for authoring custom elements against a headless,
//! slotmap-backed DOM.
//!
//! A component is a plain Rust type that describes itself once through
//! [`ComponentMetadata`](component::ComponentMetadata): which attributes it
//! observes, which properties reflect them, which events it listens to, and
//! which property watchers to run. The runtime wraps each instance with a
//! lifecycle controller that coerces attribute strings into typed property
//! writes, replays pre-upgrade values on first connect, binds scoped listeners
//! on every connect and removes exactly those on disconnect, and coalesces
//! re-render requests into at most one render per element per checkpoint.
//!
//! ## Core Systems
//!
//! - **[`component`]**: Component trait, metadata builder, attribute coercion,
//!   defaults, listener binding, lifecycle controller
//! - **[`runtime`]**: The host environment tying everything together
//! - **[`registry`]**: Custom element name validation and definitions
//! - **[`render`]**: Render scheduler, renderer hooks, style shim
//! - **[`dom`]**: Slotmap-backed DOM arena with shadow roots, queries, serialization
//! - **[`selector`]**: Selector tokenizer, parser and right-to-left matcher
//! - **[`event`]**: Events, propagation paths, listener table, specifiers
//! - **[`template`]**: Markup builder and template materialization
//! - **[`testing`]**: Headless Pilot and snapshot helpers

// Foundation
pub mod casing;
pub mod config;
pub mod error;

// Core systems
pub mod dom;
pub mod event;
pub mod selector;
pub mod template;

// Component model
pub mod component;
pub mod registry;
pub mod render;

// Host
pub mod runtime;

// Testing
pub mod testing;

pub use component::{Component, ComponentMetadata, Context, PropValue};
pub use config::RuntimeConfig;
pub use error::{Error, Result};
pub use runtime::Runtime;

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use gilt_elements_macros::html;
