//! Runtime configuration.

use crate::dom::node::ShadowRootMode;

// ---------------------------------------------------------------------------
// Policies
// ---------------------------------------------------------------------------

/// Where a bare listener specifier (`"click"`, no scope prefix) binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BareEventScope {
    /// The component's own shadow root.
    #[default]
    ShadowRoot,
    /// The host element itself.
    Host,
}

/// What happens when a listener specifier resolves to no target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingTargetPolicy {
    /// Skip the binding; only a debug-level trace is emitted.
    #[default]
    Silent,
    /// Skip the binding and emit a `warn`-level event.
    Warn,
}

// ---------------------------------------------------------------------------
// RuntimeConfig
// ---------------------------------------------------------------------------

/// Configuration for a [`Runtime`](crate::runtime::Runtime).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuntimeConfig {
    /// Mode used when attaching component shadow roots.
    pub shadow_mode: ShadowRootMode,
    /// Binding scope for bare event specifiers.
    pub bare_event_scope: BareEventScope,
    /// Reporting policy for listener specifiers with no target.
    pub missing_target: MissingTargetPolicy,
}

impl RuntimeConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shadow root mode (builder).
    pub fn with_shadow_mode(mut self, mode: ShadowRootMode) -> Self {
        self.shadow_mode = mode;
        self
    }

    /// Set the bare event scope (builder).
    pub fn with_bare_event_scope(mut self, scope: BareEventScope) -> Self {
        self.bare_event_scope = scope;
        self
    }

    /// Set the missing-target policy (builder).
    pub fn with_missing_target(mut self, policy: MissingTargetPolicy) -> Self {
        self.missing_target = policy;
        self
    }
}
