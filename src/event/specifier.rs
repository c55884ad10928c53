//! Listener specifiers: `[scope:]event`.
//!
//! - `window:resize` binds on the global scope.
//! - `#save:click` binds on the first element matching `#save`.
//! - `click` binds on the component's own scope.
//!
//! The split happens at the last `:` so selector scopes may carry
//! pseudo-classes (`li:first-child:click`).

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Window,
    /// A selector resolved against the shadow root, then the document.
    Selector(String),
    /// The component's own scope (shadow root or host, per configuration).
    Own,
}

/// A parsed listener specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    pub scope: Scope,
    pub event_type: String,
}

impl Specifier {
    /// Parse a specifier string. Never fails; an empty event type is kept
    /// and rejected at bind time.
    ///
    /// The event type follows the last `:`, so a selector containing `:`
    /// (such as `a:hover:click`) keeps everything before that colon.
    pub fn parse(specifier: &str) -> Self {
        match specifier.rsplit_once(':') {
            Some(("window", event)) => Self {
                scope: Scope::Window,
                event_type: event.to_owned(),
            },
            Some((selector, event)) => Self {
                scope: Scope::Selector(selector.trim().to_owned()),
                event_type: event.to_owned(),
            },
            None => Self {
                scope: Scope::Own,
                event_type: specifier.to_owned(),
            },
        }
    }
}
