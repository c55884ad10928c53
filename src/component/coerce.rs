//! Attribute mutation to property value coercion.

use super::value::PropValue;

/// Result of coercing one attribute mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coerced {
    Bool(bool),
    Text(String),
    /// No property write should happen.
    Unchanged,
}

impl Coerced {
    /// The value to write, or `None` for [`Coerced::Unchanged`].
    pub fn into_value(self) -> Option<PropValue> {
        match self {
            Coerced::Bool(b) => Some(PropValue::Bool(b)),
            Coerced::Text(s) => Some(PropValue::Text(s)),
            Coerced::Unchanged => None,
        }
    }
}

/// Coerce an attribute mutation into a property value.
///
/// `has_attribute` is the attribute's presence on the element at call time,
/// so this must run synchronously inside the mutation notification. Rules,
/// first match wins:
///
/// 1. present, `new` is `""` and differs from `old`: `true`
/// 2. absent and `new` is `None`: `false`
/// 3. `new` is `Some` and differs from `old`: the text
/// 4. otherwise: [`Coerced::Unchanged`]
pub fn coerce(has_attribute: bool, new: Option<&str>, old: Option<&str>) -> Coerced {
    match new {
        Some("") if has_attribute && new != old => Coerced::Bool(true),
        None if !has_attribute => Coerced::Bool(false),
        Some(value) if new != old => Coerced::Text(value.to_owned()),
        _ => Coerced::Unchanged,
    }
}
