//! Dynamically typed property values.

use std::fmt;

/// A property value as seen by the lifecycle controller.
///
/// Components keep their own typed fields; getters and setters registered in
/// [`ComponentMetadata`](super::ComponentMetadata) convert to and from this.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PropValue {
    /// No value ("undefined").
    #[default]
    Absent,
    Bool(bool),
    Text(String),
    Number(f64),
}

impl PropValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, PropValue::Absent)
    }

    /// Truthiness: `false`, absent, empty text, zero and NaN are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            PropValue::Absent => false,
            PropValue::Bool(b) => *b,
            PropValue::Text(s) => !s.is_empty(),
            PropValue::Number(n) => *n != 0.0 && !n.is_nan(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view; text is parsed.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            PropValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Absent => Ok(()),
            PropValue::Bool(b) => write!(f, "{b}"),
            PropValue::Text(s) => f.write_str(s),
            PropValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Text(s.to_owned())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::Text(s)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl From<Option<String>> for PropValue {
    fn from(s: Option<String>) -> Self {
        s.map_or(PropValue::Absent, PropValue::Text)
    }
}
