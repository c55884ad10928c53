//! Attribute-name to property-name conversion.
//!
//! Attribute names are kebab-case (`data-value`); property names are
//! camelCase (`dataValue`). The conversion is pure and stateless.

/// Convert a kebab-case attribute name into a camelCase property name.
///
/// Empty segments (leading, trailing, or doubled hyphens) are skipped, and the
/// first character of every segment after the first is upper-cased.
pub fn camel_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    for segment in name.split('-').filter(|s| !s.is_empty()) {
        if result.is_empty() {
            result.push_str(&segment.to_ascii_lowercase());
            continue;
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            result.push(first.to_ascii_uppercase());
            result.push_str(&chars.as_str().to_ascii_lowercase());
        }
    }
    result
}
