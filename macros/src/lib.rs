//! Proc macros for gilt-elements: `html!` template composition.
//!
//! This crate is not meant to be used directly; enable the `macros` feature on `gilt-elements`.

use proc_macro::TokenStream;

mod html_macro;

/// Markup-style template macro.
///
/// Expands to a `gilt_elements::template::Template` built with the
/// `Markup` builder API.
///
/// # Syntax
///
/// - `<tag-name />`: element with no children
/// - `<tag-name attr="val"> ... </tag-name>`: element with children
/// - `"text"`: a text node
/// - `{expr}`: a text node rendered with `Display`
///
/// # Attributes
///
/// - `name="value"`: literal value
/// - `name={expr}`: value rendered with `Display`
/// - `name`: boolean attribute, always present
/// - `?name={cond}`: boolean attribute, present when `cond` is true
///
/// Tag and attribute names may contain hyphens.
///
/// # Example
///
/// ```ignore
/// html! {
///     <style>":host { display: block }"</style>
///     <button class="toggle" ?aria-pressed={self.open}>
///         {self.label}
///     </button>
/// }
/// ```
#[proc_macro]
pub fn html(input: TokenStream) -> TokenStream {
    html_macro::html_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
