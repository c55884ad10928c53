//! html! macro: parse markup-like syntax and generate gilt-elements template
//! builder code.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::{braced, Error, Expr, Ident, LitInt, LitStr, Result, Token};

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// Value side of an attribute.
pub(crate) enum AttrValue {
    /// `name="value"`
    Literal(LitStr),
    /// `name={expr}`, rendered with `Display`.
    Expr(Box<Expr>),
    /// `name`
    Flag,
    /// `?name={expr}`: present when the expression is true.
    FlagIf(Box<Expr>),
}

/// A parsed attribute.
pub(crate) struct Attribute {
    pub name: String,
    pub span: Span,
    pub value: AttrValue,
}

impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match &self.value {
            AttrValue::Literal(lit) => format!("{:?}", lit.value()),
            AttrValue::Expr(_) => "{expr}".to_owned(),
            AttrValue::Flag => "flag".to_owned(),
            AttrValue::FlagIf(_) => "?{expr}".to_owned(),
        };
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .field("value", &kind)
            .finish()
    }
}

/// A child of an element, or a top-level node.
pub(crate) enum Node {
    Element(Element),
    Text(LitStr),
    Expr(Box<Expr>),
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Element(el) => el.fmt(f),
            Node::Text(lit) => write!(f, "Text({:?})", lit.value()),
            Node::Expr(_) => f.write_str("Expr"),
        }
    }
}

/// A parsed element: `<tag attrs... />` or `<tag attrs...> children </tag>`.
#[derive(Debug)]
pub(crate) struct Element {
    pub tag: String,
    pub span: Span,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
    pub self_closing: bool,
}

/// The top-level html! input: a sequence of nodes.
#[derive(Debug)]
struct HtmlInput {
    nodes: Vec<Node>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for HtmlInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut nodes = Vec::new();
        while !input.is_empty() {
            nodes.push(parse_node(input)?);
        }
        Ok(HtmlInput { nodes })
    }
}

fn parse_node(input: ParseStream) -> Result<Node> {
    if input.peek(Token![<]) {
        return parse_element(input).map(Node::Element);
    }
    if input.peek(LitStr) {
        return input.parse().map(Node::Text);
    }
    if input.peek(syn::token::Brace) {
        return parse_braced(input).map(Node::Expr);
    }
    Err(input.error("expected `<`, a string literal or `{expression}`"))
}

fn parse_braced(input: ParseStream) -> Result<Box<Expr>> {
    let content;
    braced!(content in input);
    content.parse().map(Box::new)
}

/// Parse a possibly hyphenated name such as `x-card` or `aria-pressed`.
///
/// Keywords are accepted (`type`, `for`), as are numeric segments (`x-1`).
pub(crate) fn parse_name(input: ParseStream) -> Result<(String, Span)> {
    let first = Ident::parse_any(input)?;
    let span = first.span();
    let mut name = first.unraw().to_string();
    while input.peek(Token![-]) {
        input.parse::<Token![-]>()?;
        name.push('-');
        if input.peek(LitInt) {
            let part: LitInt = input.parse()?;
            name.push_str(&part.to_string());
        } else {
            let part = Ident::parse_any(input)?;
            name.push_str(&part.unraw().to_string());
        }
    }
    Ok((name, span))
}

fn parse_attribute(input: ParseStream) -> Result<Attribute> {
    let conditional = input.peek(Token![?]);
    if conditional {
        input.parse::<Token![?]>()?;
    }
    let (name, span) = parse_name(input)?;

    if !input.peek(Token![=]) {
        if conditional {
            return Err(Error::new(span, format!("`?{name}` needs a `={{condition}}`")));
        }
        return Ok(Attribute {
            name,
            span,
            value: AttrValue::Flag,
        });
    }
    input.parse::<Token![=]>()?;

    let value = if conditional {
        AttrValue::FlagIf(parse_braced(input)?)
    } else if input.peek(LitStr) {
        AttrValue::Literal(input.parse()?)
    } else if input.peek(syn::token::Brace) {
        AttrValue::Expr(parse_braced(input)?)
    } else {
        return Err(input.error("expected a string literal or `{expression}`"));
    };
    Ok(Attribute { name, span, value })
}

/// Parse a single element from the token stream.
pub(crate) fn parse_element(input: ParseStream) -> Result<Element> {
    input.parse::<Token![<]>()?;
    let (tag, span) = parse_name(input)?;

    let mut attrs = Vec::new();
    loop {
        if input.peek(Token![/]) {
            input.parse::<Token![/]>()?;
            input.parse::<Token![>]>()?;
            return Ok(Element {
                tag,
                span,
                attrs,
                children: Vec::new(),
                self_closing: true,
            });
        }
        if input.peek(Token![>]) {
            input.parse::<Token![>]>()?;
            break;
        }
        attrs.push(parse_attribute(input)?);
    }

    let mut children = Vec::new();
    loop {
        if input.peek(Token![<]) && input.peek2(Token![/]) {
            input.parse::<Token![<]>()?;
            input.parse::<Token![/]>()?;
            let (closing, closing_span) = parse_name(input)?;
            if closing != tag {
                return Err(Error::new(
                    closing_span,
                    format!("mismatched closing tag: expected `</{tag}>`, found `</{closing}>`"),
                ));
            }
            input.parse::<Token![>]>()?;
            break;
        }
        if input.is_empty() {
            return Err(Error::new(span, format!("unclosed element `<{tag}>`")));
        }
        children.push(parse_node(input)?);
    }

    Ok(Element {
        tag,
        span,
        attrs,
        children,
        self_closing: false,
    })
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

fn generate_attribute(attr: &Attribute) -> TokenStream {
    let name = LitStr::new(&attr.name, attr.span);
    match &attr.value {
        AttrValue::Literal(value) => quote! { .attr(#name, #value) },
        AttrValue::Expr(expr) => quote! { .attr(#name, &(#expr)) },
        AttrValue::Flag => quote! { .flag(#name) },
        AttrValue::FlagIf(expr) => quote! { .flag_if(#name, #expr) },
    }
}

/// Generate an `ElementMarkup` builder chain for one element.
fn generate_element(elem: &Element) -> TokenStream {
    let tag = LitStr::new(&elem.tag, elem.span);
    let attrs = elem.attrs.iter().map(generate_attribute);
    let children = elem.children.iter().map(|child| match child {
        Node::Element(el) => {
            let code = generate_element(el);
            quote! { .child(#code) }
        }
        Node::Text(lit) => quote! { .text(#lit) },
        Node::Expr(expr) => quote! { .text(&(#expr)) },
    });
    quote! {
        ::gilt_elements::template::Markup::element(#tag) #(#attrs)* #(#children)*
    }
}

/// Generate a top-level node as something `Template::with` accepts.
fn generate_node(node: &Node) -> TokenStream {
    match node {
        Node::Element(el) => generate_element(el),
        Node::Text(lit) => quote! { ::gilt_elements::template::Markup::text(#lit) },
        Node::Expr(expr) => quote! {
            ::gilt_elements::template::Markup::text(::std::string::ToString::to_string(&(#expr)))
        },
    }
}

/// Entry point: generate code for the entire html! macro.
pub(crate) fn html_impl(input: TokenStream) -> Result<TokenStream> {
    let parsed: HtmlInput = syn::parse2(input)?;

    if parsed.nodes.is_empty() {
        return Err(Error::new(
            Span::call_site(),
            "html! macro requires at least one node",
        ));
    }

    let nodes = parsed.nodes.iter().map(generate_node);
    Ok(quote! {
        ::gilt_elements::template::Template::new() #(.with(#nodes))*
    })
}

// ===========================================================================
// Tests
// ===========================================================================
