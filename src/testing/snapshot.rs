//! Snapshot rendering helpers.
//!
//! Converts a composed tree (light DOM plus shadow roots) into an indented
//! plain-text outline suitable for snapshot assertions.

use crate::dom::serialize::write_attribute;
use crate::dom::{Dom, NodeId, NodeKind, ShadowRootMode};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render the composed tree rooted at `root` as an indented outline.
///
/// Each node is one line, indented two spaces per level. A shadow root is
/// listed first under its host, before the host's light children. Text nodes
/// are quoted; whitespace-only text is skipped.
///
/// ```text
/// x-toggle open
///   #shadow-root (open)
///     button aria-pressed
///       "Label"
/// ```
pub fn tree_to_string(dom: &Dom, root: NodeId) -> String {
    let mut lines = Vec::new();
    write_outline(dom, root, 0, &mut lines);
    lines.join("\n")
}

fn write_outline(dom: &Dom, id: NodeId, depth: usize, lines: &mut Vec<String>) {
    let Some(data) = dom.get(id) else {
        return;
    };
    let indent = "  ".repeat(depth);
    let line = match &data.kind {
        NodeKind::Document => "#document".to_owned(),
        NodeKind::ShadowRoot { mode, .. } => match mode {
            ShadowRootMode::Open => "#shadow-root (open)".to_owned(),
            ShadowRootMode::Closed => "#shadow-root (closed)".to_owned(),
        },
        NodeKind::Text(text) if text.trim().is_empty() => return,
        NodeKind::Text(text) => format!("{text:?}"),
        NodeKind::Element { tag } => {
            let mut line = tag.clone();
            for (name, value) in data.attributes() {
                write_attribute(name, value, &mut line);
            }
            line
        }
    };
    lines.push(format!("{indent}{line}"));

    if let Some(shadow) = dom.shadow_root(id) {
        write_outline(dom, shadow, depth + 1, lines);
    }
    for &child in dom.children(id) {
        write_outline(dom, child, depth + 1, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::NodeData;

    #[test]
    fn outline_includes_shadow_before_children() {
        let mut dom = Dom::new();
        let doc = dom.document();
        let host = dom
            .create_child(doc, NodeData::element("x-card").with_attribute("open", ""))
            .unwrap();
        let shadow = dom.attach_shadow(host, ShadowRootMode::Open).unwrap();
        let title = dom
            .create_child(shadow, NodeData::element("h2").with_class("title"))
            .unwrap();
        dom.create_child(title, NodeData::text("Hi")).unwrap();
        dom.create_child(host, NodeData::text("  ")).unwrap();
        dom.create_child(host, NodeData::element("span")).unwrap();

        insta::assert_snapshot!(tree_to_string(&dom, doc), @r#"
        #document
          x-card open
            #shadow-root (open)
              h2 class="title"
                "Hi"
            span
        "#);
    }

    #[test]
    fn missing_root_is_empty() {
        let mut dom = Dom::new();
        let el = dom.create(NodeData::element("div"));
        dom.remove(el);
        assert_eq!(tree_to_string(&dom, el), "");
    }
}
