//! Selector matching against the DOM, right to left.

use super::model::*;
use crate::dom::{Dom, NodeData, NodeId};

/// Check whether a single node satisfies every component of a compound.
///
/// Only elements can match; pseudo-classes never match.
pub fn matches_compound(compound: &CompoundSelector, node: &NodeData) -> bool {
    let Some(tag) = node.tag_name() else {
        return false;
    };
    compound.components.iter().all(|component| match component {
        SelectorComponent::Type(name) => tag.eq_ignore_ascii_case(name),
        SelectorComponent::Universal => true,
        SelectorComponent::Class(class) => node.has_class(class),
        SelectorComponent::Id(id) => node.id() == Some(id.as_str()),
        SelectorComponent::Attribute { name, value } => match (node.attribute(name), value) {
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected,
            (None, _) => false,
        },
        SelectorComponent::PseudoClass(_) => false,
    })
}

/// Check whether a node matches a complex selector.
///
/// Combinators are resolved against the node's own tree: ancestors beyond a
/// shadow root are never consulted.
pub fn matches_selector(selector: &Selector, node_id: NodeId, dom: &Dom) -> bool {
    let parts = &selector.parts;
    let Some(SelectorPart::Compound(rightmost)) = parts.last() else {
        return false;
    };
    if !dom.get(node_id).is_some_and(|n| matches_compound(rightmost, n)) {
        return false;
    }

    // Walk leftward through combinator + compound pairs.
    let mut part_idx = parts.len() - 1;
    let mut current_node = node_id;

    while part_idx > 0 {
        let combinator = match &parts[part_idx - 1] {
            SelectorPart::Combinator(c) => *c,
            SelectorPart::Compound(_) => return false,
        };
        if part_idx < 2 {
            // Combinator without a preceding compound.
            return false;
        }
        let compound = match &parts[part_idx - 2] {
            SelectorPart::Compound(c) => c,
            SelectorPart::Combinator(_) => return false,
        };
        part_idx -= 2;

        let matched = match combinator {
            Combinator::Child => dom
                .parent(current_node)
                .filter(|&p| dom.get(p).is_some_and(|n| matches_compound(compound, n))),
            Combinator::Descendant => dom
                .ancestors(current_node)
                .into_iter()
                .find(|&a| dom.get(a).is_some_and(|n| matches_compound(compound, n))),
        };
        match matched {
            Some(next) => current_node = next,
            None => return false,
        }
    }

    true
}

impl SelectorList {
    /// Whether any selector in the list matches `node`.
    pub fn matches(&self, dom: &Dom, node: NodeId) -> bool {
        self.selectors
            .iter()
            .any(|selector| matches_selector(selector, node, dom))
    }
}
