//! DOM queries: selector matching within a scope, by id, by predicate.

use super::node::{NodeData, NodeId};
use super::tree::Dom;
use crate::selector::{SelectorError, SelectorList};

impl Dom {
    /// First element below `scope` (excluding `scope` itself) matching the
    /// selector, in tree order. Shadow trees below `scope` are not entered.
    pub fn query_selector(&self, scope: NodeId, selector: &SelectorList) -> Option<NodeId> {
        self.descendants(scope)
            .find(|&id| selector.matches(self, id))
    }

    /// All elements below `scope` matching the selector, in tree order.
    pub fn query_selector_all(&self, scope: NodeId, selector: &SelectorList) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&id| selector.matches(self, id))
            .collect()
    }

    /// Parse `selector` and run [`query_selector`](Self::query_selector).
    pub fn query_selector_str(
        &self,
        scope: NodeId,
        selector: &str,
    ) -> Result<Option<NodeId>, SelectorError> {
        let list: SelectorList = selector.parse()?;
        Ok(self.query_selector(scope, &list))
    }

    /// First connected element in the document tree with the given id.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.document())
            .find(|&node| self.get(node).is_some_and(|data| data.id() == Some(id)))
    }

    /// Find all nodes in the arena matching an arbitrary predicate.
    ///
    /// Iterates in slotmap order, which is deterministic but not tree order.
    pub fn query_all(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, data)| predicate(data))
            .map(|(node_id, _)| node_id)
            .collect()
    }

    fn descendants(&self, scope: NodeId) -> impl Iterator<Item = NodeId> {
        self.walk_depth_first(scope).into_iter().skip(1)
    }
}
