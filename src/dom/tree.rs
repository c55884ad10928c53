//! Tree operations: create, append, detach, remove, walk, shadow attachment.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeData, NodeId, NodeKind, ShadowRootMode};
use crate::error::DomError;

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// The document tree, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps so that node removal is O(subtree size) and lookup is O(1).
/// Shadow roots have no parent; they are linked to their host through
/// [`NodeKind::ShadowRoot`] and the `shadow_roots` map.
pub struct Dom {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    shadow_roots: SecondaryMap<NodeId, NodeId>,
    document: NodeId,
}

impl Dom {
    /// Create a DOM containing only the document node.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let document = nodes.insert(NodeData::document());
        let mut children = SecondaryMap::new();
        children.insert(document, Vec::new());
        Self {
            nodes,
            children,
            parent: SecondaryMap::new(),
            shadow_roots: SecondaryMap::new(),
            document,
        }
    }

    /// The document node.
    pub fn document(&self) -> NodeId {
        self.document
    }

    /// Create a detached node.
    pub fn create(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        id
    }

    /// Create a node as the last child of `parent`.
    pub fn create_child(&mut self, parent: NodeId, data: NodeData) -> Result<NodeId, DomError> {
        if !self.can_have_children(parent) {
            return Err(DomError::HierarchyRequest("parent cannot have children"));
        }
        let id = self.create(data);
        self.link(parent, id);
        Ok(id)
    }

    /// Move `child` (with its subtree) to the end of `parent`'s children.
    ///
    /// Fails if either node is missing, if `child` is a document or shadow
    /// root, or if `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.can_append(parent, child)?;
        self.detach(child);
        self.link(parent, child);
        Ok(())
    }

    /// Check that `child` may be appended to `parent` without mutating either.
    pub fn can_append(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return Err(DomError::NodeNotFound);
        }
        if !self.can_have_children(parent) {
            return Err(DomError::HierarchyRequest("parent cannot have children"));
        }
        if matches!(
            self.nodes[child].kind,
            NodeKind::Document | NodeKind::ShadowRoot { .. }
        ) {
            return Err(DomError::HierarchyRequest("node cannot be inserted"));
        }
        if child == parent || self.composed_ancestors(parent).contains(&child) {
            return Err(DomError::HierarchyRequest("node is an ancestor of the parent"));
        }
        Ok(())
    }

    /// Detach a node from its parent, keeping it (and its subtree) alive.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent_id) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
        }
    }

    /// Remove a node, its descendants and any shadow trees they host.
    ///
    /// Returns the ids of every removed node, starting with `id`. The document
    /// node cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> Vec<NodeId> {
        if !self.nodes.contains_key(id) || id == self.document {
            return Vec::new();
        }

        self.detach(id);
        if let Some(host) = self.nodes[id].shadow_host() {
            self.shadow_roots.remove(host);
        }

        // Collect all descendants (BFS) to remove them.
        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed = Vec::new();

        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            if let Some(shadow) = self.shadow_roots.remove(current) {
                to_remove.push_back(shadow);
            }
            self.parent.remove(current);
            if self.nodes.remove(current).is_some() {
                removed.push(current);
            }
        }

        removed
    }

    /// Attach a shadow root to `host`, or return the existing one.
    ///
    /// Fails if `host` is missing or is not an element.
    pub fn attach_shadow(&mut self, host: NodeId, mode: ShadowRootMode) -> Result<NodeId, DomError> {
        let data = self.nodes.get(host).ok_or(DomError::NodeNotFound)?;
        if !data.is_element() {
            return Err(DomError::NotAnElement);
        }
        if let Some(existing) = self.shadow_roots.get(host) {
            return Ok(*existing);
        }
        let root = self.create(NodeData::shadow_root(host, mode));
        self.shadow_roots.insert(host, root);
        Ok(root)
    }

    /// The shadow root attached to `host`, regardless of its mode.
    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.shadow_roots.get(host).copied()
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Returns an empty slice if the node has no
    /// children or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Walk from `id` up to its tree root, collecting ancestor node ids.
    ///
    /// The returned vec does **not** include `id` itself. It stops at the
    /// tree root and never crosses from a shadow root into its host.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Like [`ancestors`](Self::ancestors) but continues from a shadow root
    /// to its host.
    pub fn composed_ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        loop {
            let next = match self.parent.get(current) {
                Some(&p) => Some(p),
                None => self.nodes.get(current).and_then(NodeData::shadow_host),
            };
            match next {
                Some(p) => {
                    result.push(p);
                    current = p;
                }
                None => return result,
            }
        }
    }

    /// Whether `id` is reachable from the document, following shadow roots
    /// to their hosts.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
            && (id == self.document || self.composed_ancestors(id).last() == Some(&self.document))
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's data.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    /// Number of nodes in the DOM, including the document node.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the DOM holds nothing besides the document node.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Whether the DOM contains a node with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start`.
    ///
    /// Stays inside `start`'s tree: shadow trees are not entered.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// Shadow-including pre-order traversal starting from `start`.
    ///
    /// A host's shadow tree is visited right after the host and before the
    /// host's light children.
    pub fn walk_composed(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
            if let Some(&shadow) = self.shadow_roots.get(current) {
                stack.push(shadow);
            }
        }
        result
    }

    /// Element nodes with the given tag name, in arena order.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, data)| data.tag_name().is_some_and(|t| t.eq_ignore_ascii_case(tag)))
            .map(|(id, _)| id)
            .collect()
    }

    fn can_have_children(&self, id: NodeId) -> bool {
        self.nodes
            .get(id)
            .is_some_and(|data| !matches!(data.kind, NodeKind::Text(_)))
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.parent.insert(child, parent);
        if let Some(kids) = self.children.get_mut(parent) {
            kids.push(child);
        }
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}
