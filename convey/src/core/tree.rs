//! Arena-backed scope tree owned by one top-level run.

use serde::Serialize;

use crate::core::types::{AbortKind, Completion, ScopeId};

/// One declared scope.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ScopeNode {
    pub title: String,
    pub parent: Option<ScopeId>,
    /// Children in order of first discovery.
    pub children: Vec<ScopeId>,
    pub completion: Completion,
    /// Set when this scope's own body aborted on its most recent pass.
    pub outcome: Option<AbortKind>,
    pub skip: bool,
}

impl ScopeNode {
    fn new(title: &str, parent: Option<ScopeId>, skip: bool) -> Self {
        Self {
            title: title.to_string(),
            parent,
            children: Vec::new(),
            completion: Completion::Pending,
            outcome: None,
            skip,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completion == Completion::Complete
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// The scope graph of a single top-level declaration.
///
/// Nodes are created the first time their position is reached and are never
/// removed, so a [`ScopeId`] stays valid for the lifetime of the tree.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ScopeTree {
    nodes: Vec<ScopeNode>,
}

impl ScopeTree {
    pub fn new(title: &str, skip: bool) -> Self {
        Self {
            nodes: vec![ScopeNode::new(title, None, skip)],
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Look up a node. Ids are only minted by this tree, so lookup is infallible.
    pub fn node(&self, id: ScopeId) -> &ScopeNode {
        &self.nodes[id.0]
    }

    pub fn scope_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScopeId, &ScopeNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (ScopeId(index), node))
    }

    /// Child registered at discovery `position` under `parent`, if any.
    pub fn child_at(&self, parent: ScopeId, position: usize) -> Option<ScopeId> {
        self.node(parent).children.get(position).copied()
    }

    pub fn is_complete(&self, id: ScopeId) -> bool {
        self.node(id).is_complete()
    }

    /// Number of ancestors between `id` and the root.
    pub fn depth(&self, id: ScopeId) -> usize {
        let mut depth = 0;
        let mut cursor = self.node(id).parent;
        while let Some(parent) = cursor {
            depth += 1;
            cursor = self.node(parent).parent;
        }
        depth
    }

    /// Slash-joined titles from the root down to `id`.
    pub fn path(&self, id: ScopeId) -> String {
        let mut titles = vec![self.node(id).title.as_str()];
        let mut cursor = self.node(id).parent;
        while let Some(parent) = cursor {
            titles.push(self.node(parent).title.as_str());
            cursor = self.node(parent).parent;
        }
        titles.reverse();
        titles.join("/")
    }

    /// Ids of every discovered scope without children, in discovery order.
    pub fn leaves(&self) -> Vec<ScopeId> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(id, _)| id)
            .collect()
    }

    pub(crate) fn add_child(&mut self, parent: ScopeId, title: &str, skip: bool) -> ScopeId {
        let id = ScopeId(self.nodes.len());
        self.nodes.push(ScopeNode::new(title, Some(parent), skip));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Transition `id` to [`Completion::Complete`].
    ///
    /// Returns `false` if the node was already complete; completion is
    /// irreversible and happens once.
    pub(crate) fn mark_complete(&mut self, id: ScopeId) -> bool {
        let node = &mut self.nodes[id.0];
        if node.is_complete() {
            return false;
        }
        node.completion = Completion::Complete;
        true
    }

    pub(crate) fn record_outcome(&mut self, id: ScopeId, outcome: Option<AbortKind>) {
        self.nodes[id.0].outcome = outcome;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (ScopeTree, ScopeId, ScopeId, ScopeId) {
        let mut tree = ScopeTree::new("root", false);
        let root = tree.root();
        let a = tree.add_child(root, "a", false);
        let b = tree.add_child(root, "b", false);
        let aa = tree.add_child(a, "aa", false);
        (tree, a, b, aa)
    }

    #[test]
    fn children_keep_discovery_order() {
        let (tree, a, b, _) = sample();
        let root = tree.root();
        assert_eq!(tree.node(root).children, vec![a, b]);
        assert_eq!(tree.child_at(root, 0), Some(a));
        assert_eq!(tree.child_at(root, 1), Some(b));
        assert_eq!(tree.child_at(root, 2), None);
    }

    #[test]
    fn duplicate_titles_get_distinct_ids() {
        let mut tree = ScopeTree::new("root", false);
        let root = tree.root();
        let first = tree.add_child(root, "same", false);
        let second = tree.add_child(root, "same", false);
        assert_ne!(first, second);
        assert_eq!(tree.scope_count(), 3);
    }

    #[test]
    fn path_and_depth_follow_parents() {
        let (tree, _, _, aa) = sample();
        assert_eq!(tree.path(aa), "root/a/aa");
        assert_eq!(tree.depth(aa), 2);
        assert_eq!(tree.depth(tree.root()), 0);
    }

    #[test]
    fn mark_complete_happens_once() {
        let (mut tree, a, _, _) = sample();
        assert!(tree.mark_complete(a));
        assert!(!tree.mark_complete(a));
        assert!(tree.is_complete(a));
    }

    #[test]
    fn leaves_are_childless_nodes() {
        let (tree, _, b, aa) = sample();
        assert_eq!(tree.leaves(), vec![b, aa]);
    }
}
