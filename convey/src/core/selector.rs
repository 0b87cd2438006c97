//! Deterministic selection logic for the scope tree.

use crate::core::tree::ScopeTree;
use crate::core::types::ScopeId;

/// First child of `id`, in discovery order, that is not yet complete.
///
/// Returns `None` when every discovered child is complete (or there are none).
pub fn first_pending_child(tree: &ScopeTree, id: ScopeId) -> Option<ScopeId> {
    tree.node(id)
        .children
        .iter()
        .copied()
        .find(|child| !tree.is_complete(*child))
}

/// Find the first pending scope without pending children via depth-first traversal.
///
/// This is the deepest scope the next pass is known to reach. Children that
/// have not been discovered yet are invisible here, so the next pass may go
/// further. Returns `None` if `id` itself is complete.
pub fn leftmost_pending_frontier(tree: &ScopeTree, id: ScopeId) -> Option<ScopeId> {
    if tree.is_complete(id) {
        return None;
    }
    match first_pending_child(tree, id) {
        Some(child) => leftmost_pending_frontier(tree, child),
        None => Some(id),
    }
}
