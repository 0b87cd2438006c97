//! The handle a scope body receives on every pass.
//!
//! A [`Context`] is the per-pass frame of exactly one scope. Declaring a nested
//! scope through it only *registers* the child; the walker decides after the
//! body returns whether that child is entered on this pass. Resets collected
//! here fire once the frame's pass through the scope is over.

use tracing::trace;

use crate::core::capture;
use crate::core::tree::ScopeTree;
use crate::core::types::ScopeId;
use crate::reporter::Reporter;
use crate::should::{Assertion, Verdict};

/// Body of a nested scope, recreated by its parent on every pass.
pub(crate) type Body<'env> = Box<dyn FnOnce(&mut Context<'_, 'env>) + 'env>;

/// Cleanup callback registered during a pass.
pub(crate) type Reset<'env> = Box<dyn FnOnce() + 'env>;

/// Registration handle for the scope whose body is currently executing.
///
/// `'env` is the lifetime of state that outlives the whole top-level run.
/// Nested bodies and resets may borrow from it; values local to a body must be
/// moved into the closures that need them.
pub struct Context<'a, 'env> {
    tree: &'a mut ScopeTree,
    reporter: &'a mut dyn Reporter,
    node: ScopeId,
    /// Discovery position of the next nested declaration.
    cursor: usize,
    /// First still-pending child declared on this pass, with its body.
    selected: Option<(ScopeId, Body<'env>)>,
    resets: Vec<Reset<'env>>,
}

/// What a finished body left behind for the walker.
pub(crate) struct Frame<'env> {
    pub(crate) selected: Option<(ScopeId, Body<'env>)>,
    pub(crate) resets: Vec<Reset<'env>>,
}

impl<'a, 'env> Context<'a, 'env> {
    pub(crate) fn new(
        tree: &'a mut ScopeTree,
        reporter: &'a mut dyn Reporter,
        node: ScopeId,
    ) -> Self {
        Self {
            tree,
            reporter,
            node,
            cursor: 0,
            selected: None,
            resets: Vec::new(),
        }
    }

    pub(crate) fn into_frame(self) -> Frame<'env> {
        Frame {
            selected: self.selected,
            resets: self.resets,
        }
    }

    /// Title of the scope this body belongs to.
    pub fn title(&self) -> &str {
        &self.tree.node(self.node).title
    }

    /// Slash-joined titles from the root to this scope.
    pub fn path(&self) -> String {
        self.tree.path(self.node)
    }

    /// Declare a nested scope.
    ///
    /// The body does not run here. It runs after the current body returns, and
    /// only if this is the first unfinished child on this pass and the current
    /// body did not fail.
    pub fn convey<F>(&mut self, title: &str, body: F)
    where
        F: FnOnce(&mut Context<'_, 'env>) + 'env,
    {
        let id = self.register(title, false);
        if self.selected.is_none() && !self.tree.is_complete(id) {
            trace!(scope = title, id = id.index(), "selected for this pass");
            self.selected = Some((id, Box::new(body)));
        }
    }

    /// Declare a nested scope that never runs.
    ///
    /// Nothing inside `body` executes, so its own nested scopes are never
    /// discovered either.
    pub fn skip_convey<F>(&mut self, title: &str, body: F)
    where
        F: FnOnce(&mut Context<'_, 'env>) + 'env,
    {
        self.register(title, true);
        drop(body);
    }

    /// Register a cleanup callback for this scope.
    ///
    /// Resets fire in registration order after the child entered on this pass
    /// returns, whether or not anything failed.
    pub fn reset<F>(&mut self, cleanup: F)
    where
        F: FnOnce() + 'env,
    {
        self.resets.push(Box::new(cleanup));
    }

    /// Check `actual` against `assertion`.
    ///
    /// A failing check aborts the rest of the current body. The scope is marked
    /// complete and none of the children it declared will run.
    pub fn so<A, P>(&self, actual: A, assertion: P)
    where
        P: Assertion<A>,
    {
        if let Verdict::Fail(message) = assertion.check(&actual) {
            trace!(scope = self.title(), "check failed");
            capture::fail_check(message);
        }
    }

    fn register(&mut self, title: &str, skip: bool) -> ScopeId {
        let position = self.cursor;
        self.cursor += 1;
        if let Some(existing) = self.tree.child_at(self.node, position) {
            return existing;
        }

        let id = self.tree.add_child(self.node, title, skip);
        trace!(
            scope = title,
            parent = self.tree.node(self.node).title.as_str(),
            position,
            skip,
            "discovered scope"
        );
        if skip && self.tree.mark_complete(id) {
            self.reporter.on_skip(title);
        }
        id
    }
}
