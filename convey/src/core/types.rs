//! Shared deterministic types for the scope engine.
//!
//! These types define stable contracts between the walker, the pass driver and
//! reporters. They must remain deterministic across runs.

use serde::{Deserialize, Serialize};

/// Positional identity of a scope inside a [`ScopeTree`](crate::core::tree::ScopeTree).
///
/// Ids are handed out in discovery order and never reused. Titles are not part
/// of identity: two siblings may share a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeId(pub(crate) usize);

impl ScopeId {
    /// Arena index of this scope.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Whether a scope can still be entered on a future pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Completion {
    #[default]
    Pending,
    /// Terminal: the scope's body is never invoked again.
    Complete,
}

/// Why a scope body stopped before reaching its natural end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbortKind {
    /// A check inside the body did not hold.
    Failed,
    /// The body panicked.
    Panicked,
}

/// Counters for one top-level run.
///
/// `failures` and `panics` include aborts anywhere in the tree, reset callbacks
/// included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of completed passes over the root.
    pub passes: u32,
    /// Number of scope entries, counted once per pass per scope.
    pub entered: u32,
    pub failures: u32,
    pub panics: u32,
    pub skipped: u32,
}

impl RunSummary {
    /// True when no failure or panic was recorded.
    pub fn is_success(&self) -> bool {
        self.failures == 0 && self.panics == 0
    }
}
