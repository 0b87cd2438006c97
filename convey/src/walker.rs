//! Single-pass recursive descent over the scope tree.
//!
//! One call to [`visit`] on the root is one pass: the root body runs, at most
//! one pending child is entered per scope, and resets fire on the way back out.

use tracing::{debug, warn};

use crate::context::{Body, Context, Reset};
use crate::core::capture::{self, Abort};
use crate::core::selector::first_pending_child;
use crate::core::tree::ScopeTree;
use crate::core::types::{AbortKind, ScopeId};
use crate::reporter::Reporter;

/// Run `body` as scope `id`, then descend into its first pending child.
pub(crate) fn visit<'env, F>(
    tree: &mut ScopeTree,
    reporter: &mut dyn Reporter,
    id: ScopeId,
    body: F,
) where
    F: FnOnce(&mut Context<'_, 'env>),
{
    let node = tree.node(id);
    let title = node.title.clone();
    let (skip, complete) = (node.skip, node.is_complete());
    if skip {
        if tree.mark_complete(id) {
            reporter.on_skip(&title);
        }
        return;
    }
    if complete {
        debug!(scope = title.as_str(), "already complete, not entering");
        return;
    }

    reporter.on_enter(&title);
    let mut context = Context::new(tree, reporter, id);
    let result = capture::invoke(|| body(&mut context));
    let frame = context.into_frame();

    match result {
        Ok(()) => {
            tree.record_outcome(id, None);
            descend(tree, reporter, id, frame.selected);
        }
        Err(abort) => {
            tree.record_outcome(id, Some(abort.kind));
            tree.mark_complete(id);
            report_abort(reporter, &title, &abort);
        }
    }

    fire_resets(reporter, &title, frame.resets);
}

/// Enter the first pending child of `id`, then complete `id` if none is left.
///
/// Every child is discovered by the time the body returns, so the check after
/// the child's visit sees the full set and the last leaf completes its
/// ancestors on the same pass.
fn descend<'env>(
    tree: &mut ScopeTree,
    reporter: &mut dyn Reporter,
    id: ScopeId,
    selected: Option<(ScopeId, Body<'env>)>,
) {
    if let Some(child) = first_pending_child(tree, id) {
        match selected {
            Some((selected_id, body)) if selected_id == child => {
                visit(tree, reporter, child, body);
            }
            _ => {
                // The body stopped declaring a child it declared on an earlier pass.
                warn!(
                    scope = tree.path(child).as_str(),
                    "pending scope was not declared on this pass; marking it complete"
                );
                tree.mark_complete(child);
            }
        }
    }

    if first_pending_child(tree, id).is_none() {
        debug!(scope = tree.node(id).title.as_str(), "exhausted");
        tree.mark_complete(id);
    }
}

fn fire_resets(reporter: &mut dyn Reporter, title: &str, resets: Vec<Reset<'_>>) {
    for reset in resets {
        if let Err(abort) = capture::invoke(reset) {
            let abort = Abort {
                message: format!("reset: {}", abort.message),
                ..abort
            };
            report_abort(reporter, title, &abort);
        }
    }
}

fn report_abort(reporter: &mut dyn Reporter, title: &str, abort: &Abort) {
    match abort.kind {
        AbortKind::Failed => reporter.on_fail(title, &abort.message),
        AbortKind::Panicked => reporter.on_panic(title, &abort.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Completion;
    use crate::reporter::{RecordingReporter, ReportEvent};
    use crate::should;

    fn enter(title: &str) -> ReportEvent {
        ReportEvent::Enter {
            title: title.to_string(),
        }
    }

    #[test]
    fn one_pass_enters_only_the_first_pending_child() {
        let mut tree = ScopeTree::new("root", false);
        let mut recorder = RecordingReporter::new();
        let root = tree.root();

        visit(&mut tree, &mut recorder, root, |c| {
            c.convey("a", |_| {});
            c.convey("b", |_| {});
        });

        assert_eq!(recorder.events(), [enter("root"), enter("a")]);
        let children = tree.node(root).children.clone();
        assert_eq!(tree.node(children[0]).completion, Completion::Complete);
        assert_eq!(tree.node(children[1]).completion, Completion::Pending);
        assert!(!tree.is_complete(root));
    }

    #[test]
    fn root_completes_once_children_are_exhausted() {
        let mut tree = ScopeTree::new("root", false);
        let mut recorder = RecordingReporter::new();
        let root = tree.root();

        for _ in 0..2 {
            visit(&mut tree, &mut recorder, root, |c| {
                c.convey("a", |_| {});
                c.convey("b", |_| {});
            });
        }

        assert!(tree.is_complete(root));
        assert_eq!(recorder.entered(), vec!["root", "a", "root", "b"]);
        assert_eq!(tree.node(root).outcome, None);
    }

    #[test]
    fn failed_body_records_outcome_and_skips_children() {
        let mut tree = ScopeTree::new("root", false);
        let mut recorder = RecordingReporter::new();
        let root = tree.root();

        visit(&mut tree, &mut recorder, root, |c| {
            c.convey("never", |_| panic!("must not run"));
            c.so(1, should::equal(2));
        });

        let node = tree.node(root);
        assert_eq!(node.outcome, Some(AbortKind::Failed));
        assert!(node.is_complete());
        assert_eq!(recorder.entered(), vec!["root"]);
        assert!(matches!(recorder.events()[1], ReportEvent::Fail { .. }));
    }

    #[test]
    fn skip_flagged_node_is_reported_without_entering() {
        let mut tree = ScopeTree::new("root", true);
        let mut recorder = RecordingReporter::new();
        let root = tree.root();

        visit(&mut tree, &mut recorder, root, |_| panic!("must not run"));

        assert!(tree.is_complete(root));
        assert_eq!(
            recorder.events(),
            [ReportEvent::Skip {
                title: "root".to_string()
            }]
        );
    }

    #[test]
    fn complete_node_is_a_no_op() {
        let mut tree = ScopeTree::new("root", false);
        let mut recorder = RecordingReporter::new();
        let root = tree.root();
        tree.mark_complete(root);

        visit(&mut tree, &mut recorder, root, |_| panic!("must not run"));

        assert!(recorder.events().is_empty());
    }

    #[test]
    fn vanished_child_is_completed_so_passes_converge() {
        let mut tree = ScopeTree::new("root", false);
        let mut recorder = RecordingReporter::new();
        let root = tree.root();
        let mut declared = 3;

        while !tree.is_complete(root) {
            let count = declared;
            visit(&mut tree, &mut recorder, root, |c| {
                for n in 0..count {
                    c.convey(&n.to_string(), |_| {});
                }
            });
            declared = 1;
        }

        let children = &tree.node(root).children;
        assert_eq!(children.len(), 3);
        assert!(children.iter().all(|child| tree.is_complete(*child)));
    }

    #[test]
    fn panicking_reset_is_reported_and_later_resets_still_fire() {
        let mut tree = ScopeTree::new("root", false);
        let mut recorder = RecordingReporter::new();
        let root = tree.root();
        let fired = std::cell::Cell::new(false);
        let fired = &fired;

        visit(&mut tree, &mut recorder, root, move |c| {
            c.reset(|| panic!("cleanup broke"));
            c.reset(move || fired.set(true));
        });

        assert!(fired.get());
        assert_eq!(
            recorder.events()[1],
            ReportEvent::Panic {
                title: "root".to_string(),
                message: "reset: cleanup broke".to_string(),
            }
        );
    }
}
