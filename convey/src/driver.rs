//! Pass driver for top-level scopes.
//!
//! A [`Runner`] owns a reporter and turns one top-level declaration into as many
//! walker passes as it takes for the root to complete.

use tracing::{Level, debug, enabled, warn};

use crate::context::Context;
use crate::core::selector::leftmost_pending_frontier;
use crate::core::tree::ScopeTree;
use crate::core::types::RunSummary;
use crate::reporter::Reporter;
use crate::walker;

/// Host test-framework hook, told once about a run that recorded failures.
pub trait TestHandle {
    fn fail(&self, summary: &RunSummary);
}

/// Fails the enclosing `#[test]` by panicking.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicOnFailure;

impl TestHandle for PanicOnFailure {
    fn fail(&self, summary: &RunSummary) {
        panic!(
            "convey run failed: {} failed check(s), {} panic(s) over {} pass(es)",
            summary.failures, summary.panics, summary.passes
        );
    }
}

/// Logs failures and lets the caller inspect the returned [`RunReport`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreFailures;

impl TestHandle for IgnoreFailures {
    fn fail(&self, summary: &RunSummary) {
        warn!(
            failures = summary.failures,
            panics = summary.panics,
            "run failed; failure not forwarded"
        );
    }
}

/// Everything a finished top-level run leaves behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub summary: RunSummary,
    /// Final state of every discovered scope.
    pub tree: ScopeTree,
}

/// Drives top-level scopes to completion against one reporter.
#[derive(Debug, Default)]
pub struct Runner<R: Reporter> {
    reporter: R,
}

impl<R: Reporter> Runner<R> {
    pub fn new(reporter: R) -> Self {
        Self { reporter }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Run `body` as a root scope until every leaf below it was visited once.
    ///
    /// Each iteration is one full pass from the root. `handle` is told about
    /// failures once, after the last pass.
    pub fn run<'env, F>(
        &mut self,
        title: &str,
        handle: &dyn TestHandle,
        mut body: F,
    ) -> RunReport
    where
        F: FnMut(&mut Context<'_, 'env>),
    {
        let mut tree = ScopeTree::new(title, false);
        let root = tree.root();
        let mut tally = Tally::new(&mut self.reporter);

        while !tree.is_complete(root) {
            if enabled!(Level::DEBUG) {
                log_frontier(&tree, title, tally.summary.passes + 1);
            }
            walker::visit(&mut tree, &mut tally, root, |context| body(context));
            tally.on_pass_complete();
        }

        let summary = tally.summary;
        tally.on_run_complete(&summary);
        debug!(
            root = title,
            passes = summary.passes,
            scopes = tree.scope_count(),
            "run complete"
        );

        if !summary.is_success() {
            handle.fail(&summary);
        }
        RunReport { summary, tree }
    }

    /// Report `title` as skipped without ever invoking `body`.
    pub fn skip<'env, F>(&mut self, title: &str, _handle: &dyn TestHandle, body: F) -> RunReport
    where
        F: FnMut(&mut Context<'_, 'env>),
    {
        let mut tree = ScopeTree::new(title, true);
        let root = tree.root();
        let mut tally = Tally::new(&mut self.reporter);
        walker::visit(&mut tree, &mut tally, root, body);
        RunReport {
            summary: tally.summary,
            tree,
        }
    }
}

fn log_frontier(tree: &ScopeTree, title: &str, pass: u32) {
    let Some(frontier) = leftmost_pending_frontier(tree, tree.root()) else {
        return;
    };
    debug!(
        root = title,
        pass,
        frontier = tree.path(frontier).as_str(),
        depth = tree.depth(frontier),
        "starting pass"
    );
}

/// Reporter adapter that keeps the run's counters while forwarding events.
struct Tally<'r, R: Reporter + ?Sized> {
    inner: &'r mut R,
    summary: RunSummary,
}

impl<'r, R: Reporter + ?Sized> Tally<'r, R> {
    fn new(inner: &'r mut R) -> Self {
        Self {
            inner,
            summary: RunSummary::default(),
        }
    }
}

impl<R: Reporter + ?Sized> Reporter for Tally<'_, R> {
    fn on_enter(&mut self, title: &str) {
        self.summary.entered += 1;
        self.inner.on_enter(title);
    }

    fn on_fail(&mut self, title: &str, message: &str) {
        self.summary.failures += 1;
        self.inner.on_fail(title, message);
    }

    fn on_panic(&mut self, title: &str, message: &str) {
        self.summary.panics += 1;
        self.inner.on_panic(title, message);
    }

    fn on_skip(&mut self, title: &str) {
        self.summary.skipped += 1;
        self.inner.on_skip(title);
    }

    fn on_pass_complete(&mut self) {
        self.summary.passes += 1;
        self.inner.on_pass_complete();
    }

    fn on_run_complete(&mut self, summary: &RunSummary) {
        self.inner.on_run_complete(summary);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::reporter::{NilReporter, RecordingReporter, ReportEvent};
    use crate::should;

    #[derive(Default)]
    struct CountingHandle {
        calls: Cell<u32>,
    }

    impl TestHandle for CountingHandle {
        fn fail(&self, _summary: &RunSummary) {
            self.calls.set(self.calls.get() + 1);
        }
    }

    #[test]
    fn passes_match_leaf_count() {
        let mut runner = Runner::new(NilReporter);
        let report = runner.run("root", &PanicOnFailure, |c| {
            c.convey("a", |c| {
                c.convey("a1", |_| {});
                c.convey("a2", |_| {});
            });
            c.convey("b", |_| {});
        });

        assert_eq!(report.summary.passes, 3);
        assert_eq!(report.tree.leaves().len(), 3);
        assert!(report.summary.is_success());
    }

    #[test]
    fn handle_is_told_once_about_failures() {
        let handle = CountingHandle::default();
        let mut runner = Runner::new(NilReporter);
        let report = runner.run("root", &handle, |c| {
            c.convey("fails", |c| c.so(1, should::equal(2)));
            c.convey("panics", |_| panic!("boom"));
            c.convey("fine", |_| {});
        });

        assert_eq!(handle.calls.get(), 1);
        assert_eq!(report.summary.failures, 1);
        assert_eq!(report.summary.panics, 1);
        assert_eq!(report.summary.passes, 3);
    }

    #[test]
    fn handle_is_not_told_about_clean_runs() {
        let handle = CountingHandle::default();
        let mut runner = Runner::new(NilReporter);
        runner.run("root", &handle, |c| c.convey("a", |_| {}));
        assert_eq!(handle.calls.get(), 0);
    }

    #[test]
    fn run_ends_with_pass_and_run_events() {
        let mut runner = Runner::new(RecordingReporter::new());
        let report = runner.run("root", &PanicOnFailure, |_| {});

        let events = runner.into_reporter().into_events();
        assert_eq!(
            events,
            vec![
                ReportEvent::Enter {
                    title: "root".to_string()
                },
                ReportEvent::PassComplete,
                ReportEvent::RunComplete {
                    summary: report.summary
                },
            ]
        );
        assert_eq!(report.summary.entered, 1);
    }

    #[test]
    fn skipped_root_emits_only_a_skip_event() {
        let mut runner = Runner::new(RecordingReporter::new());
        let report = runner.skip("root", &PanicOnFailure, |_| panic!("must not run"));

        assert_eq!(
            runner.reporter().events(),
            [ReportEvent::Skip {
                title: "root".to_string()
            }]
        );
        assert_eq!(report.summary.skipped, 1);
        assert_eq!(report.summary.passes, 0);
        assert!(report.tree.node(report.tree.root()).skip);
    }

    #[test]
    fn debug_subscriber_sees_the_same_passes() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_test_writer()
            .finish();

        let report = tracing::subscriber::with_default(subscriber, || {
            let mut runner = Runner::new(NilReporter);
            runner.run("root", &PanicOnFailure, |c| {
                c.convey("a", |c| c.convey("a1", |_| {}));
                c.convey("b", |_| {});
            })
        });

        assert_eq!(report.summary.passes, 2);
        let a1 = report
            .tree
            .leaves()
            .into_iter()
            .find(|id| report.tree.node(*id).title == "a1")
            .expect("a1 discovered");
        assert_eq!(report.tree.path(a1), "root/a/a1");
        assert_eq!(report.tree.depth(a1), 2);
    }
}
