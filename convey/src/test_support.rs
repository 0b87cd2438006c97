//! Test-only helpers for driving scope trees and observing their effects.

use std::cell::{Cell, RefCell};

use crate::context::Context;
use crate::core::types::RunSummary;
use crate::driver::{RunReport, Runner, TestHandle};
use crate::reporter::{RecordingReporter, ReportEvent};

/// Shared output buffer that scope bodies append to.
///
/// Declare it outside the top-level call and hand `&Transcript` to `move`
/// closures; the buffer then survives every pass.
#[derive(Debug, Default)]
pub struct Transcript {
    out: RefCell<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, text: impl AsRef<str>) {
        self.out.borrow_mut().push_str(text.as_ref());
    }

    pub fn contents(&self) -> String {
        self.out.borrow().clone()
    }
}

/// Test handle that counts failure signals instead of panicking.
#[derive(Debug, Default)]
pub struct RecordingHandle {
    failures: Cell<u32>,
    last: Cell<Option<RunSummary>>,
}

impl RecordingHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times a run signalled failure.
    pub fn failures(&self) -> u32 {
        self.failures.get()
    }

    pub fn last_summary(&self) -> Option<RunSummary> {
        self.last.get()
    }
}

impl TestHandle for RecordingHandle {
    fn fail(&self, summary: &RunSummary) {
        self.failures.set(self.failures.get() + 1);
        self.last.set(Some(*summary));
    }
}

/// A finished run together with everything it reported.
#[derive(Debug)]
pub struct Recorded {
    pub report: RunReport,
    pub events: Vec<ReportEvent>,
    /// Whether the test handle was told about a failure.
    pub signalled_failure: bool,
}

/// Run `body` as a root scope against a [`RecordingReporter`] and a
/// [`RecordingHandle`].
pub fn run_recorded<'env, F>(title: &str, body: F) -> Recorded
where
    F: FnMut(&mut Context<'_, 'env>),
{
    let handle = RecordingHandle::new();
    let mut runner = Runner::new(RecordingReporter::new());
    let report = runner.run(title, &handle, body);
    Recorded {
        report,
        events: runner.into_reporter().into_events(),
        signalled_failure: handle.failures() > 0,
    }
}

/// Like [`run_recorded`], for a skip-declared root.
pub fn skip_recorded<'env, F>(title: &str, body: F) -> Recorded
where
    F: FnMut(&mut Context<'_, 'env>),
{
    let handle = RecordingHandle::new();
    let mut runner = Runner::new(RecordingReporter::new());
    let report = runner.skip(title, &handle, body);
    Recorded {
        report,
        events: runner.into_reporter().into_events(),
        signalled_failure: handle.failures() > 0,
    }
}
