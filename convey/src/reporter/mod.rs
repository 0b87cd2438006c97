//! Sinks for scope lifecycle events.
//!
//! The engine calls a [`Reporter`] but owns none of its formatting. Shipped
//! implementations:
//!
//! - [`NilReporter`]: accepts everything silently (engine self-tests).
//! - [`RecordingReporter`]: keeps every event as a [`ReportEvent`].
//! - [`TracingReporter`]: forwards events to `tracing`.
//! - [`JsonLinesReporter`]: writes one JSON object per event.

use serde::{Deserialize, Serialize};

use crate::core::types::RunSummary;

mod json;
mod nil;
mod recording;
mod trace;

pub use json::JsonLinesReporter;
pub use nil::NilReporter;
pub use recording::RecordingReporter;
pub use trace::TracingReporter;

/// Receiver of structural events from the pass driver and walker.
pub trait Reporter {
    /// A scope's body is about to run on this pass.
    fn on_enter(&mut self, title: &str);
    /// A check inside the scope's own body failed.
    fn on_fail(&mut self, title: &str, message: &str);
    /// The scope's own body (or one of its resets) panicked.
    fn on_panic(&mut self, title: &str, message: &str);
    /// The scope was skip-declared and will never run.
    fn on_skip(&mut self, title: &str);
    /// One pass over the root finished.
    fn on_pass_complete(&mut self);
    /// The root is complete; no further passes follow.
    fn on_run_complete(&mut self, summary: &RunSummary);

    /// Hand back the first output error, if the reporter writes anywhere.
    ///
    /// Event methods cannot fail, so reporters that do I/O keep the error
    /// until someone asks for it here.
    fn take_error(&mut self) -> Option<anyhow::Error> {
        None
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn on_enter(&mut self, title: &str) {
        (**self).on_enter(title);
    }

    fn on_fail(&mut self, title: &str, message: &str) {
        (**self).on_fail(title, message);
    }

    fn on_panic(&mut self, title: &str, message: &str) {
        (**self).on_panic(title, message);
    }

    fn on_skip(&mut self, title: &str) {
        (**self).on_skip(title);
    }

    fn on_pass_complete(&mut self) {
        (**self).on_pass_complete();
    }

    fn on_run_complete(&mut self, summary: &RunSummary) {
        (**self).on_run_complete(summary);
    }

    fn take_error(&mut self) -> Option<anyhow::Error> {
        (**self).take_error()
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn on_enter(&mut self, title: &str) {
        (**self).on_enter(title);
    }

    fn on_fail(&mut self, title: &str, message: &str) {
        (**self).on_fail(title, message);
    }

    fn on_panic(&mut self, title: &str, message: &str) {
        (**self).on_panic(title, message);
    }

    fn on_skip(&mut self, title: &str) {
        (**self).on_skip(title);
    }

    fn on_pass_complete(&mut self) {
        (**self).on_pass_complete();
    }

    fn on_run_complete(&mut self, summary: &RunSummary) {
        (**self).on_run_complete(summary);
    }

    fn take_error(&mut self) -> Option<anyhow::Error> {
        (**self).take_error()
    }
}

/// Owned record of a single [`Reporter`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReportEvent {
    Enter { title: String },
    Fail { title: String, message: String },
    Panic { title: String, message: String },
    Skip { title: String },
    PassComplete,
    RunComplete { summary: RunSummary },
}

impl ReportEvent {
    /// Title of the scope the event is about, if any.
    pub fn title(&self) -> Option<&str> {
        match self {
            ReportEvent::Enter { title }
            | ReportEvent::Fail { title, .. }
            | ReportEvent::Panic { title, .. }
            | ReportEvent::Skip { title } => Some(title),
            ReportEvent::PassComplete | ReportEvent::RunComplete { .. } => None,
        }
    }
}
