use tracing::{error, info, warn};

use crate::core::types::RunSummary;
use crate::reporter::Reporter;

/// Reporter that renders events as `tracing` events.
///
/// Enter and skip go out at `info`, failures at `warn`, panics at `error`.
/// Output goes wherever the installed subscriber sends it (see
/// [`logging::init`](crate::logging::init)).
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter {
    passes: u32,
}

impl Reporter for TracingReporter {
    fn on_enter(&mut self, title: &str) {
        info!(scope = title, pass = self.passes + 1, "enter");
    }

    fn on_fail(&mut self, title: &str, message: &str) {
        warn!(scope = title, %message, "check failed");
    }

    fn on_panic(&mut self, title: &str, message: &str) {
        error!(scope = title, %message, "scope panicked");
    }

    fn on_skip(&mut self, title: &str) {
        info!(scope = title, "skipped");
    }

    fn on_pass_complete(&mut self) {
        self.passes += 1;
        info!(pass = self.passes, "pass complete");
    }

    fn on_run_complete(&mut self, summary: &RunSummary) {
        self.passes = 0;
        if summary.is_success() {
            info!(
                passes = summary.passes,
                skipped = summary.skipped,
                "run complete"
            );
        } else {
            warn!(
                passes = summary.passes,
                failures = summary.failures,
                panics = summary.panics,
                skipped = summary.skipped,
                "run complete with failures"
            );
        }
    }
}
