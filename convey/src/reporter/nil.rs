use crate::core::types::RunSummary;
use crate::reporter::Reporter;

/// Reporter that accepts every event and does nothing with it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NilReporter;

impl Reporter for NilReporter {
    fn on_enter(&mut self, _title: &str) {}

    fn on_fail(&mut self, _title: &str, _message: &str) {}

    fn on_panic(&mut self, _title: &str, _message: &str) {}

    fn on_skip(&mut self, _title: &str) {}

    fn on_pass_complete(&mut self) {}

    fn on_run_complete(&mut self, _summary: &RunSummary) {}
}
