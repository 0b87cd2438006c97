use crate::core::types::RunSummary;
use crate::reporter::{ReportEvent, Reporter};

/// Reporter that keeps every event in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingReporter {
    events: Vec<ReportEvent>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ReportEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<ReportEvent> {
        self.events
    }

    /// Titles of entered scopes, in entry order.
    pub fn entered(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ReportEvent::Enter { title } => Some(title.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn on_enter(&mut self, title: &str) {
        self.events.push(ReportEvent::Enter {
            title: title.to_string(),
        });
    }

    fn on_fail(&mut self, title: &str, message: &str) {
        self.events.push(ReportEvent::Fail {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn on_panic(&mut self, title: &str, message: &str) {
        self.events.push(ReportEvent::Panic {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn on_skip(&mut self, title: &str) {
        self.events.push(ReportEvent::Skip {
            title: title.to_string(),
        });
    }

    fn on_pass_complete(&mut self) {
        self.events.push(ReportEvent::PassComplete);
    }

    fn on_run_complete(&mut self, summary: &RunSummary) {
        self.events.push(ReportEvent::RunComplete { summary: *summary });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entered_filters_enter_events() {
        let mut recorder = RecordingReporter::new();
        recorder.on_enter("a");
        recorder.on_fail("a", "nope");
        recorder.on_enter("b");
        recorder.on_pass_complete();
        assert_eq!(recorder.entered(), vec!["a", "b"]);
        assert_eq!(recorder.events().len(), 4);
    }
}
