use std::io::Write;

use anyhow::{Context, Result};

use crate::core::types::RunSummary;
use crate::reporter::{ReportEvent, Reporter};

/// Reporter that writes one JSON object per event, newline-terminated.
///
/// Write errors cannot abort a run, so the first one is kept and returned from
/// [`finish`](JsonLinesReporter::finish) or [`Reporter::take_error`]; later
/// events are dropped. The writer is flushed when the run completes.
#[derive(Debug)]
pub struct JsonLinesReporter<W: Write> {
    writer: W,
    error: Option<anyhow::Error>,
}

impl<W: Write> JsonLinesReporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Flush and hand back the writer, or the first write error.
    pub fn finish(mut self) -> Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush().context("flush json report")?;
        Ok(self.writer)
    }

    fn emit(&mut self, event: ReportEvent) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = write_line(&mut self.writer, &event) {
            self.error = Some(err);
        }
    }
}

fn write_line<W: Write>(writer: &mut W, event: &ReportEvent) -> Result<()> {
    serde_json::to_writer(&mut *writer, event).context("serialize report event")?;
    writer.write_all(b"\n").context("write report newline")?;
    Ok(())
}

impl<W: Write> Reporter for JsonLinesReporter<W> {
    fn on_enter(&mut self, title: &str) {
        self.emit(ReportEvent::Enter {
            title: title.to_string(),
        });
    }

    fn on_fail(&mut self, title: &str, message: &str) {
        self.emit(ReportEvent::Fail {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn on_panic(&mut self, title: &str, message: &str) {
        self.emit(ReportEvent::Panic {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn on_skip(&mut self, title: &str) {
        self.emit(ReportEvent::Skip {
            title: title.to_string(),
        });
    }

    fn on_pass_complete(&mut self) {
        self.emit(ReportEvent::PassComplete);
    }

    fn on_run_complete(&mut self, summary: &RunSummary) {
        self.emit(ReportEvent::RunComplete { summary: *summary });
        if self.error.is_none() {
            self.error = self.writer.flush().context("flush json report").err();
        }
    }

    fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }
}
