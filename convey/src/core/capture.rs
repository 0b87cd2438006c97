//! Unwind boundary around a single scope body.
//!
//! A failing check unwinds with a [`CheckFailure`] payload; any other payload is
//! an ordinary panic. Both are caught by [`invoke`] at the boundary of the scope
//! whose body raised them and never travel further.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::core::types::AbortKind;

/// Unwind payload raised by a failing check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFailure {
    pub message: String,
}

/// A body that stopped early, with the message to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Abort {
    pub kind: AbortKind,
    pub message: String,
}

/// Run `body`, converting any unwind out of it into an [`Abort`].
pub fn invoke<F: FnOnce()>(body: F) -> Result<(), Abort> {
    panic::catch_unwind(AssertUnwindSafe(body)).map_err(classify)
}

/// Abort the currently executing body as `Failed`.
///
/// Uses `resume_unwind` so the process panic hook stays quiet for check
/// failures; they are reported through the reporter instead.
pub(crate) fn fail_check(message: String) -> ! {
    panic::resume_unwind(Box::new(CheckFailure { message }))
}

fn classify(payload: Box<dyn Any + Send>) -> Abort {
    match payload.downcast::<CheckFailure>() {
        Ok(failure) => Abort {
            kind: AbortKind::Failed,
            message: failure.message,
        },
        Err(payload) => Abort {
            kind: AbortKind::Panicked,
            message: panic_message(&*payload),
        },
    }
}

/// Extract a human-readable message from a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
