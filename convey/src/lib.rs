//! Behaviour-driven scope-tree test engine.
//!
//! Tests are written as nested scopes. Every leaf runs with its full chain of
//! ancestors freshly re-executed, and each ancestor's resets fire once per leaf
//! reached through it. There is no suspension underneath: the root body is
//! simply re-run from the top, one pass per leaf, and completed subtrees are
//! skipped on the way down.
//!
//! - **[`core`]**: Pure, deterministic logic (scope tree, selection, unwind
//!   capture). No reporting or I/O.
//! - **`walker`** (private) and **[`driver`]**: one pass, and the loop of
//!   passes that completes a top-level scope.
//! - **[`reporter`]**, **[`should`]**: the collaborator seams for lifecycle
//!   events and checks.
//!
//! ```
//! use std::cell::RefCell;
//!
//! use convey::{IgnoreFailures, convey, should};
//!
//! let log = RefCell::new(Vec::new());
//! let log = &log;
//! let summary = convey("a stack", &IgnoreFailures, move |c| {
//!     let stack = vec![1];
//!     log.borrow_mut().push("setup");
//!     c.reset(move || log.borrow_mut().push("reset"));
//!
//!     let pushed = stack.clone();
//!     c.convey("push", move |c| {
//!         let mut stack = pushed;
//!         stack.push(2);
//!         c.so(stack.len(), should::equal(2));
//!     });
//!     c.convey("pop", move |c| {
//!         let mut stack = stack;
//!         c.so(stack.pop(), should::equal(Some(1)));
//!     });
//! });
//!
//! assert_eq!(summary.passes, 2);
//! assert_eq!(*log.borrow(), ["setup", "reset", "setup", "reset"]);
//! ```

pub mod config;
pub mod context;
pub mod core;
pub mod driver;
pub mod logging;
pub mod reporter;
pub mod should;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
mod walker;

pub use crate::context::Context;
pub use crate::core::types::RunSummary;
pub use crate::driver::{IgnoreFailures, PanicOnFailure, RunReport, Runner, TestHandle};
pub use crate::reporter::Reporter;

use tracing::warn;

use crate::config::{ConveyConfig, ReporterKind};

/// Run a top-level scope with the reporter named by the environment's
/// configuration (see [`config`]).
///
/// `handle` is told once, at the end, if any check failed or any body panicked.
pub fn convey<'env, F>(title: &str, handle: &dyn TestHandle, body: F) -> RunSummary
where
    F: FnMut(&mut Context<'_, 'env>),
{
    let mut runner = runner_from_env();
    let summary = runner.run(title, handle, body).summary;
    warn_on_output_error(runner.into_reporter());
    summary
}

/// Declare a top-level scope that is reported as skipped and never runs.
pub fn skip_convey<'env, F>(title: &str, handle: &dyn TestHandle, body: F) -> RunSummary
where
    F: FnMut(&mut Context<'_, 'env>),
{
    let mut runner = runner_from_env();
    let summary = runner.skip(title, handle, body).summary;
    warn_on_output_error(runner.into_reporter());
    summary
}

fn runner_from_env() -> Runner<Box<dyn Reporter>> {
    let cfg = ConveyConfig::from_env().unwrap_or_else(|err| {
        warn!("ignoring convey config: {err:#}");
        ConveyConfig::default()
    });
    if cfg.reporter == ReporterKind::Tracing {
        logging::init_with_default(&cfg.log_filter);
    }
    Runner::new(cfg.reporter())
}

fn warn_on_output_error(mut reporter: Box<dyn Reporter>) {
    if let Some(err) = reporter.take_error() {
        warn!("convey report output failed: {err:#}");
    }
}
