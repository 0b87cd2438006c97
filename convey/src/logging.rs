//! Subscriber setup for the engine's diagnostics.
//!
//! Two kinds of output share the same subscriber but answer to different knobs:
//!
//! - Engine diagnostics (pass starts, child selection, discovery) are plain
//!   `tracing` events, filtered by `RUST_LOG`.
//! - Run results go through a [`Reporter`](crate::reporter::Reporter). Only the
//!   [`TracingReporter`](crate::reporter::TracingReporter) lands here; the JSON
//!   and nil reporters ignore `RUST_LOG` entirely.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber with a `warn` fallback filter.
///
/// ```bash
/// RUST_LOG=convey=trace cargo test -- --nocapture
/// ```
pub fn init() {
    init_with_default("warn");
}

/// Install the stderr subscriber, falling back to `default_filter` when
/// `RUST_LOG` is unset or unparsable.
///
/// Safe to call from every test: once a global subscriber exists, later calls
/// do nothing.
pub fn init_with_default(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
