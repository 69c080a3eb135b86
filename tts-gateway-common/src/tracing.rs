//! Logging setup for the gateway.
//!
//! Logs go to stderr as human-readable lines. When a request span closes
//! (`tts_v1`, `tts_v2`, and the provider spans inside them), a line carrying
//! its busy and idle time is emitted. That line is the per-request timing
//! record.
//!
//! Filtering follows `RUST_LOG`, e.g. `RUST_LOG=tts_gateway=debug` to see the
//! audio file paths and the client's stdout. Without it, [`DEFAULT_FILTER`]
//! applies.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
};

/// Filter used when `RUST_LOG` is unset or unparsable.
///
/// Connection-level chatter from the HTTP stacks is held back to warnings.
pub const DEFAULT_FILTER: &str = "info,hyper=warn,hyper_util=warn,reqwest=warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn subscriber() -> impl ::tracing::Subscriber + Send + Sync + 'static + use<> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
}

/// Install the global subscriber.
///
/// # Panics
///
/// Panics if a global subscriber is already set.
pub fn init_tracing() {
    subscriber().init();
}

/// Install the global subscriber unless one is already set.
pub fn try_init_tracing() -> Result<(), ()> {
    subscriber().try_init().map_err(|_| ())
}
