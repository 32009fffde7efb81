//! Shared logging initialization for fabric binaries, examples, and tests.
//!
//! Trimmed relative to a full service's logging stack (no rolling file
//! appender, no log directory under the user's home) because the fabric is
//! consumed as a library: callers that *do* want file-backed logs can layer
//! their own `tracing_subscriber` writer on top of the same `EnvFilter`.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "fabric_core=info,fabric_protocol=info";

/// Initialize `tracing` with an env-configurable filter and a stderr writer.
///
/// Safe to call more than once per process; a later call finding a
/// subscriber already installed is treated as success, not an error
/// (mirrors `tracing_subscriber`'s own idempotent `try_init`).
pub fn init() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .try_init()
    {
        Ok(()) | Err(_) => Ok(()),
    }
}
