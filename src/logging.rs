//! Diagnostic tracing.
//!
//! Reads `RUST_LOG` and writes to stderr so that events never interleave
//! with the board printed on stdout. The TUI owns the terminal, so play mode
//! should be run with stderr redirected when tracing is turned up.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Defaults to `warn` if `RUST_LOG` is unset.
///
/// # Example
/// ```bash
/// RUST_LOG=lockbreaker=debug lockbreaker simple
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
