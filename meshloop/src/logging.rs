//! Diagnostics for the preview loop.
//!
//! Everything goes to stderr: stdout belongs to the build and target output,
//! which is streamed to the terminal as it arrives and parsed for settings.

use std::io::{self, IsTerminal};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber.
///
/// Filter comes from `RUST_LOG`, falling back to `warn`; malformed directives
/// are skipped rather than aborting the loop. Calling this more than once is a no-op.
///
/// ```bash
/// RUST_LOG=meshloop=debug meshloop scene.obj -s 42
/// ```
pub fn init() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}
