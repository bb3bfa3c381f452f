//! Tracing setup shared by the binaries.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Initializes the fmt subscriber.
///
/// `verbosity` 0 shows warnings only and saturates at trace; `RUST_LOG`
/// directives take precedence.
pub fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
