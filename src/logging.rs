//! Diagnostic logging setup.
//!
//! User-facing output goes through [`crate::ui::Ui`]; `tracing` events are
//! diagnostics written to stderr and are quiet unless asked for.

use std::io;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directive for a `-v` count
///
/// 0 = warn, 1 = info, 2 = debug, 3+ = trace.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "ccswitch=warn",
        1 => "ccswitch=info",
        2 => "ccswitch=debug",
        _ => "ccswitch=trace",
    }
}

/// Initialize the tracing subscriber
///
/// `RUST_LOG` overrides the verbosity-derived filter.
pub fn init_logging(verbose: u8, color: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_ansi(color)
        .without_time()
        .with_writer(io::stderr);

    // Ignore a second init (tests, embedding)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
