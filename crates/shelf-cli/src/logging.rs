//! Logging setup for the `shelf` binary.
//!
//! Logs go to stderr so table/JSONL/CSV output on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Level used when neither `SHELF_LOG` nor `RUST_LOG` is set.
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env("SHELF_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .init();

    tracing::debug!(verbose, "logging initialized");
}
