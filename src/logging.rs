//! Diagnostic logging setup (stderr, filtered by `RCOPYWRITER_LOG` or -v).

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "RCOPYWRITER_LOG";

/// Filter used when `RCOPYWRITER_LOG` is not set.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
