//! Tracing setup for the command-line binary.
//!
//! Diagnostics always go to stderr; stdout is reserved for the JSON envelope.

use tracing::Level;
use tracing_subscriber::filter::EnvFilter;

/// Maps the number of `-v` flags to a log level (default: warnings only)
pub fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `verbose`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(verbose: u8) {
    let default_level = level_for_verbosity(verbose);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str().to_lowercase()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
