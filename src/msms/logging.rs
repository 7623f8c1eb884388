//! Diagnostic logging setup.
//!
//! Everything is written to stderr so it never mixes with command output.
//! The filter comes from `MSMS_LOG` (standard `EnvFilter` syntax); without it
//! only warnings show, or debug output with `--verbose`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "MSMS_LOG";

/// Installs the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(verbose: bool) {
    let default_directive = if verbose { "msms=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
