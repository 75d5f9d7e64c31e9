// src/logging.rs
// =============================================================================
// Sets up `tracing` output for the binary.
//
// Logs go to stderr so `--json` output on stdout stays machine-readable.
// RUST_LOG wins over the default filter when it is set.
// =============================================================================

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "doc_crawler=debug"
    } else {
        "doc_crawler=warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
