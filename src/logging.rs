//! Logging prelude module for convenient access to tracing macros.
//!
//! Re-exports the common tracing macros and provides the subscriber setup
//! used by the binary.

#[allow(unused_imports)]
pub use tracing::{debug, error, info, warn};

/// Initialize the tracing subscriber with environment filter support.
///
/// `default_level` (normally from the config file) applies when `RUST_LOG`
/// is not set:
///
/// ```bash
/// RUST_LOG=debug sharesync run
/// RUST_LOG=sharesync::resolve=trace sharesync run
/// ```
pub fn init_tracing(default_level: &str) {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
		)
		.with_writer(std::io::stderr)
		.init();
}

// vim: ts=4
