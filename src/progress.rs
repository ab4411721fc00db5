//! Progress indicator shown while a backend process runs
//!
//! Purely cosmetic: one dot per tick on stderr, so captured stdout/stderr
//! of the child and the parsed statistics are never affected.

use std::io::Write;
use std::time::Duration;

/// Tick interval for the indicator
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Writes `Synchronizing: ` on the first tick, then one dot per tick
#[derive(Debug, Default)]
pub struct Ticker {
	started: bool,
}

impl Ticker {
	pub fn new() -> Self {
		Ticker { started: false }
	}

	pub fn tick(&mut self) {
		let mut err = std::io::stderr();
		if !self.started {
			self.started = true;
			let _ = write!(err, "Synchronizing: ");
		}
		let _ = write!(err, ".");
		let _ = err.flush();
	}

	/// Terminate the indicator line if any dots were printed
	pub fn finish(&mut self) {
		if self.started {
			self.started = false;
			let _ = writeln!(std::io::stderr());
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_ticker_finish_without_ticks_is_silent() {
		// finish() before any tick must not print a stray newline; this
		// only exercises the state transitions
		let mut ticker = Ticker::new();
		ticker.finish();
		assert!(!ticker.started);

		ticker.tick();
		assert!(ticker.started);
		ticker.finish();
		assert!(!ticker.started);
	}
}

// vim: ts=4
