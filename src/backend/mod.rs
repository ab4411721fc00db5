//! Backend tool selection, command construction and output parsing
//!
//! The actual transfer work is delegated to a platform-native tool; this
//! module turns one logical request into the tool's argument lists and
//! recovers structured statistics from its human-readable output.

pub mod robocopy;
pub mod rsync;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::types::{Direction, SyncCommand, SyncRequest};

/// File patterns never propagated by any backend: hidden files, office lock
/// files and OS housekeeping files
pub const EXCLUDED_FILES: &[&str] = &[".*", "~$*", "desktop.ini", "Thumbs.db"];

/// Directory patterns never propagated (recycle-bin metadata)
pub const EXCLUDED_DIRS: &[&str] = &["$RECYCLE.BIN"];

/// Backend synchronization tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
	Rsync,
	Robocopy,
}

impl Backend {
	/// Tool native to the current platform
	pub fn native() -> Self {
		if cfg!(windows) {
			Backend::Robocopy
		} else {
			Backend::Rsync
		}
	}

	/// Executable name
	pub fn program(&self) -> &'static str {
		match self {
			Backend::Rsync => "rsync",
			Backend::Robocopy => "robocopy",
		}
	}

	/// Whether an exit code counts as success.
	///
	/// rsync reports success only as 0. robocopy uses 0-7 as informational
	/// success states; 8 and above are failures.
	pub fn exit_ok(&self, code: i32) -> bool {
		match self {
			Backend::Rsync => code == 0,
			Backend::Robocopy => (0..=7).contains(&code),
		}
	}

	/// Extract the statistics summary from captured output. Figures without
	/// a matching line stay at their defaults; an entirely absent summary
	/// block yields all defaults.
	pub fn parse_stats(&self, output: &str) -> BackendStats {
		match self {
			Backend::Rsync => rsync::parse_stats(output),
			Backend::Robocopy => robocopy::parse_stats(output),
		}
	}

	fn one_way_command(&self, source: &str, destination: &str, delete: bool) -> SyncCommand {
		match self {
			Backend::Rsync => rsync::command(source, destination, delete),
			Backend::Robocopy => robocopy::command(source, destination, delete),
		}
	}
}

impl FromStr for Backend {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"rsync" => Ok(Self::Rsync),
			"robocopy" => Ok(Self::Robocopy),
			_ => Err(format!("Unknown backend: {}. Valid options: rsync, robocopy", s)),
		}
	}
}

impl fmt::Display for Backend {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.program())
	}
}

/// Statistics recovered from one backend run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendStats {
	pub files_copied: u64,
	pub files_deleted: u64,
	pub total_file_size: Option<String>,
	pub speedup: Option<String>,
}

/// Build the ordered process invocations for a request.
///
/// One-way yields a single source-to-destination command; two-way yields the
/// forward command followed by the reverse one, sharing the same exclusion
/// set. Each entry is an isolated process invocation; commands are never
/// joined through a shell.
///
/// Deletion is only valid one-way. A two-way request asking for it keeps
/// running without deletion, with a logged warning.
pub fn build_commands(request: &SyncRequest, backend: Backend) -> Vec<SyncCommand> {
	let delete = match request.direction {
		Direction::OneWay => request.delete_extraneous,
		Direction::TwoWay => {
			if request.delete_extraneous {
				warn!("Deletion is not supported for two-way sync; continuing without it");
			}
			false
		}
	};

	let forward = backend.one_way_command(&request.source_path, &request.destination_path, delete);
	match request.direction {
		Direction::OneWay => vec![forward],
		Direction::TwoWay => {
			let reverse =
				backend.one_way_command(&request.destination_path, &request.source_path, false);
			vec![forward, reverse]
		}
	}
}

/// Strip thousands separators and parse a count figure; unparseable text
/// counts as zero rather than an error
pub(crate) fn parse_count(raw: &str) -> u64 {
	raw.replace(',', "").parse().unwrap_or(0)
}


// vim: ts=4
