//! Core data model for sync requests and results

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Direction of a synchronization request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	/// Mirror source into destination
	OneWay,

	/// Mirror source into destination, then destination back into source
	TwoWay,
}

impl FromStr for Direction {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"one-way" | "oneway" | "1" => Ok(Self::OneWay),
			"two-way" | "twoway" | "2" => Ok(Self::TwoWay),
			_ => Err("Invalid direction. Please choose 'one-way' or 'two-way'.".to_string()),
		}
	}
}

impl fmt::Display for Direction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::OneWay => write!(f, "one-way"),
			Self::TwoWay => write!(f, "two-way"),
		}
	}
}

/// Credentials for one SMB endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	pub username: String,
	pub password: String,
}

impl Credentials {
	pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
		Credentials { username: username.into(), password: password.into() }
	}
}

// The password must never reach logs or panic messages
impl fmt::Debug for Credentials {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Credentials")
			.field("username", &self.username)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// A single synchronization request, constructed fresh per session iteration.
///
/// Credentials are carried per endpoint: the source pair is never applied to
/// the destination share or vice versa.
#[derive(Debug, Clone)]
pub struct SyncRequest {
	pub source_path: String,
	pub destination_path: String,
	pub direction: Direction,

	/// Remove destination files absent from the source. Only meaningful for
	/// one-way requests; two-way requests drop it with a warning.
	pub delete_extraneous: bool,

	pub source_credentials: Option<Credentials>,
	pub destination_credentials: Option<Credentials>,
}

/// One child-process invocation of the backend tool.
///
/// Commands run directly, never through a shell, so an argument token like
/// `&&` would reach the tool verbatim instead of joining two invocations.
/// The builder never produces such tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncCommand {
	pub program: String,
	pub args: Vec<String>,
}

impl SyncCommand {
	pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
		SyncCommand { program: program.into(), args }
	}

	/// Single-line rendering for log output, quoting arguments that contain
	/// whitespace
	pub fn display_line(&self) -> String {
		let mut line = self.program.clone();
		for arg in &self.args {
			line.push(' ');
			if arg.contains(char::is_whitespace) {
				line.push('\'');
				line.push_str(arg);
				line.push('\'');
			} else {
				line.push_str(arg);
			}
		}
		line
	}
}

/// Aggregated outcome of one request, accumulated across its constituent
/// commands and rendered as the JSON summary block.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
	pub success: bool,
	pub return_code: i32,
	pub files_copied: u64,
	pub files_deleted: u64,
	pub total_file_size: String,

	/// Transfer efficiency ratio; only rsync reports one
	#[serde(skip_serializing_if = "Option::is_none")]
	pub speedup: Option<String>,

	pub error: Option<String>,
}

impl Default for SyncResult {
	fn default() -> Self {
		SyncResult {
			success: true,
			return_code: 0,
			files_copied: 0,
			files_deleted: 0,
			total_file_size: "0 bytes".to_string(),
			speedup: None,
			error: None,
		}
	}
}

impl SyncResult {
	/// Result describing an operation that failed before or outside the
	/// backend run itself
	pub fn failed(message: impl Into<String>) -> Self {
		SyncResult {
			success: false,
			return_code: 1,
			error: Some(message.into()),
			..SyncResult::default()
		}
	}
}


// vim: ts=4
