//! Configuration for sharesync
//!
//! The configuration follows a priority chain:
//! 1. Built-in defaults (Config::default())
//! 2. Config file (~/.sharesync/config.toml)
//! 3. CLI flags (highest priority)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::backend::Backend;
use crate::error::SyncError;

/// Runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
	/// Default log level when RUST_LOG is not set
	pub log_level: String,

	/// Reaction to invalid interactive input
	pub prompt_policy: PromptPolicy,

	/// Backend tool override (defaults to the platform-native tool)
	pub backend: Option<Backend>,

	/// Base directory for process-scoped SMB mount points
	/// (defaults to the system temp directory)
	pub mount_base: Option<PathBuf>,
}

impl Default for Config {
	fn default() -> Self {
		Config {
			log_level: "info".to_string(),
			prompt_policy: PromptPolicy::FailFast,
			backend: None,
			mount_base: None,
		}
	}
}

impl Config {
	/// The per-user configuration directory (~/.sharesync)
	pub fn config_dir() -> Option<PathBuf> {
		std::env::var("HOME").ok().map(|home| PathBuf::from(home).join(".sharesync"))
	}

	/// Load a configuration file
	pub fn load(path: &Path) -> Result<Config, SyncError> {
		let raw = fs::read_to_string(path).map_err(|e| SyncError::Validation {
			message: format!("Cannot read config file {}: {}", path.display(), e),
		})?;
		toml::from_str(&raw).map_err(|e| SyncError::Validation {
			message: format!("Invalid config file {}: {}", path.display(), e),
		})
	}

	/// Load ~/.sharesync/config.toml when present, defaults otherwise
	pub fn load_or_default() -> Result<Config, SyncError> {
		match Self::config_dir() {
			Some(dir) => {
				let path = dir.join("config.toml");
				if path.is_file() {
					Self::load(&path)
				} else {
					Ok(Config::default())
				}
			}
			None => Ok(Config::default()),
		}
	}
}

/// Reaction to an unrecognized interactive selection.
///
/// The default terminates immediately; re-prompting is offered for callers
/// that prefer a second chance over an exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PromptPolicy {
	/// Terminate the program on the first invalid selection
	#[default]
	FailFast,

	/// Ask again until the input parses
	Reprompt,
}

impl FromStr for PromptPolicy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"fail-fast" | "failfast" => Ok(Self::FailFast),
			"reprompt" | "re-prompt" => Ok(Self::Reprompt),
			_ => Err(format!(
				"Unknown prompt policy: {}. Valid options: fail-fast, reprompt",
				s
			)),
		}
	}
}

impl fmt::Display for PromptPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::FailFast => write!(f, "fail-fast"),
			Self::Reprompt => write!(f, "reprompt"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn test_config_default() {
		let config = Config::default();
		assert_eq!(config.log_level, "info");
		assert_eq!(config.prompt_policy, PromptPolicy::FailFast);
		assert!(config.backend.is_none());
		assert!(config.mount_base.is_none());
	}

	#[test]
	fn test_config_load_toml() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");
		let mut file = std::fs::File::create(&path).unwrap();
		writeln!(file, "logLevel = \"debug\"").unwrap();
		writeln!(file, "promptPolicy = \"reprompt\"").unwrap();
		writeln!(file, "backend = \"robocopy\"").unwrap();

		let config = Config::load(&path).unwrap();
		assert_eq!(config.log_level, "debug");
		assert_eq!(config.prompt_policy, PromptPolicy::Reprompt);
		assert_eq!(config.backend, Some(Backend::Robocopy));
	}

	#[test]
	fn test_config_load_invalid_is_validation_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");
		std::fs::write(&path, "promptPolicy = \"sometimes\"").unwrap();

		let err = Config::load(&path).unwrap_err();
		assert_eq!(err.exit_code(), 2);
	}

	#[test]
	fn test_prompt_policy_round_trip() {
		for policy in &[PromptPolicy::FailFast, PromptPolicy::Reprompt] {
			assert_eq!(policy.to_string().parse::<PromptPolicy>().unwrap(), *policy);
		}
	}
}

// vim: ts=4
