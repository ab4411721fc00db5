//! Error types for sharesync operations

use std::error::Error;
use std::fmt;
use std::io;

/// Main error type for sync operations
#[derive(Debug)]
pub enum SyncError {
	/// Invalid user input or request shape
	Validation { message: String },

	/// Remote share resolution failed (nested)
	Resolve(ResolveError),

	/// Failed to spawn the backend process
	SpawnFailed { cmd: String, source: io::Error },

	/// I/O error
	Io(io::Error),

	/// Operation aborted by user
	Aborted,

	/// Generic internal error
	Other { message: String },
}

impl SyncError {
	/// Process exit code for this failure.
	///
	/// Validation and connection problems exit with 2, a user abort with the
	/// conventional 130, anything from the execution side with 1.
	pub fn exit_code(&self) -> i32 {
		match self {
			SyncError::Validation { .. } | SyncError::Resolve(_) => 2,
			SyncError::Aborted => 130,
			_ => 1,
		}
	}
}

impl fmt::Display for SyncError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SyncError::Validation { message } => write!(f, "{}", message),
			SyncError::Resolve(e) => write!(f, "{}", e),
			SyncError::SpawnFailed { cmd, source } => {
				write!(f, "Failed to spawn '{}': {}", cmd, source)
			}
			SyncError::Io(e) => write!(f, "I/O error: {}", e),
			SyncError::Aborted => write!(f, "Operation aborted by user"),
			SyncError::Other { message } => write!(f, "{}", message),
		}
	}
}

impl Error for SyncError {}

impl From<io::Error> for SyncError {
	fn from(e: io::Error) -> Self {
		SyncError::Io(e)
	}
}

impl From<ResolveError> for SyncError {
	fn from(e: ResolveError) -> Self {
		SyncError::Resolve(e)
	}
}

impl From<String> for SyncError {
	fn from(e: String) -> Self {
		SyncError::Other { message: e }
	}
}

/// Remote-share resolution errors, one variant per user-facing diagnostic.
///
/// Any of these aborts the whole request before a sync process is spawned.
#[derive(Debug)]
pub enum ResolveError {
	/// Share string is not a usable `smb://host/share[/path]` form
	InvalidShareUrl { url: String },

	/// Share endpoint given without credentials
	MissingCredentials { share: String },

	/// Hostname did not resolve
	HostnameResolution { host: String, source: io::Error },

	/// Host resolved but the SMB port did not answer
	Unreachable { host: String, message: String },

	/// The server rejected the credentials
	AuthenticationFailed { share: String, detail: String },

	/// Mounting the share failed for another reason
	MountFailed { share: String, detail: String },

	/// Releasing an established mount failed
	UnmountFailed { mount_point: String, detail: String },
}

impl fmt::Display for ResolveError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ResolveError::InvalidShareUrl { url } => {
				write!(f, "Invalid SMB share URL '{}': expected smb://host/share[/path]", url)
			}
			ResolveError::MissingCredentials { share } => {
				write!(f, "SMB connection to {} requires username and password", share)
			}
			ResolveError::HostnameResolution { host, source } => {
				write!(
					f,
					"Unable to resolve hostname '{}': {}. Please check if the hostname is correct and your DNS settings are properly configured.",
					host, source
				)
			}
			ResolveError::Unreachable { host, message } => {
				write!(
					f,
					"Failed to connect to SMB server '{}': {}. Please check if the server is reachable and the SMB service is running.",
					host, message
				)
			}
			ResolveError::AuthenticationFailed { share, detail } => {
				write!(f, "Authentication failed for {}: {}", share, detail)
			}
			ResolveError::MountFailed { share, detail } => {
				write!(f, "Failed to mount {}: {}", share, detail)
			}
			ResolveError::UnmountFailed { mount_point, detail } => {
				write!(f, "Failed to unmount {}: {}", mount_point, detail)
			}
		}
	}
}

impl Error for ResolveError {}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_exit_code_categories() {
		let validation = SyncError::Validation { message: "bad mode".to_string() };
		assert_eq!(validation.exit_code(), 2);

		let resolve = SyncError::Resolve(ResolveError::Unreachable {
			host: "nas".to_string(),
			message: "timed out".to_string(),
		});
		assert_eq!(resolve.exit_code(), 2);

		let spawn = SyncError::SpawnFailed {
			cmd: "rsync".to_string(),
			source: io::Error::new(io::ErrorKind::NotFound, "not found"),
		};
		assert_eq!(spawn.exit_code(), 1);

		assert_eq!(SyncError::Aborted.exit_code(), 130);
	}

	#[test]
	fn test_resolve_diagnostics_are_distinct() {
		let dns = ResolveError::HostnameResolution {
			host: "nas.local".to_string(),
			source: io::Error::new(io::ErrorKind::NotFound, "no such host"),
		};
		let unreachable = ResolveError::Unreachable {
			host: "nas.local".to_string(),
			message: "connection timed out".to_string(),
		};
		let auth = ResolveError::AuthenticationFailed {
			share: "smb://nas.local/media".to_string(),
			detail: "mount error(13)".to_string(),
		};

		assert!(dns.to_string().contains("resolve hostname"));
		assert!(unreachable.to_string().contains("reachable"));
		assert!(auth.to_string().contains("Authentication failed"));
	}
}

// vim: ts=4
