//! Location classification and remote share resolution
//!
//! Input path strings are either local filesystem paths or SMB shares. A
//! share is authenticated and mounted onto a private, process-scoped mount
//! point, and the request proceeds against that mount point as a substitute
//! local path. Any resolution failure aborts the request before a sync
//! process is spawned.

pub mod mount;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{ResolveError, SyncError};
use crate::types::Credentials;
use mount::{Mounter, ShareHandle};

/// Kind of location a user-supplied path string denotes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
	Local(PathBuf),
	Share(ShareUrl),
}

impl Location {
	/// Classify a path string. `smb://`, `//` and `\\` prefixes denote
	/// shares; everything else is a local path.
	pub fn detect(input: &str) -> Result<Location, ResolveError> {
		let is_share = input.to_ascii_lowercase().starts_with("smb://")
			|| input.starts_with("//")
			|| input.starts_with("\\\\");
		if is_share {
			Ok(Location::Share(ShareUrl::parse(input)?))
		} else {
			Ok(Location::Local(PathBuf::from(input)))
		}
	}
}

/// Decomposed SMB share address: host, share name and the directory path
/// below the share (possibly empty)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareUrl {
	pub host: String,
	pub share: String,
	pub path: String,
}

impl ShareUrl {
	/// Parse any of the accepted share notations:
	/// `smb://host/share/dir`, `//host/share/dir`, `\\host\share\dir`.
	pub fn parse(input: &str) -> Result<ShareUrl, ResolveError> {
		let rest = if input.to_ascii_lowercase().starts_with("smb://") {
			&input[6..]
		} else if input.starts_with("//") || input.starts_with("\\\\") {
			&input[2..]
		} else {
			input
		};

		let normalized = rest.replace('\\', "/");
		let mut parts = normalized.split('/').filter(|part| !part.is_empty());
		let host = match parts.next() {
			Some(host) => host.to_string(),
			None => return Err(ResolveError::InvalidShareUrl { url: input.to_string() }),
		};
		let share = match parts.next() {
			Some(share) => share.to_string(),
			None => return Err(ResolveError::InvalidShareUrl { url: input.to_string() }),
		};
		let path = parts.collect::<Vec<_>>().join("/");

		Ok(ShareUrl { host, share, path })
	}

	/// The `//host/share` form understood by the mount tooling
	pub fn unc(&self) -> String {
		format!("//{}/{}", self.host, self.share)
	}
}

impl fmt::Display for ShareUrl {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.path.is_empty() {
			write!(f, "smb://{}/{}", self.host, self.share)
		} else {
			write!(f, "smb://{}/{}/{}", self.host, self.share, self.path)
		}
	}
}

/// A resolved endpoint: the path handed to the backend tool, plus the handle
/// keeping a remote share attached for the lifetime of the request
pub struct Resolved {
	pub backend_path: String,
	pub handle: Option<ShareHandle>,
}

impl std::fmt::Debug for Resolved {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Resolved")
			.field("backend_path", &self.backend_path)
			.field("handle", &self.handle.is_some())
			.finish()
	}
}

impl Resolved {
	/// Release any held share mount. Called on every exit path of a request.
	pub async fn release(&mut self) {
		if let Some(handle) = self.handle.as_mut() {
			if let Err(e) = handle.release().await {
				tracing::warn!("{}", e);
			}
		}
	}
}

/// Resolve one endpoint of a request.
///
/// Local source paths must exist; local destinations pass through untouched
/// (the backend creates them). Shares require credentials and are mounted
/// below `mount_base`.
pub async fn resolve(
	input: &str,
	credentials: Option<&Credentials>,
	is_source: bool,
	mounter: &Arc<dyn Mounter>,
	mount_base: &std::path::Path,
) -> Result<Resolved, SyncError> {
	match Location::detect(input)? {
		Location::Local(path) => {
			if is_source && !path.exists() {
				return Err(SyncError::Validation {
					message: format!("The specified local path does not exist: {}", path.display()),
				});
			}
			Ok(Resolved { backend_path: input.to_string(), handle: None })
		}
		Location::Share(url) => {
			let credentials = credentials.ok_or_else(|| ResolveError::MissingCredentials {
				share: url.to_string(),
			})?;
			let handle = mount::establish(&url, credentials, mounter.clone(), mount_base).await?;
			let backend_path = handle.backend_path(&url);
			Ok(Resolved { backend_path, handle: Some(handle) })
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_detect_local_paths() {
		assert_eq!(
			Location::detect("/srv/data").unwrap(),
			Location::Local(PathBuf::from("/srv/data"))
		);
		assert_eq!(
			Location::detect("./relative").unwrap(),
			Location::Local(PathBuf::from("./relative"))
		);
		assert_eq!(
			Location::detect("C:\\data").unwrap(),
			Location::Local(PathBuf::from("C:\\data"))
		);
	}

	#[test]
	fn test_detect_share_notations() {
		for input in &["smb://nas/media/tv", "//nas/media/tv", "\\\\nas\\media\\tv"] {
			match Location::detect(input).unwrap() {
				Location::Share(url) => {
					assert_eq!(url.host, "nas");
					assert_eq!(url.share, "media");
					assert_eq!(url.path, "tv");
				}
				other => panic!("expected share for {}, got {:?}", input, other),
			}
		}
	}

	#[test]
	fn test_share_url_without_subpath() {
		let url = ShareUrl::parse("smb://nas.local/backup").unwrap();
		assert_eq!(url.host, "nas.local");
		assert_eq!(url.share, "backup");
		assert_eq!(url.path, "");
		assert_eq!(url.unc(), "//nas.local/backup");
		assert_eq!(url.to_string(), "smb://nas.local/backup");
	}

	#[test]
	fn test_share_url_nested_subpath() {
		let url = ShareUrl::parse("smb://nas/media/tv/season 1").unwrap();
		assert_eq!(url.path, "tv/season 1");
		assert_eq!(url.to_string(), "smb://nas/media/tv/season 1");
	}

	#[test]
	fn test_share_url_missing_share_component() {
		assert!(matches!(
			ShareUrl::parse("smb://nas"),
			Err(ResolveError::InvalidShareUrl { .. })
		));
		assert!(matches!(ShareUrl::parse("//"), Err(ResolveError::InvalidShareUrl { .. })));
	}
}

// vim: ts=4
