//! SMB share mounting through the OS mount facilities
//!
//! Shares are attached below a private, process-scoped mount point and
//! detached when the owning request finishes. The OS interaction sits
//! behind the `Mounter` trait so resolution logic is testable without a
//! reachable server.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::ShareUrl;
use crate::error::ResolveError;
use crate::types::Credentials;

/// Port probed to tell an unreachable server from a bad hostname
const SMB_PORT: u16 = 445;

/// Probe timeout; mount itself has its own
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Seam between share resolution and the OS mount machinery
#[async_trait]
pub trait Mounter: Send + Sync {
	/// Verify the share host resolves and answers on the SMB port
	async fn probe(&self, host: &str) -> Result<(), ResolveError>;

	/// Attach the share at the given empty directory
	async fn mount(
		&self,
		share: &ShareUrl,
		credentials: &Credentials,
		mount_point: &Path,
	) -> Result<(), ResolveError>;

	/// Detach a previously attached share
	async fn unmount(&self, mount_point: &Path) -> Result<(), ResolveError>;
}

/// Probe the host, create a private mount point and attach the share.
pub async fn establish(
	share: &ShareUrl,
	credentials: &Credentials,
	mounter: Arc<dyn Mounter>,
	mount_base: &Path,
) -> Result<ShareHandle, ResolveError> {
	info!("Attempting to connect to server: {}", share.host);
	mounter.probe(&share.host).await?;

	let mount_point =
		mount_base.join(format!("sharesync-{}-{}", std::process::id(), Uuid::new_v4()));
	std::fs::create_dir_all(&mount_point).map_err(|e| ResolveError::MountFailed {
		share: share.to_string(),
		detail: format!("cannot create mount point {}: {}", mount_point.display(), e),
	})?;

	match mounter.mount(share, credentials, &mount_point).await {
		Ok(()) => {
			debug!("Mounted {} at {}", share, mount_point.display());
			Ok(ShareHandle { mount_point, mounter, released: false })
		}
		Err(e) => {
			let _ = std::fs::remove_dir(&mount_point);
			Err(e)
		}
	}
}

/// Handle to an attached share; keeps the mount alive until released
pub struct ShareHandle {
	mount_point: PathBuf,
	mounter: Arc<dyn Mounter>,
	released: bool,
}

impl ShareHandle {
	pub fn mount_point(&self) -> &Path {
		&self.mount_point
	}

	/// The local path standing in for the share, including the directory
	/// below the share root
	pub fn backend_path(&self, share: &ShareUrl) -> String {
		if share.path.is_empty() {
			self.mount_point.display().to_string()
		} else {
			self.mount_point.join(&share.path).display().to_string()
		}
	}

	/// Detach the share and remove the private mount point. Must run on
	/// every exit path of a request; calling it twice is harmless.
	pub async fn release(&mut self) -> Result<(), ResolveError> {
		if self.released {
			return Ok(());
		}
		self.released = true;
		self.mounter.unmount(&self.mount_point).await?;
		let _ = std::fs::remove_dir(&self.mount_point);
		Ok(())
	}
}

// Backstop for early returns that skipped release()
impl Drop for ShareHandle {
	fn drop(&mut self) {
		if !self.released {
			warn!(
				"Share mount at {} was not released; detaching now",
				self.mount_point.display()
			);
			#[cfg(unix)]
			{
				let _ = std::process::Command::new("umount").arg(&self.mount_point).status();
			}
			let _ = std::fs::remove_dir(&self.mount_point);
		}
	}
}

/// Production mounter shelling out to the platform mount tooling
/// (`mount -t cifs` on Linux, `mount_smbfs` on macOS)
pub struct SystemMounter;

impl SystemMounter {
	/// Shared DNS-then-TCP probe with one diagnostic per failure cause
	async fn probe_host(host: &str) -> Result<(), ResolveError> {
		let mut addrs = tokio::net::lookup_host((host, SMB_PORT)).await.map_err(|e| {
			ResolveError::HostnameResolution { host: host.to_string(), source: e }
		})?;
		let addr = match addrs.next() {
			Some(addr) => addr,
			None => {
				return Err(ResolveError::HostnameResolution {
					host: host.to_string(),
					source: std::io::Error::new(
						std::io::ErrorKind::NotFound,
						"hostname resolved to no addresses",
					),
				})
			}
		};
		debug!("Resolved address: {}", addr);

		match tokio::time::timeout(CONNECT_TIMEOUT, tokio::net::TcpStream::connect(addr)).await {
			Ok(Ok(_)) => {
				info!("Successfully connected to SMB server");
				Ok(())
			}
			Ok(Err(e)) => Err(ResolveError::Unreachable {
				host: host.to_string(),
				message: e.to_string(),
			}),
			Err(_) => Err(ResolveError::Unreachable {
				host: host.to_string(),
				message: "connection timed out".to_string(),
			}),
		}
	}

	fn mount_command(
		share: &ShareUrl,
		credentials: &Credentials,
		mount_point: &Path,
	) -> tokio::process::Command {
		// TODO: pass credentials through a mode-0600 credentials= file so
		// they stay out of the mount argument list
		if cfg!(target_os = "macos") {
			let mut command = tokio::process::Command::new("mount_smbfs");
			command
				.arg(format!(
					"//{}:{}@{}/{}",
					credentials.username, credentials.password, share.host, share.share
				))
				.arg(mount_point);
			command
		} else {
			let mut command = tokio::process::Command::new("mount");
			command
				.arg("-t")
				.arg("cifs")
				.arg("-o")
				.arg(format!(
					"username={},password={}",
					credentials.username, credentials.password
				))
				.arg(share.unc())
				.arg(mount_point);
			command
		}
	}
}

#[async_trait]
impl Mounter for SystemMounter {
	async fn probe(&self, host: &str) -> Result<(), ResolveError> {
		Self::probe_host(host).await
	}

	async fn mount(
		&self,
		share: &ShareUrl,
		credentials: &Credentials,
		mount_point: &Path,
	) -> Result<(), ResolveError> {
		let output = Self::mount_command(share, credentials, mount_point)
			.output()
			.await
			.map_err(|e| ResolveError::MountFailed {
				share: share.to_string(),
				detail: e.to_string(),
			})?;

		if output.status.success() {
			return Ok(());
		}

		let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
		let lowered = stderr.to_lowercase();
		if lowered.contains("permission denied")
			|| lowered.contains("access denied")
			|| lowered.contains("authentication")
			|| lowered.contains("logon failure")
		{
			Err(ResolveError::AuthenticationFailed { share: share.to_string(), detail: stderr })
		} else {
			Err(ResolveError::MountFailed { share: share.to_string(), detail: stderr })
		}
	}

	async fn unmount(&self, mount_point: &Path) -> Result<(), ResolveError> {
		let output = tokio::process::Command::new("umount")
			.arg(mount_point)
			.output()
			.await
			.map_err(|e| ResolveError::UnmountFailed {
				mount_point: mount_point.display().to_string(),
				detail: e.to_string(),
			})?;

		if output.status.success() {
			Ok(())
		} else {
			Err(ResolveError::UnmountFailed {
				mount_point: mount_point.display().to_string(),
				detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
			})
		}
	}
}

// vim: ts=4
