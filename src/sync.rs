//! Request orchestration: resolve, build, run, parse, aggregate
//!
//! One request flows through a fixed pipeline: both endpoints are resolved
//! (mounting shares as needed), the backend commands are built, executed
//! strictly in sequence, and their statistics folded into one result. Held
//! share mounts are released on every exit path.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::backend::{build_commands, Backend};
use crate::error::SyncError;
use crate::resolve::{self, mount::Mounter, mount::SystemMounter};
use crate::runner::{self, CommandOutput};
use crate::types::{Credentials, Direction, SyncCommand, SyncRequest, SyncResult};

/// Fold one command's outcome into the aggregated result. Returns false on
/// failure, which stops the remaining commands of the request.
///
/// Counts are additive across commands; size and speedup are last-write-wins
/// since the wrapped tools only report per-run totals. A failed command
/// records its exit code and captured stderr.
pub fn accumulate(result: &mut SyncResult, output: &CommandOutput, backend: Backend) -> bool {
	if !backend.exit_ok(output.code) {
		result.success = false;
		result.return_code = output.code;
		result.error = Some(output.stderr.clone());
		return false;
	}

	let stats = backend.parse_stats(&output.stdout);
	result.files_copied += stats.files_copied;
	result.files_deleted += stats.files_deleted;
	if let Some(size) = stats.total_file_size {
		result.total_file_size = size;
	}
	if let Some(speedup) = stats.speedup {
		result.speedup = Some(speedup);
	}
	result.return_code = output.code;
	true
}

/// Run a pre-built command sequence, short-circuiting on the first failure:
/// a failed first command of a two-way request prevents the reverse run.
pub async fn run_commands(
	commands: &[SyncCommand],
	backend: Backend,
) -> Result<SyncResult, SyncError> {
	let mut result = SyncResult::default();
	for command in commands {
		info!("Executing command: {}", command.display_line());
		let output = runner::run(command).await?;
		if !accumulate(&mut result, &output, backend) {
			break;
		}
	}
	Ok(result)
}

/// Execute one request end to end.
pub async fn run_request(
	request: &SyncRequest,
	backend: Backend,
	mounter: Arc<dyn Mounter>,
	mount_base: &Path,
) -> Result<SyncResult, SyncError> {
	let mut source = resolve::resolve(
		&request.source_path,
		request.source_credentials.as_ref(),
		true,
		&mounter,
		mount_base,
	)
	.await?;

	let mut destination = match resolve::resolve(
		&request.destination_path,
		request.destination_credentials.as_ref(),
		false,
		&mounter,
		mount_base,
	)
	.await
	{
		Ok(resolved) => resolved,
		Err(e) => {
			source.release().await;
			return Err(e);
		}
	};

	let effective = SyncRequest {
		source_path: source.backend_path.clone(),
		destination_path: destination.backend_path.clone(),
		..request.clone()
	};
	let commands = build_commands(&effective, backend);
	let outcome = run_commands(&commands, backend).await;

	source.release().await;
	destination.release().await;
	outcome
}

/// Builder for one synchronization run
///
/// ```rust,ignore
/// use sharesync::sync::SyncBuilder;
///
/// let result = SyncBuilder::new()
///     .source("/srv/photos")
///     .destination("smb://nas.local/backup/photos")
///     .destination_credentials(Credentials::new("alice", "secret"))
///     .delete_extraneous(true)
///     .sync()
///     .await?;
/// ```
pub struct SyncBuilder {
	source: Option<String>,
	destination: Option<String>,
	direction: Direction,
	delete_extraneous: bool,
	source_credentials: Option<Credentials>,
	destination_credentials: Option<Credentials>,
	backend: Backend,
	mounter: Option<Arc<dyn Mounter>>,
	mount_base: Option<PathBuf>,
}

impl SyncBuilder {
	pub fn new() -> Self {
		SyncBuilder {
			source: None,
			destination: None,
			direction: Direction::OneWay,
			delete_extraneous: false,
			source_credentials: None,
			destination_credentials: None,
			backend: Backend::native(),
			mounter: None,
			mount_base: None,
		}
	}

	pub fn source(mut self, path: impl Into<String>) -> Self {
		self.source = Some(path.into());
		self
	}

	pub fn destination(mut self, path: impl Into<String>) -> Self {
		self.destination = Some(path.into());
		self
	}

	pub fn direction(mut self, direction: Direction) -> Self {
		self.direction = direction;
		self
	}

	pub fn delete_extraneous(mut self, delete: bool) -> Self {
		self.delete_extraneous = delete;
		self
	}

	pub fn source_credentials(mut self, credentials: Credentials) -> Self {
		self.source_credentials = Some(credentials);
		self
	}

	pub fn destination_credentials(mut self, credentials: Credentials) -> Self {
		self.destination_credentials = Some(credentials);
		self
	}

	pub fn backend(mut self, backend: Backend) -> Self {
		self.backend = backend;
		self
	}

	/// Substitute the share mounter (tests use a fake)
	pub fn mounter(mut self, mounter: Arc<dyn Mounter>) -> Self {
		self.mounter = Some(mounter);
		self
	}

	pub fn mount_base(mut self, base: impl Into<PathBuf>) -> Self {
		self.mount_base = Some(base.into());
		self
	}

	pub async fn sync(self) -> Result<SyncResult, SyncError> {
		let source = self.source.ok_or_else(|| SyncError::Validation {
			message: "source path is required".to_string(),
		})?;
		let destination = self.destination.ok_or_else(|| SyncError::Validation {
			message: "destination path is required".to_string(),
		})?;

		let request = SyncRequest {
			source_path: source,
			destination_path: destination,
			direction: self.direction,
			delete_extraneous: self.delete_extraneous,
			source_credentials: self.source_credentials,
			destination_credentials: self.destination_credentials,
		};
		let mounter = self.mounter.unwrap_or_else(|| Arc::new(SystemMounter));
		let mount_base = self.mount_base.unwrap_or_else(std::env::temp_dir);

		run_request(&request, self.backend, mounter, &mount_base).await
	}
}

impl Default for SyncBuilder {
	fn default() -> Self {
		Self::new()
	}
}


// vim: ts=4
