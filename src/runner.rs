//! Child process execution with output capture and cancellation
//!
//! Each sync command runs as its own child process with piped stdout and
//! stderr; there is no shell in between. While the child runs, a cosmetic
//! dot ticker keeps the console alive, and a cancellation signal (Ctrl-C by
//! default) terminates the child instead of orphaning it.

use std::future::Future;
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

use crate::error::SyncError;
use crate::progress::{Ticker, TICK_INTERVAL};
use crate::types::SyncCommand;

/// Captured outcome of one backend invocation
#[derive(Debug, Clone)]
pub struct CommandOutput {
	pub code: i32,
	pub stdout: String,
	pub stderr: String,
}

/// Run one command to completion, cancelling on Ctrl-C
pub async fn run(command: &SyncCommand) -> Result<CommandOutput, SyncError> {
	run_with_cancel(command, async {
		let _ = tokio::signal::ctrl_c().await;
	})
	.await
}

/// Run one command to completion; `cancel` resolving kills the child and
/// yields `SyncError::Aborted`.
pub async fn run_with_cancel<F>(command: &SyncCommand, cancel: F) -> Result<CommandOutput, SyncError>
where
	F: Future<Output = ()>,
{
	let mut child = Command::new(&command.program)
		.args(&command.args)
		.stdin(Stdio::null())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.spawn()
		.map_err(|e| SyncError::SpawnFailed { cmd: command.program.clone(), source: e })?;

	let mut stdout_pipe = child
		.stdout
		.take()
		.ok_or_else(|| SyncError::Other { message: "child stdout unavailable".to_string() })?;
	let mut stderr_pipe = child
		.stderr
		.take()
		.ok_or_else(|| SyncError::Other { message: "child stderr unavailable".to_string() })?;

	// Drain both pipes concurrently so a chatty child cannot stall against a
	// full pipe while we wait for it to exit
	let stdout_task = tokio::spawn(async move {
		let mut buf = String::new();
		let _ = stdout_pipe.read_to_string(&mut buf).await;
		buf
	});
	let stderr_task = tokio::spawn(async move {
		let mut buf = String::new();
		let _ = stderr_pipe.read_to_string(&mut buf).await;
		buf
	});

	let mut ticker = Ticker::new();
	let mut interval = tokio::time::interval(TICK_INTERVAL);
	tokio::pin!(cancel);

	let status = loop {
		tokio::select! {
			status = child.wait() => break status?,
			_ = interval.tick() => ticker.tick(),
			_ = &mut cancel => {
				ticker.finish();
				let _ = child.kill().await;
				let _ = child.wait().await;
				stdout_task.abort();
				stderr_task.abort();
				return Err(SyncError::Aborted);
			}
		}
	};
	ticker.finish();

	let stdout = stdout_task.await.unwrap_or_default();
	let stderr = stderr_task.await.unwrap_or_default();

	Ok(CommandOutput { code: status.code().unwrap_or(-1), stdout, stderr })
}

// vim: ts=4
