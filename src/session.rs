//! Interactive session loop
//!
//! Drives the prompt flow: source, destination, options, execution, report,
//! and the offer to go again. Invalid selections terminate the program by
//! default; the `reprompt` policy re-asks instead.

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::backend::Backend;
use crate::config::{Config, PromptPolicy};
use crate::error::SyncError;
use crate::resolve::mount::{Mounter, SystemMounter};
use crate::sync;
use crate::types::{Credentials, Direction, SyncRequest, SyncResult};
use crate::utils::terminal::{prompt_line, prompt_password};

/// Endpoint kind chosen at the mode prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndpointMode {
	Local,
	Smb,
}

fn parse_mode(input: &str) -> Option<EndpointMode> {
	match input.trim() {
		"1" => Some(EndpointMode::Local),
		"2" => Some(EndpointMode::Smb),
		_ => None,
	}
}

fn is_yes(input: &str) -> bool {
	input.trim().eq_ignore_ascii_case("yes")
}

/// Print the structured summary block followed by the log lines
pub fn print_report(result: &SyncResult) {
	match serde_json::to_string_pretty(result) {
		Ok(json) => println!("{}", json),
		Err(e) => error!("Cannot render result summary: {}", e),
	}

	if result.success {
		info!("Sync completed successfully.");
		info!("Files copied: {}", result.files_copied);
		info!("Files deleted: {}", result.files_deleted);
		info!("Total file size: {}", result.total_file_size);
		if let Some(speedup) = &result.speedup {
			info!("Speedup: {}", speedup);
		}
	} else {
		error!("Sync failed: {}", result.error.as_deref().unwrap_or("unknown error"));
	}
}

/// One interactive sync session
pub struct Session {
	policy: PromptPolicy,
	backend: Backend,
	mount_base: PathBuf,
	mounter: Arc<dyn Mounter>,
}

impl Session {
	pub fn new(config: &Config) -> Self {
		Session {
			policy: config.prompt_policy,
			backend: config.backend.unwrap_or_else(Backend::native),
			mount_base: config.mount_base.clone().unwrap_or_else(std::env::temp_dir),
			mounter: Arc::new(SystemMounter),
		}
	}

	/// Substitute the share mounter (tests use a fake)
	#[allow(dead_code)]
	pub fn with_mounter(mut self, mounter: Arc<dyn Mounter>) -> Self {
		self.mounter = mounter;
		self
	}

	/// Drive the loop until the user declines another sync. Validation and
	/// connection errors terminate the whole session; backend failures are
	/// reported and the loop continues.
	pub async fn run(&self) -> Result<(), SyncError> {
		loop {
			let request = self.collect_request()?;

			let result = match sync::run_request(
				&request,
				self.backend,
				self.mounter.clone(),
				&self.mount_base,
			)
			.await
			{
				Ok(result) => result,
				Err(e @ SyncError::Validation { .. })
				| Err(e @ SyncError::Resolve(_))
				| Err(e @ SyncError::Aborted) => return Err(e),
				// Spawn and I/O problems become a failed result so the
				// session can offer another attempt
				Err(e) => SyncResult::failed(e.to_string()),
			};

			print_report(&result);

			let again = prompt_line("Do you want to perform another sync? (yes/no): ")?;
			if !is_yes(&again) {
				break;
			}
		}

		println!("Program finished. Goodbye!");
		Ok(())
	}

	/// Prompt until `parse` accepts the input, or fail fast per policy
	fn ask<T, F>(&self, prompt: &str, parse: F) -> Result<T, SyncError>
	where
		F: Fn(&str) -> Result<T, String>,
	{
		loop {
			let line = prompt_line(prompt)?;
			match parse(&line) {
				Ok(value) => return Ok(value),
				Err(message) => match self.policy {
					PromptPolicy::FailFast => {
						return Err(SyncError::Validation { message })
					}
					PromptPolicy::Reprompt => {
						warn!("{}", message);
						continue;
					}
				},
			}
		}
	}

	fn collect_endpoint(&self, which: &str) -> Result<(String, Option<Credentials>), SyncError> {
		let mode = self.ask(
			&format!("Choose {} mode (1 for local path, 2 for SMB): ", which),
			|input| {
				parse_mode(input)
					.ok_or_else(|| format!("Invalid {} mode selection.", which))
			},
		)?;

		match mode {
			EndpointMode::Local => {
				let path = prompt_line(&format!("Enter the {} directory path: ", which))?;
				Ok((path, None))
			}
			EndpointMode::Smb => {
				let url = prompt_line(&format!("Enter the {} SMB URL: ", which))?;
				let username = prompt_line(&format!("Enter SMB username for {}: ", which))?;
				let password = prompt_password(&format!("Enter SMB password for {}: ", which))?;
				Ok((url, Some(Credentials::new(username, password))))
			}
		}
	}

	fn collect_request(&self) -> Result<SyncRequest, SyncError> {
		let (source_path, source_credentials) = self.collect_endpoint("source")?;
		let (destination_path, destination_credentials) =
			self.collect_endpoint("destination")?;

		let direction = self.ask("Choose sync direction (one-way or two-way): ", |input| {
			input.parse::<Direction>()
		})?;

		let delete_extraneous = if direction == Direction::OneWay {
			is_yes(&prompt_line("Delete files in the destination? (yes/no): ")?)
		} else {
			false
		};

		Ok(SyncRequest {
			source_path,
			destination_path,
			direction,
			delete_extraneous,
			source_credentials,
			destination_credentials,
		})
	}
}


// vim: ts=4
