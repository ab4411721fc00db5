//! End-to-end aggregation through the real process runner
//!
//! Backend output is produced by `/bin/sh` stand-ins emitting the exact
//! summary lines the parsers look for, so the full run-parse-aggregate
//! pipeline is exercised without rsync or robocopy installed.

#![cfg(unix)]

use sharesync::backend::Backend;
use sharesync::sync::run_commands;
use sharesync::types::SyncCommand;
use tempfile::tempdir;

fn sh(script: &str) -> SyncCommand {
	SyncCommand::new("sh", vec!["-c".to_string(), script.to_string()])
}

#[tokio::test]
async fn one_way_success_populates_the_result() {
	let commands = vec![sh(
		"echo 'Number of files transferred: 10'; echo 'Total file size: 1,024 bytes'; exit 0",
	)];
	let result = run_commands(&commands, Backend::Rsync).await.unwrap();

	assert!(result.success);
	assert_eq!(result.return_code, 0);
	assert_eq!(result.files_copied, 10);
	assert_eq!(result.files_deleted, 0);
	assert_eq!(result.total_file_size, "1,024 bytes");
	assert_eq!(result.error, None);
}

#[tokio::test]
async fn two_way_counts_are_additive() {
	let commands = vec![
		sh("echo 'Number of files transferred: 3'; exit 0"),
		sh("echo 'Number of files transferred: 2'; exit 0"),
	];
	let result = run_commands(&commands, Backend::Rsync).await.unwrap();

	assert!(result.success);
	assert_eq!(result.files_copied, 5);
}

#[tokio::test]
async fn size_and_speedup_are_last_write_wins() {
	let commands = vec![
		sh("echo 'Total file size: 1,024 bytes'; echo 'total size is 1,024  speedup is 2.00'; exit 0"),
		sh("echo 'Total file size: 4,096 bytes'; echo 'total size is 4,096  speedup is 8.00'; exit 0"),
	];
	let result = run_commands(&commands, Backend::Rsync).await.unwrap();

	assert_eq!(result.total_file_size, "4,096 bytes");
	assert_eq!(result.speedup.as_deref(), Some("8.00"));
}

#[tokio::test]
async fn first_failure_short_circuits_the_second_command() {
	let dir = tempdir().unwrap();
	let marker = dir.path().join("second-ran");

	let commands = vec![
		sh("echo 'rsync error: permission denied' >&2; exit 23"),
		sh(&format!("touch '{}'; exit 0", marker.display())),
	];
	let result = run_commands(&commands, Backend::Rsync).await.unwrap();

	assert!(!result.success);
	assert_eq!(result.return_code, 23);
	assert_eq!(result.error.as_deref(), Some("rsync error: permission denied\n"));
	assert!(!marker.exists(), "second command must never be invoked after a failure");
}

#[tokio::test]
async fn robocopy_informational_exit_codes_accumulate_as_success() {
	let commands = vec![
		sh("echo '   Files :        10         3         7         0         0         0'; exit 1"),
		sh("echo '   Files :        10         2         8         0         0         0'; exit 5"),
	];
	let result = run_commands(&commands, Backend::Robocopy).await.unwrap();

	assert!(result.success);
	assert_eq!(result.files_copied, 5);
	assert_eq!(result.return_code, 5, "last informational code wins");
}

#[tokio::test]
async fn robocopy_failure_code_stops_the_run() {
	let dir = tempdir().unwrap();
	let marker = dir.path().join("second-ran");

	let commands = vec![
		sh("echo 'ERROR 5 (0x00000005) Access is denied.' >&2; exit 8"),
		sh(&format!("touch '{}'; exit 0", marker.display())),
	];
	let result = run_commands(&commands, Backend::Robocopy).await.unwrap();

	assert!(!result.success);
	assert_eq!(result.return_code, 8);
	assert!(!marker.exists());
}

#[tokio::test]
async fn summary_free_output_succeeds_with_defaults() {
	let commands = vec![sh("echo 'nothing to do'; exit 0")];
	let result = run_commands(&commands, Backend::Rsync).await.unwrap();

	assert!(result.success);
	assert_eq!(result.files_copied, 0);
	assert_eq!(result.total_file_size, "0 bytes");
}

// vim: ts=4
